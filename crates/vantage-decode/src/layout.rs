//! Where each reported field lives in a LOOP payload.
//!
//! Offsets count from the `L` of `LOO`, i.e. after the leading ACK.

/// Field offsets of one LOOP layout. Only the `const` layouts below exist, so
/// every offset is known to fall inside the payload body.
///
/// ```compile_fail
/// use vantage_decode::FrameLayout;
/// let layout = FrameLayout { icon: 500, ..FrameLayout::LOOP };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub(crate) name: &'static str,
    /// Barometer, u16, thousandths of an inch of mercury.
    pub(crate) pressure: usize,
    /// Outside temperature, i16, tenths of a degree.
    pub(crate) temperature: usize,
    /// Wind speed, u8.
    pub(crate) wind_speed: usize,
    /// Wind direction, u16 degrees. `None` for layouts that don't report it.
    pub(crate) wind_bearing: Option<usize>,
    /// Outside humidity, u8 percent.
    pub(crate) humidity: usize,
    /// Forecast icon code, u8.
    pub(crate) icon: usize,
}

impl FrameLayout {
    pub const LOOP: FrameLayout = FrameLayout {
        name: "loop",
        pressure: 7,
        temperature: 12,
        wind_speed: 14,
        wind_bearing: Some(16),
        humidity: 33,
        icon: 89,
    };

    pub const LOOP_NO_BEARING: FrameLayout = FrameLayout {
        wind_bearing: None,
        name: "loop-no-bearing",
        ..FrameLayout::LOOP
    };

    pub const ALL: [FrameLayout; 2] = [FrameLayout::LOOP, FrameLayout::LOOP_NO_BEARING];

    pub fn by_name(name: &str) -> Option<FrameLayout> {
        Self::ALL.into_iter().find(|l| l.name == name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn reports_bearing(&self) -> bool {
        self.wind_bearing.is_some()
    }
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self::LOOP
    }
}
