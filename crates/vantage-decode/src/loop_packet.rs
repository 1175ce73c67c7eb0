use crate::error::DecodeError;
use crate::frame::ValidatedPayload;
use crate::layout::FrameLayout;

const PRESSURE_NONE: u16 = 0;
const TEMPERATURE_NONE: i16 = 32767;
const WIND_SPEED_NONE: u8 = 255;
const BEARING_NONE: u16 = 0;
const BEARING_NORTH: u16 = 360;
const HUMIDITY_NONE: u8 = 255;

/// Current conditions from one LOOP packet. `None` means the station had no
/// reading for that sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub pressure: Option<f64>,
    pub temperature: Option<f64>,
    pub wind_speed: Option<u8>,
    pub wind_bearing: Option<u16>,
    pub humidity: Option<u8>,
    pub icon: u8,
}

impl Measurement {
    pub fn decode(payload: &ValidatedPayload<'_>, layout: &FrameLayout) -> Self {
        let pressure = payload.u16_le_at(layout.pressure);
        let temperature = payload.i16_le_at(layout.temperature);
        let wind_speed = payload.u8_at(layout.wind_speed);
        let humidity = payload.u8_at(layout.humidity);

        Self {
            pressure: (pressure != PRESSURE_NONE).then(|| f64::from(pressure) / 1000.0),
            temperature: (temperature != TEMPERATURE_NONE).then(|| f64::from(temperature) / 10.0),
            wind_speed: (wind_speed != WIND_SPEED_NONE).then_some(wind_speed),
            wind_bearing: layout
                .wind_bearing
                .and_then(|offset| bearing(payload.u16_le_at(offset))),
            humidity: (humidity != HUMIDITY_NONE).then_some(humidity),
            icon: payload.u8_at(layout.icon),
        }
    }
}

/// 0 is "no data"; due north is reported as 360.
fn bearing(raw: u16) -> Option<u16> {
    match raw {
        BEARING_NONE => None,
        BEARING_NORTH => Some(0),
        degrees => Some(degrees),
    }
}

/// Validates a raw frame and decodes it with `layout`.
pub fn decode_loop(frame: &[u8], layout: &FrameLayout) -> Result<Measurement, DecodeError> {
    let payload = ValidatedPayload::from_frame(frame)?;
    Ok(Measurement::decode(&payload, layout))
}
