use log::{debug, info};
use vantage_core::{StationLink, TimedPort};
use vantage_decode::{decode_loop, ForecastLabel, FrameLayout, Measurement};

use crate::error::RunError;

/// A decoded LOOP packet together with its forecast label.
#[derive(Debug, Clone, Copy)]
pub struct Reading {
    pub forecast: ForecastLabel,
    pub measurement: Measurement,
}

/// Wakes the station, fetches one frame and decodes it. The link is closed
/// before decoding starts.
pub fn read_station<P: TimedPort>(link: StationLink<P>, layout: &FrameLayout) -> Result<Reading, RunError> {
    let frame = vantage_core::poll(link)?;
    decode_frame(&frame, layout)
}

pub fn decode_frame(frame: &[u8], layout: &FrameLayout) -> Result<Reading, RunError> {
    let measurement = decode_loop(frame, layout).inspect_err(|_| {
        debug!("rejected frame: {}", hex::encode(frame));
    })?;
    let forecast = ForecastLabel::from_icon(measurement.icon)?;

    info!(
        "decoded {} frame: forecast={forecast} pressure={:?} temperature={:?} wind_speed={:?} wind_bearing={:?} humidity={:?}",
        layout.name(),
        measurement.pressure,
        measurement.temperature,
        measurement.wind_speed,
        measurement.wind_bearing,
        measurement.humidity,
    );
    Ok(Reading { forecast, measurement })
}
