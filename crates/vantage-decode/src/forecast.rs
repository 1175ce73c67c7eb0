use serde::Serialize;

use crate::error::DecodeError;

/// Canonical weather condition published as the entity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForecastLabel {
    #[serde(rename = "sunny")]
    Sunny,
    #[serde(rename = "partlycloudy")]
    PartlyCloudy,
    #[serde(rename = "cloudy")]
    Cloudy,
    #[serde(rename = "rainy")]
    Rainy,
    #[serde(rename = "snowy")]
    Snowy,
    #[serde(rename = "snowy-rainy")]
    SnowyRainy,
}

/// Station forecast icon codes. Codes are bit sets of rain/cloud/partly/sun/snow
/// but only these combinations are ever reported.
pub const FORECAST_ICONS: [(u8, ForecastLabel); 9] = [
    (8, ForecastLabel::Sunny),
    (6, ForecastLabel::PartlyCloudy),
    (2, ForecastLabel::Cloudy),
    (3, ForecastLabel::Rainy),
    (18, ForecastLabel::Snowy),
    (19, ForecastLabel::SnowyRainy),
    (7, ForecastLabel::Rainy),
    (22, ForecastLabel::Snowy),
    (23, ForecastLabel::SnowyRainy),
];

impl ForecastLabel {
    pub fn from_icon(icon: u8) -> Result<Self, DecodeError> {
        FORECAST_ICONS
            .iter()
            .find(|(code, _)| *code == icon)
            .map(|&(_, label)| label)
            .ok_or(DecodeError::UnknownForecastCode(icon))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::PartlyCloudy => "partlycloudy",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::SnowyRainy => "snowy-rainy",
        }
    }
}

impl std::fmt::Display for ForecastLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_round_trips() {
        let expected = [
            (8, "sunny"),
            (6, "partlycloudy"),
            (2, "cloudy"),
            (3, "rainy"),
            (7, "rainy"),
            (18, "snowy"),
            (22, "snowy"),
            (19, "snowy-rainy"),
            (23, "snowy-rainy"),
        ];
        for (icon, name) in expected {
            let label = ForecastLabel::from_icon(icon).unwrap();
            assert_eq!(label.as_str(), name);
            assert_eq!(label.to_string(), name);
        }
    }

    #[test]
    fn unknown_codes_fail() {
        let known: Vec<u8> = FORECAST_ICONS.iter().map(|(c, _)| *c).collect();
        for icon in (0..=u8::MAX).filter(|c| !known.contains(c)) {
            assert_eq!(ForecastLabel::from_icon(icon), Err(DecodeError::UnknownForecastCode(icon)));
        }
    }
}
