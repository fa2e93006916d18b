use anyhow::Context;
use location_tracking::{AuthorizationStatus, GeocodingConfig};
use serde::Deserialize;
use shared_kernel::configuration::config;
use situations::{NumberFormatter, SituationServiceConfig};

#[derive(Debug, Deserialize, Clone)]
pub struct DeviceSettings {
    /// Authorization before the app asks for anything.
    pub authorization: AuthorizationStatus,
    /// What the user answers if the permission prompt is shown.
    pub prompt_response: AuthorizationStatus,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub situation_service: SituationServiceConfig,
    pub geocoding: GeocodingConfig,
    pub device: DeviceSettings,
    /// Overrides the process locale when set.
    #[serde(default)]
    pub locale: Option<String>,
    pub report_timeout_seconds: u64,
}

impl Settings {
    pub fn number_formatter(&self) -> NumberFormatter {
        match &self.locale {
            Some(locale) => NumberFormatter::for_locale(locale),
            None => NumberFormatter::from_environment(),
        }
    }

    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to deserialize settings to situation_report settings")
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use serde_json::json;

    fn settings(locale: Option<&str>) -> Settings {
        let mut settings = json!({
            "situation_service": { "host": "http://127.0.0.1:5000" },
            "geocoding": { "host": "http://127.0.0.1:5000", "api_key": "test-key" },
            "device": {
                "authorization": "authorized_when_in_use",
                "prompt_response": "denied",
                "latitude": 52.3676,
                "longitude": 4.9041
            },
            "report_timeout_seconds": 2
        });
        if let Some(locale) = locale {
            settings["locale"] = json!(locale);
        }
        serde_json::from_value(settings).unwrap()
    }

    #[test]
    fn test_configured_locale_is_used_for_numbers() {
        let settings = settings(Some("de"));
        assert_eq!(settings.number_formatter().format(1837803), "1.837.803");
    }

    #[test]
    fn test_locale_is_optional() {
        assert_eq!(settings(None).locale, None);
    }
}
