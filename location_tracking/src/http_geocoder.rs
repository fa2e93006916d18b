use std::sync::Arc;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use shared_kernel::http_client::{get_json, HttpGet};
use url::Url;

use crate::geocoder::{Geocoder, Placemark};
use crate::location::Location;

const REVERSE_GEOCODE_PATH: &str = "/geocode/json";

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    pub host: String,
    pub api_key: Secret<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum StatusCode {
    OK,
    #[serde(rename = "ZERO_RESULTS")]
    ZeroResults,
    #[serde(rename = "INVALID_REQUEST")]
    InvalidRequest,
    #[serde(rename = "OVER_QUERY_LIMIT")]
    OverQueryLimit,
    #[serde(rename = "REQUEST_DENIED")]
    RequestDenied,
    #[serde(rename = "UNKNOWN_ERROR")]
    UnknownError,
}

impl StatusCode {
    pub fn is_usable(&self) -> bool {
        matches!(self, StatusCode::OK | StatusCode::ZeroResults)
    }
}

#[derive(Deserialize, Debug)]
struct AddressComponent {
    long_name: String,
    short_name: String,
    types: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct GeocodeResult {
    address_components: Vec<AddressComponent>,
}

#[derive(Deserialize, Debug)]
struct ReverseGeocodeResponse {
    status: StatusCode,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

impl From<GeocodeResult> for Placemark {
    fn from(result: GeocodeResult) -> Self {
        let country = result
            .address_components
            .into_iter()
            .find(|component| component.types.iter().any(|kind| kind == "country"));
        Placemark {
            country: country.as_ref().map(|c| c.long_name.clone()),
            iso_country_code: country.map(|c| c.short_name),
        }
    }
}

/// Reverse geocoding against a Google style geocoding API, restricted to countries.
pub struct HttpGeocoder {
    http: Arc<dyn HttpGet>,
    config: GeocodingConfig,
}

impl HttpGeocoder {
    pub fn new(http: Arc<dyn HttpGet>, config: GeocodingConfig) -> Self {
        Self { http, config }
    }

    fn reverse_geocode_url(&self, location: &Location) -> anyhow::Result<Url> {
        let latlng = format!("{},{}", location.latitude, location.longitude);
        Url::parse_with_params(
            &format!("{}{}", self.config.host, REVERSE_GEOCODE_PATH),
            &[
                ("key", self.config.api_key.expose_secret().as_str()),
                ("latlng", latlng.as_str()),
                ("result_type", "country"),
            ],
        )
        .context("Failed to parse url")
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    #[tracing::instrument(skip(self), level = "info")]
    async fn reverse_geocode(&self, location: Location) -> anyhow::Result<Vec<Placemark>> {
        let url = self.reverse_geocode_url(&location)?;
        let response = get_json::<ReverseGeocodeResponse>(self.http.as_ref(), url).await?;

        if !response.status.is_usable() {
            return Err(anyhow!(
                "Reverse geocoding failed with {:?}: {}",
                response.status,
                response.error_message.unwrap_or_default()
            ));
        }

        Ok(response.results.into_iter().map(Placemark::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use httpmock::{Method::GET, MockServer};
    use secrecy::Secret;
    use serde_json::json;
    use shared_kernel::http_client::HttpClient;

    use super::{GeocodingConfig, HttpGeocoder};
    use crate::geocoder::{Geocoder, Placemark};
    use crate::location::Location;

    fn geocoder(server: &MockServer) -> HttpGeocoder {
        HttpGeocoder::new(
            Arc::new(HttpClient),
            GeocodingConfig {
                host: server.base_url(),
                api_key: Secret::new("test-key".to_owned()),
            },
        )
    }

    #[tokio::test]
    async fn test_that_country_component_becomes_a_placemark() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/geocode/json")
                    .query_param("result_type", "country")
                    .query_param("key", "test-key");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "status": "OK",
                        "results": [{
                            "address_components": [{
                                "long_name": "Netherlands",
                                "short_name": "NL",
                                "types": ["country", "political"]
                            }]
                        }]
                    }));
            })
            .await;

        let placemarks = geocoder(&server)
            .reverse_geocode(Location::new(52.37, 4.89))
            .await
            .unwrap();

        assert_eq!(
            placemarks,
            vec![Placemark {
                country: Some("Netherlands".to_owned()),
                iso_country_code: Some("NL".to_owned()),
            }]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_that_zero_results_yields_no_placemarks() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/geocode/json");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "status": "ZERO_RESULTS", "results": [] }));
            })
            .await;

        let placemarks = geocoder(&server)
            .reverse_geocode(Location::new(0.0, -30.0))
            .await
            .unwrap();

        assert!(placemarks.is_empty());
    }

    #[tokio::test]
    async fn test_that_result_without_country_component_has_no_iso_code() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/geocode/json");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "status": "OK",
                        "results": [{
                            "address_components": [{
                                "long_name": "Atlantic Ocean",
                                "short_name": "Atlantic Ocean",
                                "types": ["natural_feature"]
                            }]
                        }]
                    }));
            })
            .await;

        let placemarks = geocoder(&server)
            .reverse_geocode(Location::new(0.0, -30.0))
            .await
            .unwrap();

        assert_eq!(placemarks, vec![Placemark::default()]);
        assert_eq!(placemarks[0].country(), None);
    }

    #[tokio::test]
    async fn test_that_rejected_requests_are_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/geocode/json");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "status": "REQUEST_DENIED",
                        "error_message": "The provided API key is invalid."
                    }));
            })
            .await;

        let result = geocoder(&server)
            .reverse_geocode(Location::new(52.37, 4.89))
            .await;

        assert!(result.is_err());
    }
}
