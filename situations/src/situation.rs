use serde::Deserialize;
use thiserror::Error;

/// Cumulative case and death counts for one country at fetch time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Situation {
    pub cumulative_cases: u64,
    pub cumulative_deaths: u64,
}

#[derive(Error, Debug)]
pub enum SituationParseError {
    #[error("Response body is empty")]
    EmptyBody,
    #[error("Response does not match the feature query shape")]
    Malformed(#[from] serde_json::Error),
    #[error("Response contains no features")]
    NoFeatures,
    #[error("Feature service error {code}: {message}")]
    Service { code: i64, message: String },
}

#[derive(Deserialize, Debug)]
struct FeatureQueryResponse {
    // Decoded one at a time so that only the first feature has to be well formed.
    features: Option<Vec<serde_json::Value>>,
    error: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct ServiceError {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize, Debug)]
struct Feature {
    attributes: Attributes,
}

#[derive(Deserialize, Debug)]
struct Attributes {
    #[serde(rename = "CumCase")]
    cumulative_cases: u64,
    #[serde(rename = "CumDeath")]
    cumulative_deaths: u64,
}

fn service_error(error: serde_json::Value) -> SituationParseError {
    match serde_json::from_value::<ServiceError>(error.clone()) {
        Ok(error) => SituationParseError::Service {
            code: error.code,
            message: error.message,
        },
        Err(_) => SituationParseError::Service {
            code: 0,
            message: error.to_string(),
        },
    }
}

/// Decodes `{ "features": [ { "attributes": { "CumCase", "CumDeath" } } ] }`.
/// Only the first feature is read.
pub fn parse_situation(body: &[u8]) -> Result<Situation, SituationParseError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(SituationParseError::EmptyBody);
    }

    let response: FeatureQueryResponse = serde_json::from_slice(body)?;

    let features = match (response.features, response.error) {
        (Some(features), _) => features,
        (None, Some(error)) => return Err(service_error(error)),
        (None, None) => return Err(SituationParseError::NoFeatures),
    };

    let first = features
        .into_iter()
        .next()
        .ok_or(SituationParseError::NoFeatures)?;
    let attributes = serde_json::from_value::<Feature>(first)?.attributes;

    Ok(Situation {
        cumulative_cases: attributes.cumulative_cases,
        cumulative_deaths: attributes.cumulative_deaths,
    })
}
