use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use shared_kernel::http_client::HttpGet;
use shared_kernel::main_context::MainContext;
use url::Url;

use crate::country::{Country, IsoCode};
use crate::situation::{parse_situation, Situation};

pub const DEFAULT_HOST: &str = "https://services.arcgis.com";

const QUERY_PATH: &str =
    "/5T5nSi527N4F7luB/arcgis/rest/services/COVID19_hist_cases_adm0_v5_view/FeatureServer/0/query";

// Latest record only: ordered by report date, one row, cumulative fields.
const QUERY_TAIL: &str = "geometryType=esriGeometryEnvelope&spatialRel=esriSpatialRelIntersects&resultType=none&distance=0.0&units=esriSRUnit_Meter&returnGeodetic=false&outFields=CumCase%2CCumDeath&returnHiddenFields=false&returnGeometry=false&featureEncoding=esriDefault&multipatchOption=xyFootprint&applyVCSProjection=false&returnIdsOnly=false&returnUniqueIdsOnly=false&returnCountOnly=false&returnExtentOnly=false&returnQueryGeometry=false&returnDistinctValues=false&cacheHint=false&orderByFields=date_epicrv+DESC&resultRecordCount=1&returnZ=false&returnM=false&returnExceededLimitFeatures=false&sqlFormat=none&f=pjson";

#[derive(Debug, Deserialize, Clone)]
pub struct SituationServiceConfig {
    pub host: String,
}

impl Default for SituationServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
        }
    }
}

/// Fetches the latest cumulative figures for a country from the feature service.
///
/// Every call performs exactly one GET. Failures of any kind are logged and
/// reported to the caller as `None`.
#[derive(Clone)]
pub struct SituationClient {
    http: Arc<dyn HttpGet>,
    config: SituationServiceConfig,
}

impl SituationClient {
    pub fn new(http: Arc<dyn HttpGet>, config: SituationServiceConfig) -> Self {
        Self { http, config }
    }

    pub fn situation_url(&self, iso_code: &IsoCode) -> anyhow::Result<Url> {
        let host = self.config.host.trim_end_matches('/');
        let url = format!("{host}{QUERY_PATH}?where=ISO_2_CODE+%3D+%27{iso_code}%27+&{QUERY_TAIL}");
        Url::parse(&url).with_context(|| format!("Failed to parse url {url}"))
    }

    #[tracing::instrument(skip(self), level = "info")]
    pub async fn fetch_situation(&self, country: &Country) -> Option<Situation> {
        match self.try_fetch_situation(country).await {
            Ok(situation) => Some(situation),
            Err(err) => {
                tracing::warn!("No situation available for {}: {err:?}", country.iso_code);
                None
            }
        }
    }

    async fn try_fetch_situation(&self, country: &Country) -> anyhow::Result<Situation> {
        let url = self.situation_url(&country.iso_code)?;
        let body = self.http.get_bytes(url).await?;
        parse_situation(&body).context("Failed to decode situation response")
    }

    /// Fetches in the background and runs `completion` exactly once on the main loop.
    ///
    /// Nothing is cancelled or superseded: an older request that finishes late
    /// still delivers its result.
    pub fn request_situation<S, F>(
        &self,
        country: Country,
        main_context: MainContext<S>,
        completion: F,
    ) where
        S: 'static,
        F: FnOnce(&mut S, Option<Situation>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let situation = client.fetch_situation(&country).await;
            if main_context
                .dispatch(move |state| completion(state, situation))
                .is_err()
            {
                tracing::debug!(
                    "Main loop stopped before the situation for {} arrived",
                    country.iso_code
                );
            }
        });
    }
}
