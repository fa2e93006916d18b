use std::sync::Arc;

use location_tracking::LocationManager;
use shared_kernel::main_context::MainContext;
use situations::{Country, SituationClient};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::report::SituationReport;

/// Wires country updates to situation fetches and applies the results on the
/// main loop.
pub struct SituationReportController {
    client: SituationClient,
    main_context: MainContext<SituationReport>,
}

impl SituationReportController {
    pub fn new(client: SituationClient, main_context: MainContext<SituationReport>) -> Self {
        Self {
            client,
            main_context,
        }
    }

    /// `None` clears the report at once. A country always triggers a fresh
    /// fetch; in-flight fetches for earlier countries are left to finish.
    pub fn configure_for_country(&self, report: &mut SituationReport, country: Option<Country>) {
        let Some(country) = country else {
            return report.clear();
        };

        let fetched_for = country.clone();
        self.client
            .request_situation(country, self.main_context.clone(), move |report, situation| {
                report.apply_situation(fetched_for, situation)
            });
    }

    /// Forwards every update published by `manager` onto the main loop.
    pub fn observe(self: &Arc<Self>, manager: &LocationManager) -> JoinHandle<()> {
        let mut updates = manager.subscribe();
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let country = match updates.recv().await {
                    Ok(country) => country,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Skipped {skipped} country updates");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                let handler = Arc::clone(&controller);
                let dispatched = controller
                    .main_context
                    .dispatch(move |report| handler.configure_for_country(report, country));
                if dispatched.is_err() {
                    break;
                }
            }
        })
    }
}
