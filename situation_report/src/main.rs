use std::sync::Arc;
use std::time::Duration;

use location_tracking::{HttpGeocoder, LocationManager};
use shared_kernel::http_client::HttpClient;
use shared_kernel::main_context::main_context;
use situation_report::configuration::Settings;
use situation_report::device::ConfiguredDevice;
use situation_report::report::SHARE_HINT;
use situation_report::{Page, SituationReport, SituationReportController};
use situations::SituationClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("situation_report")?;
    let result = start().await;
    shared_kernel::tracing::shutdown_global_tracer_provider();
    result
}

async fn start() -> anyhow::Result<()> {
    let settings = Settings::parse()?;

    let http = Arc::new(HttpClient);
    let client = SituationClient::new(http.clone(), settings.situation_service.clone());
    let geocoder = Arc::new(HttpGeocoder::new(http, settings.geocoding.clone()));
    let device = Arc::new(ConfiguredDevice::new(settings.device.clone()));
    let manager = LocationManager::new(device.clone(), geocoder);

    let (context, mut main_loop) = main_context::<SituationReport>();
    let mut report = SituationReport::new(settings.number_formatter());
    let controller = Arc::new(SituationReportController::new(client, context));
    let bridge = controller.observe(&manager);

    manager.request_location();
    if let Some(status) = device.answer_prompt() {
        manager.did_change_authorization(status);
    }

    let Some(location) = device.significant_location_change() else {
        tracing::info!("No location available, state {:?}", manager.state());
        bridge.abort();
        print_report(&report);
        return Ok(());
    };
    manager.did_update_locations(vec![location]);

    let deadline = tokio::time::sleep(Duration::from_secs(settings.report_timeout_seconds));
    tokio::pin!(deadline);
    let initial_revision = report.revision();
    loop {
        tokio::select! {
            running = main_loop.turn(&mut report) => {
                if !running {
                    break;
                }
                if report.revision() != initial_revision {
                    break;
                }
            }
            _ = &mut deadline => {
                tracing::warn!("Gave up waiting for a situation report");
                break;
            }
        }
    }
    bridge.abort();

    print_report(&report);
    Ok(())
}

fn print_report(report: &SituationReport) {
    println!("{}", report.title());
    for (index, page) in report.pages().iter().enumerate() {
        match page {
            Page::Introduction { text } => println!("[{}] {text}", index + 1),
            Page::CountrySituation(view_model) => {
                println!("[{}] {}", index + 1, view_model.title_text);
                println!("    {} {}", view_model.cases_number_text, view_model.cases_title_text);
                println!("    {}", view_model.deaths_text);
            }
        }
    }
    if let Some(payload) = report.share_payload(1) {
        println!("{SHARE_HINT}");
        println!("    {}", payload.text);
        println!("    {}", payload.url);
    }
}
