pub mod configuration;
pub mod controller;
pub mod device;
pub mod report;

pub use controller::SituationReportController;
pub use report::{Page, SharePayload, SituationReport};
