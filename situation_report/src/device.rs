use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use location_tracking::{AuthorizationStatus, Location, LocationServices};

use crate::configuration::DeviceSettings;

/// Location services backed by configuration instead of hardware.
pub struct ConfiguredDevice {
    settings: DeviceSettings,
    status: Mutex<AuthorizationStatus>,
    prompted: AtomicBool,
    monitoring: AtomicBool,
}

impl ConfiguredDevice {
    pub fn new(settings: DeviceSettings) -> Self {
        Self {
            status: Mutex::new(settings.authorization),
            settings,
            prompted: AtomicBool::new(false),
            monitoring: AtomicBool::new(false),
        }
    }

    /// Resolves a pending permission prompt with the configured answer.
    pub fn answer_prompt(&self) -> Option<AuthorizationStatus> {
        if !self.prompted.swap(false, Ordering::SeqCst) {
            return None;
        }
        let answer = self.settings.prompt_response;
        if let Ok(mut status) = self.status.lock() {
            *status = answer;
        }
        Some(answer)
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst)
    }

    /// Monitoring only reports positions when the user allowed it.
    pub fn significant_location_change(&self) -> Option<Location> {
        let authorized = matches!(
            self.authorization_status(),
            AuthorizationStatus::AuthorizedWhenInUse | AuthorizationStatus::AuthorizedAlways
        );
        (self.is_monitoring() && authorized)
            .then(|| Location::new(self.settings.latitude, self.settings.longitude))
    }
}

impl LocationServices for ConfiguredDevice {
    fn authorization_status(&self) -> AuthorizationStatus {
        self.status
            .lock()
            .map(|status| *status)
            .unwrap_or(AuthorizationStatus::NotDetermined)
    }

    fn request_when_in_use_authorization(&self) {
        tracing::info!("Asking for when in use location permission");
        self.prompted.store(true, Ordering::SeqCst);
    }

    fn start_monitoring_significant_location_changes(&self) {
        tracing::info!("Monitoring significant location changes");
        self.monitoring.store(true, Ordering::SeqCst);
    }
}
