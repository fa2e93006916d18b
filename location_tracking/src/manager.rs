use std::sync::Arc;

use situations::Country;
use tokio::sync::{broadcast, watch};

use crate::geocoder::Geocoder;
use crate::location::Location;
use crate::services::{AuthorizationStatus, LocationServices};

const COUNTRY_UPDATES_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MonitoringState {
    Unrequested,
    PermissionRequested,
    Monitoring,
    Resolving,
    /// Permission was denied or restricted. Nothing more will be published.
    Idle,
}

/// Turns device locations into [`Country`] updates.
///
/// Every update is broadcast to all subscribers, including repeated values and
/// `None` when the country could not be determined.
pub struct LocationManager {
    services: Arc<dyn LocationServices>,
    geocoder: Arc<dyn Geocoder>,
    publisher: CountryPublisher,
    state: Arc<watch::Sender<MonitoringState>>,
}

#[derive(Clone)]
struct CountryPublisher {
    updates: broadcast::Sender<Option<Country>>,
    current: Arc<watch::Sender<Option<Country>>>,
}

impl CountryPublisher {
    fn publish(&self, country: Option<Country>) {
        tracing::info!(?country, "Current country changed");
        self.current.send_replace(country.clone());
        // Having nobody subscribed is fine.
        let _ = self.updates.send(country);
    }
}

impl LocationManager {
    pub fn new(services: Arc<dyn LocationServices>, geocoder: Arc<dyn Geocoder>) -> Self {
        let (updates, _) = broadcast::channel(COUNTRY_UPDATES_CAPACITY);
        let (current, _) = watch::channel(None);
        let (state, _) = watch::channel(MonitoringState::Unrequested);
        Self {
            services,
            geocoder,
            publisher: CountryPublisher {
                updates,
                current: Arc::new(current),
            },
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Option<Country>> {
        self.publisher.updates.subscribe()
    }

    pub fn current_country(&self) -> Option<Country> {
        self.publisher.current.borrow().clone()
    }

    pub fn state(&self) -> MonitoringState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<MonitoringState> {
        self.state.subscribe()
    }

    #[tracing::instrument(skip(self), level = "info")]
    pub fn request_location(&self) {
        let status = self.services.authorization_status();
        if status.is_determined() {
            self.start_monitoring(status);
        } else {
            self.services.request_when_in_use_authorization();
            self.state.send_replace(MonitoringState::PermissionRequested);
        }
    }

    #[tracing::instrument(skip(self), level = "info")]
    pub fn did_change_authorization(&self, status: AuthorizationStatus) {
        match status {
            AuthorizationStatus::AuthorizedWhenInUse => self.start_monitoring(status),
            status if status.is_refused() => {
                self.state.send_replace(MonitoringState::Idle);
            }
            _ => {}
        }
    }

    /// Resolves the most recent location on a background task, so it must be
    /// called from within a Tokio runtime. With no locations at all the
    /// country is cleared right away.
    pub fn did_update_locations(&self, locations: Vec<Location>) {
        if self.state() == MonitoringState::Idle {
            tracing::debug!("Ignoring location update while idle");
            return;
        }

        let Some(location) = Location::most_recent(&locations).copied() else {
            return self.publisher.publish(None);
        };

        self.state.send_if_modified(|state| {
            let monitoring = *state == MonitoringState::Monitoring;
            if monitoring {
                *state = MonitoringState::Resolving;
            }
            monitoring
        });

        let geocoder = self.geocoder.clone();
        let publisher = self.publisher.clone();
        let state = self.state.clone();
        tokio::spawn(async move {
            let country = match geocoder.reverse_geocode(location).await {
                Ok(placemarks) => placemarks.first().and_then(|placemark| placemark.country()),
                Err(err) => {
                    tracing::warn!("Reverse geocoding failed for {location:?}: {err:?}");
                    None
                }
            };
            publisher.publish(country);
            state.send_if_modified(|state| {
                let resolved = *state == MonitoringState::Resolving;
                if resolved {
                    *state = MonitoringState::Monitoring;
                }
                resolved
            });
        });
    }

    fn start_monitoring(&self, status: AuthorizationStatus) {
        self.services.start_monitoring_significant_location_changes();
        let state = if status.is_refused() {
            MonitoringState::Idle
        } else {
            MonitoringState::Monitoring
        };
        self.state.send_replace(state);
    }
}
