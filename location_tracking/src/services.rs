use serde::Deserialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    NotDetermined,
    Restricted,
    Denied,
    AuthorizedAlways,
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    pub fn is_determined(&self) -> bool {
        !matches!(self, AuthorizationStatus::NotDetermined)
    }

    pub fn is_refused(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted
        )
    }
}

/// The device's location subsystem.
pub trait LocationServices: Send + Sync {
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Shows the when-in-use permission prompt.
    fn request_when_in_use_authorization(&self);

    fn start_monitoring_significant_location_changes(&self);
}
