pub mod geocoder;
pub mod http_geocoder;
pub mod location;
pub mod manager;
pub mod services;

pub use geocoder::{Geocoder, Placemark};
pub use http_geocoder::{GeocodingConfig, HttpGeocoder};
pub use location::Location;
pub use manager::{LocationManager, MonitoringState};
pub use services::{AuthorizationStatus, LocationServices};
