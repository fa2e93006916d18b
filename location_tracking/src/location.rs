use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            recorded_at: Utc::now(),
        }
    }

    /// The latest reading; on equal timestamps the later entry wins.
    pub fn most_recent(locations: &[Location]) -> Option<&Location> {
        locations
            .iter()
            .enumerate()
            .max_by_key(|(index, location)| (location.recorded_at, *index))
            .map(|(_, location)| location)
    }
}
