use async_trait::async_trait;
use situations::Country;

use crate::location::Location;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placemark {
    pub country: Option<String>,
    pub iso_country_code: Option<String>,
}

impl Placemark {
    /// A country needs both the name and a valid two letter code.
    pub fn country(&self) -> Option<Country> {
        let name = self.country.as_deref()?;
        let iso_code = self.iso_country_code.as_deref()?;
        Country::new(name, iso_code).ok()
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse_geocode(&self, location: Location) -> anyhow::Result<Vec<Placemark>>;
}

#[cfg(test)]
mod tests {
    use super::Placemark;

    #[test]
    fn test_placemark_without_iso_code_has_no_country() {
        let placemark = Placemark {
            country: Some("United States".to_owned()),
            iso_country_code: None,
        };
        assert_eq!(placemark.country(), None);
    }

    #[test]
    fn test_placemark_with_invalid_iso_code_has_no_country() {
        let placemark = Placemark {
            country: Some("United States".to_owned()),
            iso_country_code: Some("USA".to_owned()),
        };
        assert_eq!(placemark.country(), None);
    }

    #[test]
    fn test_complete_placemark_has_a_country() {
        let placemark = Placemark {
            country: Some("US of A".to_owned()),
            iso_country_code: Some("US".to_owned()),
        };
        let country = placemark.country().unwrap();
        assert_eq!(country.name.as_ref(), "US of A");
        assert_eq!(country.iso_code.as_str(), "US");
    }
}
