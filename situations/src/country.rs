use shared_kernel::non_empty_string;
use thiserror::Error;

non_empty_string!(CountryName);

/// ISO 3166-1 alpha-2 code, always two uppercase ASCII letters.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct IsoCode(String);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CountryError {
    #[error("{0:?} is not a two letter ISO country code")]
    InvalidIsoCode(String),
    #[error("Country name cannot be empty")]
    EmptyName,
}

impl IsoCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for IsoCode {
    type Error = CountryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.len() != 2 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CountryError::InvalidIsoCode(value.to_owned()));
        }
        Ok(IsoCode(value.to_ascii_uppercase()))
    }
}

impl std::fmt::Display for IsoCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Country {
    pub name: CountryName,
    pub iso_code: IsoCode,
}

impl Country {
    pub fn new(name: &str, iso_code: &str) -> Result<Self, CountryError> {
        let iso_code = IsoCode::try_from(iso_code)?;
        let name = CountryName::try_from(name).map_err(|_| CountryError::EmptyName)?;
        Ok(Country { name, iso_code })
    }
}

#[cfg(test)]
mod tests {
    use super::{Country, CountryError, IsoCode};
    use rstest::rstest;

    #[rstest]
    #[case("US", "US")]
    #[case("fr", "FR")]
    #[case(" nl ", "NL")]
    fn test_valid_iso_codes_are_uppercased(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(IsoCode::try_from(input).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("USA")]
    #[case("U")]
    #[case("1A")]
    fn test_invalid_iso_codes_are_rejected(#[case] input: &str) {
        assert!(matches!(
            IsoCode::try_from(input),
            Err(CountryError::InvalidIsoCode(_))
        ));
    }

    #[test]
    fn test_country_requires_a_name() {
        assert_eq!(Country::new("  ", "US"), Err(CountryError::EmptyName));
        let country = Country::new("US of A", "US").unwrap();
        assert_eq!(country.name.as_ref(), "US of A");
        assert_eq!(country.iso_code.to_string(), "US");
    }
}
