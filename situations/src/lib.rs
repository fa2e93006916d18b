pub mod client;
pub mod country;
pub mod number_formatter;
pub mod situation;
pub mod view_model;

pub use client::{SituationClient, SituationServiceConfig};
pub use country::{Country, CountryName, IsoCode};
pub use number_formatter::NumberFormatter;
pub use situation::{parse_situation, Situation, SituationParseError};
pub use view_model::CountrySituationViewModel;
