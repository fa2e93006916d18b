use crate::country::Country;
use crate::number_formatter::NumberFormatter;
use crate::situation::Situation;

pub const CASES_TITLE: &str = "Confirmed Cases";

/// Display strings for one country's situation page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CountrySituationViewModel {
    pub title_text: String,
    pub cases_number_text: String,
    pub cases_title_text: String,
    pub deaths_text: String,
    /// Everything above as one sentence, used for accessibility and sharing.
    pub sentence_text: String,
}

impl CountrySituationViewModel {
    /// Returns `None` unless both a country and its situation are present.
    pub fn new(
        country: Option<&Country>,
        situation: Option<&Situation>,
        formatter: &NumberFormatter,
    ) -> Option<Self> {
        let (country, situation) = country.zip(situation)?;

        let cases_number_text = formatter.format(situation.cumulative_cases);
        let deaths_formatted = formatter.format(situation.cumulative_deaths);

        let title_text = format!("{}'s Situation in Numbers", country.iso_code);
        let cases_title_text = CASES_TITLE.to_owned();
        let deaths_text = format!("{deaths_formatted} Total Deaths");
        let sentence_text =
            format!("{title_text} {cases_number_text} {cases_title_text} {deaths_text}.");

        Some(Self {
            title_text,
            cases_number_text,
            cases_title_text,
            deaths_text,
            sentence_text,
        })
    }
}
