use situations::{Country, CountrySituationViewModel, NumberFormatter, Situation};
use url::Url;

pub const REPORT_TITLE: &str = "Latest Situation Reports";
pub const INTRODUCTION_TEXT: &str = "Swipe right to continue";
pub const SHARE_HINT: &str = "Share on social media.";
const COUNTRY_PAGE_BASE_URL: &str = "https://covid19.who.int/region/emro/country/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Introduction { text: String },
    CountrySituation(CountrySituationViewModel),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharePayload {
    pub text: String,
    pub url: Url,
}

/// What the report screen shows.
///
/// Only ever touched from the main loop. The country and situation are
/// always stored together as delivered by one fetch.
#[derive(Debug)]
pub struct SituationReport {
    formatter: NumberFormatter,
    country: Option<Country>,
    situation: Option<Situation>,
    view_model: Option<CountrySituationViewModel>,
    revision: u64,
}

impl SituationReport {
    pub fn new(formatter: NumberFormatter) -> Self {
        Self {
            formatter,
            country: None,
            situation: None,
            view_model: None,
            revision: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        REPORT_TITLE
    }

    pub fn country(&self) -> Option<&Country> {
        self.country.as_ref()
    }

    pub fn situation(&self) -> Option<&Situation> {
        self.situation.as_ref()
    }

    pub fn view_model(&self) -> Option<&CountrySituationViewModel> {
        self.view_model.as_ref()
    }

    /// Bumped on every change so observers can tell a fresh render is due.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn number_of_pages(&self) -> usize {
        match self.view_model {
            Some(_) => 2,
            None => 1,
        }
    }

    pub fn pages(&self) -> Vec<Page> {
        let introduction = Page::Introduction {
            text: INTRODUCTION_TEXT.to_owned(),
        };
        match &self.view_model {
            Some(view_model) => vec![introduction, Page::CountrySituation(view_model.clone())],
            None => vec![introduction],
        }
    }

    pub fn clear(&mut self) {
        self.country = None;
        self.situation = None;
        self.view_model = None;
        self.revision += 1;
    }

    pub fn apply_situation(&mut self, country: Country, situation: Option<Situation>) {
        self.view_model =
            CountrySituationViewModel::new(Some(&country), situation.as_ref(), &self.formatter);
        self.country = Some(country);
        self.situation = situation;
        self.revision += 1;
    }

    /// Only the country page can be shared.
    pub fn share_payload(&self, page: usize) -> Option<SharePayload> {
        if page != 1 {
            return None;
        }
        let view_model = self.view_model.as_ref()?;
        let country = self.country.as_ref()?;
        let url = Url::parse(COUNTRY_PAGE_BASE_URL)
            .and_then(|base| base.join(country.iso_code.as_str()))
            .ok()?;
        Some(SharePayload {
            text: view_model.sentence_text.clone(),
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, SituationReport, INTRODUCTION_TEXT};
    use situations::{Country, NumberFormatter, Situation};

    fn situation() -> Situation {
        Situation {
            cumulative_cases: 1837803,
            cumulative_deaths: 106876,
        }
    }

    fn us() -> Country {
        Country::new("US of A", "US").unwrap()
    }

    #[test]
    fn test_a_new_report_only_has_the_introduction() {
        let report = SituationReport::new(NumberFormatter::default());
        assert_eq!(report.number_of_pages(), 1);
        assert_eq!(
            report.pages(),
            vec![Page::Introduction {
                text: INTRODUCTION_TEXT.to_owned()
            }]
        );
        assert_eq!(report.share_payload(1), None);
    }

    #[test]
    fn test_a_situation_adds_the_country_page() {
        let mut report = SituationReport::new(NumberFormatter::default());
        report.apply_situation(us(), Some(situation()));

        assert_eq!(report.number_of_pages(), 2);
        match &report.pages()[1] {
            Page::CountrySituation(view_model) => {
                assert_eq!(view_model.title_text, "US's Situation in Numbers");
                assert_eq!(view_model.cases_number_text, "1,837,803");
            }
            page => panic!("unexpected page {page:?}"),
        }
    }

    #[test]
    fn test_a_missing_situation_keeps_a_single_page() {
        let mut report = SituationReport::new(NumberFormatter::default());
        report.apply_situation(us(), Some(situation()));
        report.apply_situation(us(), None);

        assert_eq!(report.number_of_pages(), 1);
        assert!(report.view_model().is_none());
        assert_eq!(report.country(), Some(&us()));
    }

    #[test]
    fn test_clearing_drops_everything() {
        let mut report = SituationReport::new(NumberFormatter::default());
        report.apply_situation(us(), Some(situation()));
        let revision = report.revision();

        report.clear();

        assert_eq!(report.number_of_pages(), 1);
        assert!(report.country().is_none());
        assert!(report.situation().is_none());
        assert!(report.revision() > revision);
    }

    #[test]
    fn test_share_payload_links_to_the_country_page() {
        let mut report = SituationReport::new(NumberFormatter::default());
        report.apply_situation(us(), Some(situation()));

        assert_eq!(report.share_payload(0), None);
        let payload = report.share_payload(1).unwrap();
        assert_eq!(
            payload.text,
            "US's Situation in Numbers 1,837,803 Confirmed Cases 106,876 Total Deaths."
        );
        assert_eq!(
            payload.url.as_str(),
            "https://covid19.who.int/region/emro/country/US"
        );
    }
}
