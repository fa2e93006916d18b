use num_format::{CustomFormat, Grouping, Locale, ToFormattedString};

pub const DEFAULT_LOCALE: &str = "en";

/// Checked in order when no locale is configured.
const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

/// Formats counts with the separator of a locale, always grouping by three.
#[derive(Clone, Debug)]
pub struct NumberFormatter {
    locale: Locale,
    format: CustomFormat,
}

impl NumberFormatter {
    /// Unknown locale names fall back to [`DEFAULT_LOCALE`].
    pub fn for_locale(name: &str) -> Self {
        let locale = Locale::from_name(name).unwrap_or_else(|err| {
            tracing::warn!(
                locale = name,
                "Unknown locale, falling back to {DEFAULT_LOCALE}: {err}"
            );
            Locale::en
        });
        Self::new(locale)
    }

    /// Uses the process locale (`LC_ALL`, `LC_NUMERIC`, then `LANG`).
    pub fn from_environment() -> Self {
        let locale = LOCALE_VARIABLES
            .iter()
            .filter_map(|variable| std::env::var(variable).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| posix_locale(&value));
        match locale {
            Some(locale) => Self::new(locale),
            None => Self::for_locale(DEFAULT_LOCALE),
        }
    }

    pub fn new(locale: Locale) -> Self {
        let format = CustomFormat::builder()
            .grouping(Grouping::Standard)
            .separator(locale.separator())
            .minus_sign(locale.minus_sign())
            .build()
            .unwrap_or_else(|_| CustomFormat::default());
        Self { locale, format }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn format(&self, value: u64) -> String {
        value.to_formatted_string(&self.format)
    }
}

/// Maps a POSIX locale such as `de_DE.UTF-8` or `fr_FR@euro` to a
/// [`Locale`], trying the language alone when the region is unknown.
fn posix_locale(value: &str) -> Option<Locale> {
    let name = value.split(['.', '@']).next().unwrap_or_default();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    let name = name.replace('_', "-");
    Locale::from_name(&name).ok().or_else(|| {
        let language = name.split('-').next().unwrap_or_default();
        Locale::from_name(language).ok()
    })
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self::new(Locale::en)
    }
}

#[cfg(test)]
mod tests {
    use super::{posix_locale, NumberFormatter};
    use num_format::Locale;
    use rstest::rstest;

    #[rstest]
    #[case("en", 1837803, "1,837,803")]
    #[case("en", 106876, "106,876")]
    #[case("en", 999, "999")]
    #[case("en", 0, "0")]
    #[case("de", 1837803, "1.837.803")]
    fn test_counts_are_grouped_by_three(
        #[case] locale: &str,
        #[case] value: u64,
        #[case] expected: &str,
    ) {
        assert_eq!(NumberFormatter::for_locale(locale).format(value), expected);
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        let formatter = NumberFormatter::for_locale("not-a-locale");
        assert_eq!(formatter.locale(), Locale::en);
        assert_eq!(formatter.format(1234567), "1,234,567");
    }

    #[rstest]
    #[case("de_DE.UTF-8", Some("."))]
    #[case("it_IT@euro", Some("."))]
    #[case("en_GB.UTF-8", Some(","))]
    #[case("de_XX", Some("."))]
    #[case("C.UTF-8", None)]
    #[case("POSIX", None)]
    #[case("", None)]
    fn test_posix_locale_names_are_mapped(
        #[case] value: &str,
        #[case] expected_separator: Option<&str>,
    ) {
        let separator = posix_locale(value).map(|locale| locale.separator());
        assert_eq!(separator, expected_separator);
    }
}
