use wordwise_types::{AUTO_DETECT, Language};

const AUTO_DETECT_NAME: &str = "Detect language";

const BUILTIN_LANGUAGES: [(&str, &str); 12] = [
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
];

/// Static list of selectable languages, loaded once per session
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::new(
            BUILTIN_LANGUAGES
                .iter()
                .map(|(code, name)| Language::new(*code, *name))
                .collect(),
        )
    }
}

impl LanguageCatalog {
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Case-insensitive substring match on display names, catalog order kept.
    pub fn filter(&self, query: &str) -> Vec<&Language> {
        let needle = query.to_lowercase();
        self.languages
            .iter()
            .filter(|lang| lang.display_name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Display name for `code`, or the code itself when it is unknown.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        if code == AUTO_DETECT {
            return AUTO_DETECT_NAME;
        }
        self.get(code)
            .map(|lang| lang.display_name.as_str())
            .unwrap_or(code)
    }
}
