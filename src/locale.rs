use serde::{Deserialize, Serialize};

/// Display language for item texts, labels and export headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    /// Pick the string for this locale.
    pub fn pick(self, en: &'static str, ja: &'static str) -> &'static str {
        match self {
            Locale::En => en,
            Locale::Ja => ja,
        }
    }
}
