use serde::{Deserialize, Serialize};

/// Languages offered for narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Hindi,
    Chinese,
    Japanese,
}

impl Language {
    pub const fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Spanish,
            Language::French,
            Language::German,
            Language::Hindi,
            Language::Chinese,
            Language::Japanese,
        ]
    }

    /// Display name, exactly as offered in the language picker.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Hindi => "Hindi",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
        }
    }

    /// Code understood by the translation and speech services.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Hindi => "hi",
            Language::Chinese => "zh-cn",
            Language::Japanese => "ja",
        }
    }

    /// Look up a language by display name. Unknown names fall back to
    /// English without signalling anything.
    pub fn from_name(name: &str) -> Language {
        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.name() == name)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Language code for a display name, `"en"` when the name is not in the table.
pub fn code_for(name: &str) -> &'static str {
    Language::from_name(name).code()
}
