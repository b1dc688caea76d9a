use bantaba_types::{Language, LanguageCode};

const LANGUAGES: [Language; 5] = [
    Language {
        code: LanguageCode::En,
        name: "English",
        native_name: "English",
        flag: "🇬🇧",
        region: "International",
    },
    Language {
        code: LanguageCode::Mnk,
        name: "Mandinka",
        native_name: "Mandinka",
        flag: "🇬🇲",
        region: "Gambia, Senegal, Guinea",
    },
    Language {
        code: LanguageCode::Wo,
        name: "Wolof",
        native_name: "Wolof",
        flag: "🇸🇳",
        region: "Senegal, Gambia, Mauritania",
    },
    Language {
        code: LanguageCode::Dyo,
        name: "Jola",
        native_name: "Joola",
        flag: "🇸🇳",
        region: "Senegal, Gambia, Guinea-Bissau",
    },
    Language {
        code: LanguageCode::Ff,
        name: "Fula",
        native_name: "Fulfulde",
        flag: "🇬🇳",
        region: "West Africa",
    },
];

/// Static catalog of supported languages
pub struct LanguageRegistry;

impl LanguageRegistry {
    pub fn all() -> &'static [Language] {
        &LANGUAGES
    }

    pub fn lookup(code: LanguageCode) -> Option<&'static Language> {
        LANGUAGES.iter().find(|lang| lang.code == code)
    }

    /// Lookup by raw code, e.g. from a route parameter
    pub fn lookup_str(code: &str) -> Option<&'static Language> {
        code.parse().ok().and_then(Self::lookup)
    }

    /// Every language except the source language, in catalog order
    pub fn list_target_languages() -> Vec<&'static Language> {
        LANGUAGES
            .iter()
            .filter(|lang| !lang.code.is_source())
            .collect()
    }
}
