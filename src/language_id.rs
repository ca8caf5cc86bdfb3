use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::errors::TranslateError;

/// Language identity for document runs
///
/// This module maps the language codes spoken by the translation backend to
/// the language tags the document format records on a run (the `lang`
/// attribute of a run's properties). The mapping is fixed and exhaustive over
/// the codes the document format can represent. Codes the format cannot
/// represent are rejected, never approximated:
///   - Azerbaijani (az)
///   - Persian (fa)
///   - Dari (fa-AF)
///   - Tagalog (tl)
/// Document-native language identifier carried on a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Afrikaans,
    Albanian,
    Amharic,
    Arabic,
    Bengali,
    Bosnian,
    BrazilianPortuguese,
    Bulgarian,
    ChineseHongKong,
    ChineseSingapore,
    Croatian,
    Czech,
    Danish,
    Dutch,
    EnglishUs,
    Estonian,
    Finnish,
    French,
    FrenchCanadian,
    Georgian,
    German,
    Greek,
    Hausa,
    Hebrew,
    Hindi,
    Hungarian,
    Indonesian,
    Italian,
    Japanese,
    Korean,
    Latvian,
    Malaysian,
    NorwegianBokmal,
    Pashto,
    Polish,
    Romanian,
    Russian,
    SerbianLatin,
    Slovak,
    Slovenian,
    Somali,
    Spanish,
    Swahili,
    Swedish,
    Tamil,
    Thai,
    Turkish,
    Ukrainian,
    Urdu,
    Vietnamese,
}

// Translation-service code -> document language identifier. The zh pairings
// look odd but are what decks produced by the upstream service carry:
// zh maps to Simplified via Singapore, zh-TW to Traditional via Hong Kong.
static LANGUAGE_CODE_TO_LANGUAGE_ID: Lazy<HashMap<&'static str, LanguageId>> = Lazy::new(|| {
    HashMap::from([
        ("af", LanguageId::Afrikaans),
        ("am", LanguageId::Amharic),
        ("ar", LanguageId::Arabic),
        ("bg", LanguageId::Bulgarian),
        ("bn", LanguageId::Bengali),
        ("bs", LanguageId::Bosnian),
        ("cs", LanguageId::Czech),
        ("da", LanguageId::Danish),
        ("de", LanguageId::German),
        ("el", LanguageId::Greek),
        ("en", LanguageId::EnglishUs),
        ("es", LanguageId::Spanish),
        ("et", LanguageId::Estonian),
        ("fi", LanguageId::Finnish),
        ("fr", LanguageId::French),
        ("fr-CA", LanguageId::FrenchCanadian),
        ("ha", LanguageId::Hausa),
        ("he", LanguageId::Hebrew),
        ("hi", LanguageId::Hindi),
        ("hr", LanguageId::Croatian),
        ("hu", LanguageId::Hungarian),
        ("id", LanguageId::Indonesian),
        ("it", LanguageId::Italian),
        ("ja", LanguageId::Japanese),
        ("ka", LanguageId::Georgian),
        ("ko", LanguageId::Korean),
        ("lv", LanguageId::Latvian),
        ("ms", LanguageId::Malaysian),
        ("nl", LanguageId::Dutch),
        ("no", LanguageId::NorwegianBokmal),
        ("pl", LanguageId::Polish),
        ("ps", LanguageId::Pashto),
        ("pt", LanguageId::BrazilianPortuguese),
        ("ro", LanguageId::Romanian),
        ("ru", LanguageId::Russian),
        ("sk", LanguageId::Slovak),
        ("sl", LanguageId::Slovenian),
        ("so", LanguageId::Somali),
        ("sq", LanguageId::Albanian),
        ("sr", LanguageId::SerbianLatin),
        ("sv", LanguageId::Swedish),
        ("sw", LanguageId::Swahili),
        ("ta", LanguageId::Tamil),
        ("th", LanguageId::Thai),
        ("tr", LanguageId::Turkish),
        ("uk", LanguageId::Ukrainian),
        ("ur", LanguageId::Urdu),
        ("vi", LanguageId::Vietnamese),
        ("zh", LanguageId::ChineseSingapore),
        ("zh-TW", LanguageId::ChineseHongKong),
    ])
});

impl LanguageId {
    /// Resolve a translation-service language code to its document identifier
    ///
    /// Fails with `TranslateError::UnsupportedLanguage` when the code has no
    /// mapping, which covers both unknown codes and the explicitly excluded
    /// ones listed in the module docs.
    pub fn resolve(code: &str) -> Result<Self, TranslateError> {
        LANGUAGE_CODE_TO_LANGUAGE_ID
            .get(code.trim())
            .copied()
            .ok_or_else(|| TranslateError::UnsupportedLanguage(code.to_string()))
    }

    /// The `lang` attribute value written into the document XML
    pub fn ooxml_tag(&self) -> &'static str {
        match self {
            Self::Afrikaans => "af-ZA",
            Self::Albanian => "sq-AL",
            Self::Amharic => "am-ET",
            Self::Arabic => "ar-SA",
            Self::Bengali => "bn-IN",
            Self::Bosnian => "bs-BA",
            Self::BrazilianPortuguese => "pt-BR",
            Self::Bulgarian => "bg-BG",
            Self::ChineseHongKong => "zh-HK",
            Self::ChineseSingapore => "zh-SG",
            Self::Croatian => "hr-HR",
            Self::Czech => "cs-CZ",
            Self::Danish => "da-DK",
            Self::Dutch => "nl-NL",
            Self::EnglishUs => "en-US",
            Self::Estonian => "et-EE",
            Self::Finnish => "fi-FI",
            Self::French => "fr-FR",
            Self::FrenchCanadian => "fr-CA",
            Self::Georgian => "ka-GE",
            Self::German => "de-DE",
            Self::Greek => "el-GR",
            Self::Hausa => "ha-Latn-NG",
            Self::Hebrew => "he-IL",
            Self::Hindi => "hi-IN",
            Self::Hungarian => "hu-HU",
            Self::Indonesian => "id-ID",
            Self::Italian => "it-IT",
            Self::Japanese => "ja-JP",
            Self::Korean => "ko-KR",
            Self::Latvian => "lv-LV",
            Self::Malaysian => "ms-MY",
            Self::NorwegianBokmal => "nb-NO",
            Self::Pashto => "ps-AF",
            Self::Polish => "pl-PL",
            Self::Romanian => "ro-RO",
            Self::Russian => "ru-RU",
            Self::SerbianLatin => "sr-Latn-RS",
            Self::Slovak => "sk-SK",
            Self::Slovenian => "sl-SI",
            Self::Somali => "so-SO",
            Self::Spanish => "es-ES",
            Self::Swahili => "sw-KE",
            Self::Swedish => "sv-SE",
            Self::Tamil => "ta-IN",
            Self::Thai => "th-TH",
            Self::Turkish => "tr-TR",
            Self::Ukrainian => "uk-UA",
            Self::Urdu => "ur-PK",
            Self::Vietnamese => "vi-VN",
        }
    }

    /// Reverse lookup from a document `lang` attribute value
    pub fn from_ooxml_tag(tag: &str) -> Option<Self> {
        LANGUAGE_CODE_TO_LANGUAGE_ID
            .values()
            .find(|id| id.ooxml_tag().eq_ignore_ascii_case(tag))
            .copied()
    }

    /// All translation-service codes the registry accepts
    pub fn supported_codes() -> impl Iterator<Item = &'static str> {
        LANGUAGE_CODE_TO_LANGUAGE_ID.keys().copied()
    }

    /// Whether a translation-service code has a document mapping
    pub fn is_supported(code: &str) -> bool {
        LANGUAGE_CODE_TO_LANGUAGE_ID.contains_key(code.trim())
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ooxml_tag())
    }
}

/// Human-readable name for a translation-service code, for log lines
///
/// Falls back to the code itself when the code carries a region subtag or is
/// otherwise unknown to the ISO tables.
pub fn display_name(code: &str) -> String {
    let trimmed = code.trim();
    isolang::Language::from_639_1(trimmed)
        .map(|lang| lang.to_name().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
