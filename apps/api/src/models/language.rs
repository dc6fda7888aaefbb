use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of languages a portfolio can be authored in.
///
/// Serialized as the public language code ("en", "zh", "zh-TW", "ja") in
/// JSON bodies, query strings, and the store's `language` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh")]
    Zh,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "ja")]
    Ja,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Zh, Language::ZhTw, Language::Ja];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::ZhTw => "zh-TW",
            Language::Ja => "ja",
        }
    }

    /// Human-readable label, used as the translation target in AI prompts.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "简体中文 (Simplified Chinese)",
            Language::ZhTw => "繁體中文 (Traditional Chinese)",
            Language::Ja => "日本語 (Japanese)",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.iter().copied().find(|l| l.code() == code)
    }

    /// Every supported language except `self` — the sync target set.
    pub fn others(self) -> impl Iterator<Item = Language> {
        Language::ALL.into_iter().filter(move |l| *l != self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::ZhTw).unwrap(), "\"zh-TW\"");
        let parsed: Language = serde_json::from_str("\"ja\"").unwrap();
        assert_eq!(parsed, Language::Ja);
    }

    #[test]
    fn test_others_excludes_self() {
        let targets: Vec<Language> = Language::En.others().collect();
        assert_eq!(targets.len(), 3);
        assert!(!targets.contains(&Language::En));
    }
}
