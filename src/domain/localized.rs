//! Multi-locale text fields.
//!
//! Descriptions are stored either as a locale-keyed map
//! (`{"de": "...", "en": "..."}`) or, on older rows, as a plain string.
//! Exports write a never-filled field as `[]` and may carry `null` per locale;
//! both read as missing.

use crate::constants::FALLBACK_LOCALE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// Legacy single-language value; resolves to itself for every locale.
    Plain(String),
    /// Locale code to text; `null` entries are missing.
    Localized(BTreeMap<String, Option<String>>),
    /// Empty JSON array.
    Empty([(); 0]),
}

impl LocalizedText {
    pub fn is_empty(&self) -> bool {
        match self {
            LocalizedText::Plain(text) => text.is_empty(),
            LocalizedText::Localized(map) => map.is_empty(),
            LocalizedText::Empty(_) => true,
        }
    }

    /// Resolves the text for `requested`, falling back to the fixed fallback locale.
    pub fn resolve(&self, requested: &str) -> Option<&str> {
        self.resolve_with_fallback(requested, FALLBACK_LOCALE)
    }

    /// Resolution order: requested locale, then `fallback`, then absent.
    /// Empty strings count as missing at both tiers.
    pub fn resolve_with_fallback(&self, requested: &str, fallback: &str) -> Option<&str> {
        if self.is_empty() {
            return None;
        }

        match self {
            LocalizedText::Plain(text) => Some(text.as_str()),
            LocalizedText::Localized(map) => non_empty(map.get(requested))
                .or_else(|| non_empty(map.get(fallback))),
            LocalizedText::Empty(_) => None,
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        LocalizedText::Plain(text.to_string())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for LocalizedText {
    fn from(entries: [(&str, &str); N]) -> Self {
        LocalizedText::Localized(
            entries
                .into_iter()
                .map(|(locale, text)| (locale.to_string(), Some(text.to_string())))
                .collect(),
        )
    }
}

fn non_empty(value: Option<&Option<String>>) -> Option<&str> {
    value
        .and_then(|text| text.as_deref())
        .filter(|text| !text.is_empty())
}

/// Resolves an optional field; an absent field is absent for every locale.
pub fn resolve<'a>(field: Option<&'a LocalizedText>, requested: &str) -> Option<&'a str> {
    field.and_then(|text| text.resolve(requested))
}
