use crate::domain::Place;

/// Builds in-site links for one request locale. Links carry `?lang=` only
/// when the locale differs from the site default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urls {
    locale: String,
    default_locale: String,
}

impl Urls {
    pub fn new(locale: impl Into<String>, default_locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            default_locale: default_locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    fn with_lang(&self, path: String) -> String {
        if self.locale == self.default_locale {
            path
        } else {
            format!("{}?lang={}", path, self.locale)
        }
    }

    pub fn home(&self) -> String {
        self.with_lang("/".to_string())
    }

    pub fn about(&self) -> String {
        self.with_lang("/about".to_string())
    }

    pub fn site_index(&self) -> String {
        self.with_lang("/site".to_string())
    }

    pub fn site_map(&self) -> String {
        self.with_lang("/site/map".to_string())
    }

    pub fn site(&self, id: i64) -> String {
        self.with_lang(format!("/site/{}", id))
    }

    pub fn site_jsonld(&self, id: i64) -> String {
        self.with_lang(format!("/site/{}.jsonld", id))
    }

    pub fn site_pdf(&self, id: i64) -> String {
        self.with_lang(format!("/site/{}.pdf", id))
    }

    /// Place detail; by TGN id when the place has one.
    pub fn place(&self, place: &Place) -> String {
        match place.tgn.as_deref().filter(|tgn| !tgn.is_empty()) {
            Some(tgn) => self.with_lang(format!("/place/tgn/{}", tgn)),
            None => self.with_lang(format!("/place/{}", place.id)),
        }
    }

    /// The same page in another locale. `query` pairs are carried over with
    /// their values percent-encoded; empty values and `lang` are dropped.
    pub fn switch_locale(&self, path: &str, query: &[(&str, String)], locale: &str) -> String {
        let mut pairs: Vec<String> = query
            .iter()
            .filter(|(key, value)| *key != "lang" && !value.is_empty())
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();
        if locale != self.default_locale {
            pairs.push(format!("lang={}", locale));
        }

        if pairs.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, pairs.join("&"))
        }
    }
}
