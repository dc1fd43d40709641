//! Locale, status and vocabulary constants shared across the codebase

// Locales
pub const DEFAULT_LOCALE: &str = "de";
pub const FALLBACK_LOCALE: &str = "de";
pub const SUPPORTED_LOCALES: [&str; 2] = ["de", "en"];

// Record/term status codes
pub const STATUS_REMOVED: i32 = -1;
pub const STATUS_PUBLISHED: i32 = 1;

// JSON-LD
pub const SCHEMA_ORG_CONTEXT: &str = "http://schema.org";

// Listing
pub const DEFAULT_PAGE_SIZE: usize = 200;

/// Returns true when `locale` is one the site ships translations for
pub fn is_supported_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}
