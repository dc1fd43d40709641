use crate::config::SiteConfig;
use crate::pdf::PdfConverter;
use crate::storage::SiteRepository;
use crate::urls::Urls;
use std::sync::Arc;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn SiteRepository>,
    pub site: Arc<SiteConfig>,
    pub pdf: Option<Arc<dyn PdfConverter>>,
}

impl AppState {
    pub fn new(repository: Arc<dyn SiteRepository>, site: SiteConfig) -> Self {
        Self {
            repository,
            site: Arc::new(site),
            pdf: None,
        }
    }

    pub fn with_pdf_converter(mut self, converter: Arc<dyn PdfConverter>) -> Self {
        self.pdf = Some(converter);
        self
    }

    pub fn default_locale(&self) -> &str {
        &self.site.default_locale
    }

    pub fn urls(&self, locale: &str) -> Urls {
        Urls::new(locale, self.default_locale())
    }
}
