use crate::domain::Site;
use crate::geo::Locatable;
use crate::urls::Urls;
use serde::Serialize;

/// One point on the overview map: `[lat, lon, labelHtml, linked]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFeedEntry(pub f64, pub f64, pub String, pub bool);

impl MapFeedEntry {
    pub fn is_linked(&self) -> bool {
        self.3
    }

    pub fn label_html(&self) -> &str {
        &self.2
    }
}

/// Map points for listing results. Sites without coordinates are left out;
/// only published sites get a link to their detail page.
pub fn build_map_feed(sites: &[Site], locale: &str, urls: &Urls) -> Vec<MapFeedEntry> {
    sites
        .iter()
        .filter(|site| !site.is_removed())
        .filter_map(|site| {
            let point = site.coordinates()?;
            let name = html_escape::encode_double_quoted_attribute(site.localized_name(locale));
            let linked = site.is_published();
            let label = if linked {
                format!("<a href=\"{}\">{}</a>", urls.site(site.id), name)
            } else {
                name.into_owned()
            };
            Some(MapFeedEntry(point.lat, point.lon, label, linked))
        })
        .collect()
}
