//! Map markers for the site detail page.
//!
//! Markers are keyed by `"lat,lon"` and, within a marker, entries are grouped
//! by the role the place plays for the site. Both levels keep encounter order.

use crate::domain::{Place, Site};
use crate::geo::{GeoPoint, Locatable};
use crate::urls::Urls;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// The role a place plays for a site. Each role owns its group, icon and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceRole {
    Location,
}

impl PlaceRole {
    pub fn label(&self) -> &'static str {
        match self {
            PlaceRole::Location => "Location",
        }
    }

    pub fn group(&self) -> &'static str {
        match self {
            PlaceRole::Location => "birthDeath",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PlaceRole::Location => "violetIcon",
        }
    }

    /// Popup entry for `place`; `None` when there is nothing to show.
    pub fn entry(&self, place: &Place, urls: &Urls) -> Option<MarkerEntry> {
        match self {
            PlaceRole::Location => {
                if place.name.trim().is_empty() {
                    return None;
                }
                Some(MarkerEntry {
                    icon: self.icon(),
                    html: format!(
                        "<b>{}</b>: <a href=\"{}\">{}</a>",
                        self.label(),
                        html_escape::encode_quoted_attribute(&urls.place(place)),
                        html_escape::encode_quoted_attribute(&place.name),
                    ),
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerEntry {
    pub icon: &'static str,
    pub html: String,
}

/// Place details shipped with a marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPlace {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tgn: Option<String>,
    pub geo: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub place: MarkerPlace,
    pub point: GeoPoint,
    grouped_entries: Vec<(&'static str, Vec<MarkerEntry>)>,
}

impl Marker {
    pub fn group(&self, group: &str) -> Option<&[MarkerEntry]> {
        self.grouped_entries
            .iter()
            .find(|(name, _)| *name == group)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn groups(&self) -> impl Iterator<Item = (&'static str, &[MarkerEntry])> + '_ {
        self.grouped_entries
            .iter()
            .map(|(name, entries)| (*name, entries.as_slice()))
    }

    fn push(&mut self, group: &'static str, entry: MarkerEntry) {
        match self.grouped_entries.iter_mut().find(|(name, _)| *name == group) {
            Some((_, entries)) => entries.push(entry),
            None => self.grouped_entries.push((group, vec![entry])),
        }
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Groups<'a>(&'a [(&'static str, Vec<MarkerEntry>)]);

        impl Serialize for Groups<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (group, entries) in self.0 {
                    map.serialize_entry(group, entries)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("place", &self.place)?;
        map.serialize_entry("groupedEntries", &Groups(&self.grouped_entries))?;
        map.end()
    }
}

/// Markers in encounter order, addressable by geo key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapMarkers {
    markers: Vec<(String, Marker)>,
}

impl MapMarkers {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, geo: &str) -> Option<&Marker> {
        self.markers
            .iter()
            .find(|(key, _)| key == geo)
            .map(|(_, marker)| marker)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Marker)> {
        self.markers.iter().map(|(key, marker)| (key.as_str(), marker))
    }

    /// Files `entry` under the place's geo key and `group`.
    fn add(&mut self, place: &Place, point: GeoPoint, group: &'static str, entry: MarkerEntry) {
        let geo = point.to_string();
        let index = match self.markers.iter().position(|(key, _)| *key == geo) {
            Some(index) => index,
            None => {
                self.markers.push((
                    geo.clone(),
                    Marker {
                        place: MarkerPlace {
                            id: place.id,
                            name: place.name.clone(),
                            tgn: place.tgn.clone(),
                            geo,
                        },
                        point,
                        grouped_entries: Vec::new(),
                    },
                ));
                self.markers.len() - 1
            }
        };
        self.markers[index].1.push(group, entry);
    }
}

impl Serialize for MapMarkers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.markers.len()))?;
        for (geo, marker) in &self.markers {
            map.serialize_entry(geo, marker)?;
        }
        map.end()
    }
}

/// Places attached to the site, with the role each plays.
fn candidate_places(site: &Site) -> Vec<(PlaceRole, &Place)> {
    site.location
        .iter()
        .map(|place| (PlaceRole::Location, place))
        .collect()
}

/// Builds the detail-page markers for `site`, linking places through `urls`.
/// Places without coordinates are skipped.
pub fn build_map_markers(site: &Site, urls: &Urls) -> MapMarkers {
    let mut markers = MapMarkers::default();

    for (role, place) in candidate_places(site) {
        let Some(point) = place.coordinates() else {
            continue;
        };
        let Some(entry) = role.entry(place, urls) else {
            continue;
        };
        markers.add(place, point, role.group(), entry);
    }

    markers
}
