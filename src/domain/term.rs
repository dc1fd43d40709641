use crate::constants::STATUS_REMOVED;
use serde::{Deserialize, Serialize};

/// Controlled-vocabulary categories. Rows with any other category are kept as
/// `Other` so a dataset with extra vocabularies still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TermCategory {
    Type,
    RoleActor,
    Condition,
    Education,
    #[serde(other)]
    Other,
}

impl TermCategory {
    /// Categories a site's type references may point into.
    pub const SITE_VOCABULARIES: [TermCategory; 4] = [
        TermCategory::Type,
        TermCategory::RoleActor,
        TermCategory::Condition,
        TermCategory::Education,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: i64,
    pub category: TermCategory,
    #[serde(default)]
    pub status: i32,
    pub name: String,
}

impl Term {
    pub fn is_removed(&self) -> bool {
        self.status == STATUS_REMOVED
    }
}
