//! The three explorable environments and their static display data.

use serde::Serialize;
use strum::{EnumIter, EnumString, IntoEnumIterator};

/// Identifier of one themed environment.
///
/// Parsing accepts the canonical names as well as the names used by the
/// first release of the app (`hutan`, `taman`, `pantai`), ignoring case.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumIter,
    EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum EnvironmentId {
    #[strum(to_string = "forest", serialize = "hutan")]
    Forest,
    #[strum(to_string = "park", serialize = "taman")]
    Park,
    #[strum(to_string = "beach", serialize = "pantai")]
    Beach,
}

impl EnvironmentId {
    /// Canonical storage/IPC name.
    pub fn as_str(self) -> &'static str {
        match self {
            EnvironmentId::Forest => "forest",
            EnvironmentId::Park => "park",
            EnvironmentId::Beach => "beach",
        }
    }

    /// Field name used by records written before the rename.
    pub fn legacy_name(self) -> &'static str {
        match self {
            EnvironmentId::Forest => "hutan",
            EnvironmentId::Park => "taman",
            EnvironmentId::Beach => "pantai",
        }
    }

    /// Lenient lookup for identifiers coming from the UI. Unknown names
    /// yield `None` rather than an error.
    pub fn lookup(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    pub fn all() -> impl Iterator<Item = EnvironmentId> {
        EnvironmentId::iter()
    }

    pub fn info(self) -> Environment {
        match self {
            EnvironmentId::Forest => Environment {
                id: self,
                title: "Forest",
                badge_name: "Forest Hero",
            },
            EnvironmentId::Park => Environment {
                id: self,
                title: "City Park",
                badge_name: "Park Keeper",
            },
            EnvironmentId::Beach => Environment {
                id: self,
                title: "Beach",
                badge_name: "Ocean Friend",
            },
        }
    }
}

/// Display data for a menu card or reward tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: EnvironmentId,
    pub title: &'static str,
    pub badge_name: &'static str,
}

/// All environments in menu order.
pub fn catalog() -> Vec<Environment> {
    EnvironmentId::all().map(EnvironmentId::info).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_accepts_canonical_and_legacy_names() {
        assert_eq!(EnvironmentId::lookup("forest"), Some(EnvironmentId::Forest));
        assert_eq!(EnvironmentId::lookup(" Park "), Some(EnvironmentId::Park));
        assert_eq!(EnvironmentId::lookup("PANTAI"), Some(EnvironmentId::Beach));
        assert_eq!(EnvironmentId::lookup("hutan"), Some(EnvironmentId::Forest));
        assert_eq!(EnvironmentId::lookup("volcano"), None);
        assert_eq!(EnvironmentId::lookup(""), None);
    }

    #[test]
    fn test_string_forms_are_canonical() {
        assert_eq!(EnvironmentId::Forest.as_str(), "forest");
        assert_eq!(EnvironmentId::Beach.to_string(), "beach");
        assert_eq!(
            serde_json::to_string(&EnvironmentId::Park).unwrap(),
            "\"park\""
        );
    }

    #[test]
    fn test_catalog_order() {
        let ids: Vec<_> = catalog().iter().map(|e| e.id).collect();
        assert_eq!(
            ids,
            vec![EnvironmentId::Forest, EnvironmentId::Park, EnvironmentId::Beach]
        );
    }
}
