use serde::Serialize;
use serde_json::Value;

use crate::environment::EnvironmentId;

/// Completion flags for the three environments.
///
/// This is the only persisted record. It is `Copy`: every reader gets its own
/// snapshot and nothing hands out references into the stored state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BadgeSet {
    pub forest: bool,
    pub park: bool,
    pub beach: bool,
}

/// Per-environment state: a badge is either still locked or earned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BadgeStatus {
    #[serde(rename = "LOCK")]
    Locked,
    #[serde(rename = "DONE")]
    Earned,
}

impl From<bool> for BadgeStatus {
    fn from(earned: bool) -> Self {
        if earned {
            BadgeStatus::Earned
        } else {
            BadgeStatus::Locked
        }
    }
}

impl BadgeSet {
    pub fn get(&self, env: EnvironmentId) -> bool {
        match env {
            EnvironmentId::Forest => self.forest,
            EnvironmentId::Park => self.park,
            EnvironmentId::Beach => self.beach,
        }
    }

    pub fn set(&mut self, env: EnvironmentId, completed: bool) {
        match env {
            EnvironmentId::Forest => self.forest = completed,
            EnvironmentId::Park => self.park = completed,
            EnvironmentId::Beach => self.beach = completed,
        }
    }

    /// Copy of `self` with one flag changed.
    #[must_use]
    pub fn with(mut self, env: EnvironmentId, completed: bool) -> Self {
        self.set(env, completed);
        self
    }

    pub fn status(&self, env: EnvironmentId) -> BadgeStatus {
        self.get(env).into()
    }

    pub fn is_complete(&self) -> bool {
        self.forest && self.park && self.beach
    }

    /// Environments still locked, in menu order.
    pub fn missing(&self) -> Vec<EnvironmentId> {
        EnvironmentId::all().filter(|env| !self.get(*env)).collect()
    }

    /// Decode a stored record, validating each field on its own.
    ///
    /// Returns `None` when the text is not JSON or not an object. Inside an
    /// object, unknown keys are ignored and a field that is missing or not a
    /// boolean reads as `false`. The pre-rename field names are accepted when
    /// the canonical one is absent.
    pub fn from_stored(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let fields = value.as_object()?;

        let mut badges = BadgeSet::default();
        for env in EnvironmentId::all() {
            let earned = fields
                .get(env.as_str())
                .and_then(Value::as_bool)
                .or_else(|| fields.get(env.legacy_name()).and_then(Value::as_bool))
                .unwrap_or(false);
            badges.set(env, earned);
        }
        Some(badges)
    }

    pub fn to_stored(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stored_canonical() {
        let badges = BadgeSet::from_stored(r#"{"forest":true,"park":false,"beach":true}"#).unwrap();
        assert_eq!(
            badges,
            BadgeSet {
                forest: true,
                park: false,
                beach: true
            }
        );
    }

    #[test]
    fn test_from_stored_defaults_missing_and_mistyped_fields() {
        let badges = BadgeSet::from_stored(r#"{"forest":"yes","beach":1,"volcano":true}"#).unwrap();
        assert_eq!(badges, BadgeSet::default());

        let badges = BadgeSet::from_stored(r#"{"park":true}"#).unwrap();
        assert!(badges.park);
        assert!(!badges.forest);
    }

    #[test]
    fn test_from_stored_rejects_non_objects() {
        assert_eq!(BadgeSet::from_stored("not json"), None);
        assert_eq!(BadgeSet::from_stored("[true,true,true]"), None);
        assert_eq!(BadgeSet::from_stored("true"), None);
        assert_eq!(BadgeSet::from_stored("null"), None);
        assert_eq!(BadgeSet::from_stored(""), None);
    }

    #[test]
    fn test_from_stored_reads_legacy_names() {
        let badges = BadgeSet::from_stored(r#"{"hutan":true,"taman":true,"pantai":false}"#).unwrap();
        assert!(badges.forest);
        assert!(badges.park);
        assert!(!badges.beach);

        // Canonical field wins when both are present.
        let badges = BadgeSet::from_stored(r#"{"forest":false,"hutan":true}"#).unwrap();
        assert!(!badges.forest);
    }

    #[test]
    fn test_to_stored_is_flat_object() {
        let raw = BadgeSet::default()
            .with(EnvironmentId::Park, true)
            .to_stored()
            .unwrap();
        assert_eq!(raw, r#"{"forest":false,"park":true,"beach":false}"#);
    }

    #[test]
    fn test_status_and_missing() {
        let badges = BadgeSet::default().with(EnvironmentId::Beach, true);
        assert_eq!(badges.status(EnvironmentId::Beach), BadgeStatus::Earned);
        assert_eq!(badges.status(EnvironmentId::Forest), BadgeStatus::Locked);
        assert_eq!(
            badges.missing(),
            vec![EnvironmentId::Forest, EnvironmentId::Park]
        );
        assert_eq!(
            serde_json::to_string(&BadgeStatus::Earned).unwrap(),
            "\"DONE\""
        );
    }
}
