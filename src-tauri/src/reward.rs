use std::time::Duration;

use serde::Serialize;

use crate::badges::{BadgeSet, BadgeStatus};
use crate::environment::{Environment, EnvironmentId};

/// How long the reward screen shows the "not yet" message before sending
/// the player back to the menu.
pub const DENIED_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Outcome of opening the reward screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "access", content = "data")]
pub enum RewardAccess {
    Granted { badges: Vec<Environment> },
    #[serde(rename_all = "camelCase")]
    Denied {
        missing: Vec<EnvironmentId>,
        redirect_after_ms: u64,
    },
}

impl RewardAccess {
    /// Decide from a freshly read badge set. Callers must not pass a copy
    /// cached from an earlier screen.
    pub fn evaluate(badges: BadgeSet) -> Self {
        if badges.is_complete() {
            RewardAccess::Granted {
                badges: EnvironmentId::all().map(EnvironmentId::info).collect(),
            }
        } else {
            RewardAccess::Denied {
                missing: badges.missing(),
                redirect_after_ms: DENIED_REDIRECT_DELAY.as_millis() as u64,
            }
        }
    }
}

/// One environment card on the menu screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCard {
    #[serde(flatten)]
    pub environment: Environment,
    pub status: BadgeStatus,
}

impl MenuCard {
    pub fn all(badges: BadgeSet) -> Vec<MenuCard> {
        EnvironmentId::all()
            .map(|env| MenuCard {
                environment: env.info(),
                status: badges.status(env),
            })
            .collect()
    }
}
