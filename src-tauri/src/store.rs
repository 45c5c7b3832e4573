//! Progress store: the single owner of badge state.
//!
//! Every read goes to storage; the store keeps no copy of the record. Reads
//! fail open to the all-locked default and writes are best-effort, so a
//! broken or disabled storage never takes the UI down with it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::badges::BadgeSet;
use crate::environment::EnvironmentId;
use crate::storage::KeyValueStore;

/// Storage key of the badge record. The suffix is the schema version; a
/// record stored under any other version is never read.
pub const BADGES_KEY: &str = "plsl_badges_v1";

pub struct ProgressStore<S> {
    storage: S,
    // Serialises read-merge-write within this process.
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    /// Current badges. Missing, unreadable or malformed data reads as all
    /// locked.
    pub fn get_badges(&self) -> BadgeSet {
        match self.storage.get(BADGES_KEY) {
            Ok(Some(raw)) => BadgeSet::from_stored(&raw).unwrap_or_else(|| {
                warn!(key = BADGES_KEY, "ignoring malformed badge record");
                BadgeSet::default()
            }),
            Ok(None) => BadgeSet::default(),
            Err(e) => {
                warn!(key = BADGES_KEY, error = %e, "badge storage unreadable");
                BadgeSet::default()
            }
        }
    }

    /// Set one flag by name. Unknown names are ignored.
    pub fn set_badge(&self, environment: &str, completed: bool) {
        match EnvironmentId::lookup(environment) {
            Some(env) => self.set_environment(env, completed),
            None => debug!(environment, "ignoring badge update for unknown environment"),
        }
    }

    /// Set one flag, re-reading the stored record first so flags written by
    /// other windows since our last read are kept.
    pub fn set_environment(&self, env: EnvironmentId, completed: bool) {
        let _guard = self.lock();
        let updated = self.get_badges().with(env, completed);
        self.write(&updated);
    }

    /// Earn the badge for `env`. Returns `true` only when this call moved it
    /// from locked to earned and the write went through.
    pub fn mark_complete(&self, env: EnvironmentId) -> bool {
        let _guard = self.lock();
        let current = self.get_badges();
        if current.get(env) {
            return false;
        }
        self.write(&current.with(env, true))
    }

    /// Challenge-completion entry point for a mini-game, by name. Returns
    /// `true` only on the locked to earned transition; unknown names are
    /// ignored and return `false`.
    pub fn complete(&self, environment: &str) -> bool {
        match EnvironmentId::lookup(environment) {
            Some(env) => self.mark_complete(env),
            None => {
                debug!(environment, "ignoring completion for unknown environment");
                false
            }
        }
    }

    /// True iff every badge is earned, computed from a fresh read.
    pub fn has_all_badges(&self) -> bool {
        self.get_badges().is_complete()
    }

    /// Forget all progress. Safe on storage that was never written.
    pub fn reset_all(&self) {
        let _guard = self.lock();
        if let Err(e) = self.storage.remove(BADGES_KEY) {
            warn!(key = BADGES_KEY, error = %e, "failed to remove badge record");
        }
        if self.write(&BadgeSet::default()) {
            info!("badge progress reset");
        }
    }

    /// Wipe every key in the underlying storage, not only the badge record.
    pub fn clear_all_storage(&self) {
        let _guard = self.lock();
        match self.storage.clear() {
            Ok(()) => info!("all storage cleared"),
            Err(e) => warn!(error = %e, "failed to clear storage"),
        }
    }

    fn write(&self, badges: &BadgeSet) -> bool {
        let raw = match badges.to_stored() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to encode badge record");
                return false;
            }
        };
        match self.storage.set(BADGES_KEY, &raw) {
            Ok(()) => {
                debug!(record = %raw, "badge record written");
                true
            }
            Err(e) => {
                warn!(key = BADGES_KEY, error = %e, "failed to persist badge record");
                false
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
