use std::sync::Arc;

use tauri::{AppHandle, Emitter};
use tracing::warn;

use crate::badges::BadgeSet;
use crate::environment::{catalog, Environment};
use crate::error::{Result, StoreError};
use crate::reward::{MenuCard, RewardAccess};
use crate::storage::SharedStorage;
use crate::store::ProgressStore;

/// Broadcast to every window after badge state may have changed. Advisory:
/// windows must still re-fetch before acting on badge state.
pub const BADGES_CHANGED_EVENT: &str = "badges-changed";

/// Managed state holding the one progress store of the process.
pub struct ProgressState {
    pub store: Arc<ProgressStore<SharedStorage>>,
}

impl ProgressState {
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            store: Arc::new(ProgressStore::new(storage)),
        }
    }

    /// Send the current badges to every window (or one window when `target`
    /// is given). Failures are logged and otherwise ignored.
    pub fn notify(&self, app: &AppHandle, target: Option<&str>) {
        let badges = self.store.get_badges();
        let sent = match target {
            Some(label) => app.emit_to(label, BADGES_CHANGED_EVENT, badges),
            None => app.emit(BADGES_CHANGED_EVENT, badges),
        };
        if let Err(e) = sent {
            warn!(error = %e, "failed to broadcast badge change");
        }
    }
}

/// Run a store operation off the async runtime; storage calls block on disk.
async fn with_store<T, F>(state: &ProgressState, op: F) -> Result<T>
where
    F: FnOnce(&ProgressStore<SharedStorage>) -> T + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| StoreError::Custom(format!("progress task failed: {e}")))
}

#[tauri::command]
pub async fn get_badges(state: tauri::State<'_, ProgressState>) -> Result<BadgeSet> {
    with_store(&state, |store| store.get_badges()).await
}

/// Set one flag directly. Unknown environments are ignored.
#[tauri::command]
pub async fn set_badge(
    app: AppHandle,
    environment: String,
    completed: bool,
    state: tauri::State<'_, ProgressState>,
) -> Result<BadgeSet> {
    let badges = with_store(&state, move |store| {
        store.set_badge(&environment, completed);
        store.get_badges()
    })
    .await?;
    state.notify(&app, None);
    Ok(badges)
}

/// Called by a mini-game when its challenge is solved. Returns `true` only
/// when this call earned the badge, so the game celebrates once.
#[tauri::command]
pub async fn complete_environment(
    app: AppHandle,
    environment: String,
    state: tauri::State<'_, ProgressState>,
) -> Result<bool> {
    let earned = with_store(&state, move |store| store.complete(&environment)).await?;
    if earned {
        state.notify(&app, None);
    }
    Ok(earned)
}

#[tauri::command]
pub async fn has_all_badges(state: tauri::State<'_, ProgressState>) -> Result<bool> {
    with_store(&state, |store| store.has_all_badges()).await
}

#[tauri::command]
pub async fn reset_all(app: AppHandle, state: tauri::State<'_, ProgressState>) -> Result<BadgeSet> {
    let badges = with_store(&state, |store| {
        store.reset_all();
        store.get_badges()
    })
    .await?;
    state.notify(&app, None);
    Ok(badges)
}

#[tauri::command]
pub async fn clear_all_storage(
    app: AppHandle,
    state: tauri::State<'_, ProgressState>,
) -> Result<()> {
    with_store(&state, |store| store.clear_all_storage()).await?;
    state.notify(&app, None);
    Ok(())
}

#[tauri::command]
pub async fn get_menu_cards(state: tauri::State<'_, ProgressState>) -> Result<Vec<MenuCard>> {
    with_store(&state, |store| MenuCard::all(store.get_badges())).await
}

#[tauri::command]
pub async fn check_reward_access(state: tauri::State<'_, ProgressState>) -> Result<RewardAccess> {
    with_store(&state, |store| RewardAccess::evaluate(store.get_badges())).await
}

#[tauri::command]
pub fn list_environments() -> Vec<Environment> {
    catalog()
}
