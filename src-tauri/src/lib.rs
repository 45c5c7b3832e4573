//! Badge progress backend for the Nature Explorer app.
//!
//! The web front end renders the three environments, their hotspots and
//! mini-games; this crate owns whether each environment's challenge has been
//! completed, persists it per user profile, and gates the reward screen.

pub mod badges;
pub mod config;
pub mod environment;
pub mod error;
pub mod reward;
pub mod storage;
pub mod store;

#[cfg(feature = "desktop")]
mod commands;

pub use badges::{BadgeSet, BadgeStatus};
pub use environment::EnvironmentId;
pub use error::{Result, StoreError};
pub use store::{ProgressStore, BADGES_KEY};

#[cfg(feature = "desktop")]
pub fn run() -> anyhow::Result<()> {
    use tauri::Manager;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::AppConfig::from_env();
    let progress = commands::progress::ProgressState::new(config.open_storage());

    tauri::Builder::default()
        .manage(progress)
        .invoke_handler(tauri::generate_handler![
            commands::progress::get_badges,
            commands::progress::set_badge,
            commands::progress::complete_environment,
            commands::progress::has_all_badges,
            commands::progress::reset_all,
            commands::progress::clear_all_storage,
            commands::progress::get_menu_cards,
            commands::progress::check_reward_access,
            commands::progress::list_environments,
        ])
        .on_window_event(|window, event| {
            // Another window may have earned a badge while this one was in
            // the background.
            if let tauri::WindowEvent::Focused(true) = event {
                if let Some(state) = window.try_state::<commands::progress::ProgressState>() {
                    state.notify(window.app_handle(), Some(window.label()));
                }
            }
        })
        .run(tauri::generate_context!())?;

    Ok(())
}
