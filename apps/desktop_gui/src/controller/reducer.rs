//! Reducer-like state transitions for the catalog window.
//!
//! Rendering collects [`UiAction`]s while it borrows the state immutably, and
//! the app applies them afterwards. Backend results arrive as [`UiEvent`]s.

use breed_core::{CatalogSession, CloseOutcome, DialogTransition};
use chrono::{DateTime, Local};
use shared::domain::{BreedField, OriginFilter, RecordId};
use tracing::{debug, info, warn};

use crate::backend_bridge::commands::{BackendCommand, FetchReason};
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}

impl StatusBanner {
    fn from_error(err: &UiError) -> Self {
        Self {
            severity: StatusBannerSeverity::Error,
            message: format!("{}: {}", err_label(err.category()), err.message()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    SelectOrigin(OriginFilter),
    SelectRow(RecordId),
    OpenDetails(RecordId),
    DeleteSelected,
    ToggleDialog,
    EditField(BreedField, String),
    CloseDialog,
    DismissBanner,
    Reload,
}

pub struct CatalogState {
    pub session: CatalogSession,
    pub status: String,
    pub banner: Option<StatusBanner>,
    pub loading: bool,
    pub last_loaded_at: Option<DateTime<Local>>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            session: CatalogSession::new(),
            status: "Starting...".to_string(),
            banner: None,
            loading: false,
            last_loaded_at: None,
        }
    }
}

impl CatalogState {
    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::BreedsLoaded {
                records,
                fetched_at,
            } => {
                let count = records.len();
                self.session.seed(records);
                self.loading = false;
                self.last_loaded_at = Some(fetched_at);
                self.status = format!("Loaded {count} breeds at {}", fetched_at.format("%H:%M:%S"));
                info!(count, "catalog seeded");
            }
            UiEvent::Error(err) => {
                if err.context() == UiErrorContext::FetchBreeds
                    || err.context() == UiErrorContext::BackendStartup
                {
                    self.loading = false;
                }
                self.status = err.message().to_string();
                self.banner = Some(StatusBanner::from_error(&err));
            }
        }
    }

    /// Applies one user action. Returns a backend command when the action
    /// needs the worker.
    pub fn apply_action(&mut self, action: UiAction) -> Option<BackendCommand> {
        match action {
            UiAction::SelectOrigin(filter) => {
                self.session.select_origin(filter);
            }
            UiAction::SelectRow(id) => {
                self.session.select(Some(id));
            }
            UiAction::OpenDetails(id) => {
                if !self.session.open_details(id) {
                    self.status = "That breed is no longer in the list".to_string();
                }
            }
            UiAction::DeleteSelected => match self.session.delete_selected() {
                Some(removed) => {
                    info!(name = %removed.name, "deleted breed from session");
                    self.status = format!("Deleted {}", removed.name);
                }
                None => debug!("delete requested without a live selection"),
            },
            UiAction::ToggleDialog => match self.session.toggle_dialog() {
                Some(Ok(DialogTransition::BeganEditing)) => {
                    self.status = "Editing breed details".to_string();
                }
                Some(Ok(DialogTransition::Saved)) => {
                    self.status = "Breed details saved".to_string();
                }
                Some(Err(err)) => {
                    warn!("failed to save breed details: {err}");
                    let err = UiError::from_message(UiErrorContext::EditRecord, err.to_string());
                    self.status = err.message().to_string();
                    self.banner = Some(StatusBanner::from_error(&err));
                }
                None => {}
            },
            UiAction::EditField(field, value) => {
                if let Some(dialog) = self.session.dialog_mut() {
                    dialog.set_field(field, value);
                }
            }
            UiAction::CloseDialog => {
                if let Some(CloseOutcome::DiscardedEdits) = self.session.close_dialog() {
                    self.status = "Unsaved breed edits discarded".to_string();
                }
            }
            UiAction::DismissBanner => {
                self.banner = None;
            }
            UiAction::Reload => {
                return self.begin_fetch(FetchReason::Reload);
            }
        }
        None
    }

    /// Marks a fetch as in flight. A second request while one is pending is
    /// dropped.
    pub fn begin_fetch(&mut self, reason: FetchReason) -> Option<BackendCommand> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.banner = None;
        Some(BackendCommand::FetchBreeds { reason })
    }

    pub fn counts_label(&self) -> String {
        format!(
            "{} of {} breeds shown",
            self.session.shown_count(),
            self.session.total_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breed_core::FetchError;
    use shared::domain::BreedRecord;

    fn loaded_state() -> CatalogState {
        let mut state = CatalogState::default();
        state.begin_fetch(FetchReason::Startup);
        state.apply_event(UiEvent::BreedsLoaded {
            records: vec![
                BreedRecord::new("Abyssinian", "Egypt", "Active", "Lean"),
                BreedRecord::new("Bengal", "USA", "Alert", "Spotted"),
            ],
            fetched_at: Local::now(),
        });
        state
    }

    fn id_of(state: &CatalogState, name: &str) -> RecordId {
        state
            .session
            .store()
            .find_by_name(name)
            .expect("record")
    }

    #[test]
    fn breeds_loaded_seeds_session_and_clears_loading() {
        let state = loaded_state();

        assert!(!state.loading);
        assert!(state.last_loaded_at.is_some());
        assert_eq!(state.session.total_count(), 2);
        assert!(state.status.starts_with("Loaded 2 breeds"));
        assert_eq!(state.counts_label(), "2 of 2 breeds shown");
    }

    #[test]
    fn fetch_failure_shows_banner_and_leaves_empty_catalog() {
        let mut state = CatalogState::default();
        state.begin_fetch(FetchReason::Startup);

        state.apply_event(UiEvent::Error(UiError::from_fetch_error(
            &FetchError::Status { status: 502 },
        )));
        state.apply_event(UiEvent::BreedsLoaded {
            records: Vec::new(),
            fetched_at: Local::now(),
        });

        assert!(!state.loading);
        assert_eq!(state.session.rows().len(), 0);
        assert!(state.session.origin_options().is_empty());
        let banner = state.banner.as_ref().expect("banner");
        assert_eq!(banner.severity, StatusBannerSeverity::Error);
        assert_eq!(banner.message, "Network: Breeds API answered HTTP 502.");

        state.apply_action(UiAction::DismissBanner);
        assert!(state.banner.is_none());
    }

    #[test]
    fn reload_is_not_queued_twice_while_loading() {
        let mut state = loaded_state();

        assert!(matches!(
            state.apply_action(UiAction::Reload),
            Some(BackendCommand::FetchBreeds {
                reason: FetchReason::Reload
            })
        ));
        assert!(state.apply_action(UiAction::Reload).is_none());
    }

    #[test]
    fn filter_then_delete_through_actions() {
        let mut state = loaded_state();

        state.apply_action(UiAction::SelectOrigin(OriginFilter::Origin(
            "USA".to_string(),
        )));
        let bengal = id_of(&state, "Bengal");
        state.apply_action(UiAction::SelectRow(bengal));
        state.apply_action(UiAction::DeleteSelected);

        assert_eq!(state.status, "Deleted Bengal");
        assert!(state.session.rows().is_empty());
        state.apply_action(UiAction::SelectOrigin(OriginFilter::All));
        assert_eq!(state.session.rows().len(), 1);
        assert_eq!(state.session.origin_options(), ["Egypt"]);
    }

    #[test]
    fn dialog_edit_save_flow_through_actions() {
        let mut state = loaded_state();
        let bengal = id_of(&state, "Bengal");

        state.apply_action(UiAction::OpenDetails(bengal));
        state.apply_action(UiAction::EditField(BreedField::Name, "Ignored".to_string()));
        state.apply_action(UiAction::ToggleDialog);
        state.apply_action(UiAction::EditField(BreedField::Temperament, "Playful".to_string()));
        state.apply_action(UiAction::ToggleDialog);
        state.apply_action(UiAction::CloseDialog);

        let record = state.session.store().get(bengal).expect("record");
        assert_eq!(record.name, "Bengal");
        assert_eq!(record.temperament, "Playful");
        assert_eq!(state.status, "Breed details saved");
    }

    #[test]
    fn closing_dialog_mid_edit_reports_discard() {
        let mut state = loaded_state();
        let bengal = id_of(&state, "Bengal");

        state.apply_action(UiAction::OpenDetails(bengal));
        state.apply_action(UiAction::ToggleDialog);
        state.apply_action(UiAction::EditField(BreedField::Origin, "India".to_string()));
        state.apply_action(UiAction::CloseDialog);

        assert_eq!(state.status, "Unsaved breed edits discarded");
        assert_eq!(
            state.session.store().get(bengal).map(|r| r.origin.as_str()),
            Some("USA")
        );
    }

    #[test]
    fn opening_stale_row_updates_status_only() {
        let mut state = loaded_state();
        let bengal = id_of(&state, "Bengal");
        state.session.delete_by_name("Bengal");

        state.apply_action(UiAction::OpenDetails(bengal));

        assert!(state.session.dialog().is_none());
        assert_eq!(state.status, "That breed is no longer in the list");
    }
}
