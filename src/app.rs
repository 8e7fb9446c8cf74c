//! Application state management for Rollcall.
//!
//! `App` is the view controller: it owns the presentation state (which page
//! is visible, form fields, validation error, list selection) and forwards
//! user intents to the roster store. The store is a private field so all
//! roster mutation funnels through the intent methods here.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::StudentRecord;
use crate::storage::{FileStore, KeyValueStore};
use crate::store::{PersistResult, RosterStore};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the persistence outcome channel.
/// Writes finish far faster than a user can submit entries; 8 leaves headroom.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Maximum length for a name field.
/// Long enough for compound names without letting a held key overflow the form.
const MAX_NAME_LENGTH: usize = 40;

/// Number of rows to move on page up/down in the student list.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Inline form message when a submit has an empty field.
pub const VALIDATION_MESSAGE: &str = "Please fill out all fields.";

// ============================================================================
// UI State Types
// ============================================================================

/// Presentation state: the data-entry form or the student list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Form,
    Show,
}

/// Form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    FirstName,
    LastName,
    AddButton,
    ShowButton,
}

impl FormFocus {
    /// Get the next focus target (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            FormFocus::FirstName => FormFocus::LastName,
            FormFocus::LastName => FormFocus::AddButton,
            FormFocus::AddButton => FormFocus::ShowButton,
            FormFocus::ShowButton => FormFocus::FirstName,
        }
    }

    /// Get the previous focus target (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            FormFocus::FirstName => FormFocus::ShowButton,
            FormFocus::LastName => FormFocus::FirstName,
            FormFocus::AddButton => FormFocus::LastName,
            FormFocus::ShowButton => FormFocus::AddButton,
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    store: RosterStore,

    // UI state
    pub page: Page,
    pub form_focus: FormFocus,
    pub first_name: String,
    pub last_name: String,
    pub form_error: Option<String>,
    pub list_selection: usize,

    // Status message (currently only save failures)
    pub status_message: Option<String>,

    // Last confirmed write, for the status bar
    last_saved: Option<DateTime<Utc>>,
    persist_rx: mpsc::Receiver<PersistResult>,
}

impl App {
    /// Create a new application instance backed by the on-disk store.
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let data_dir = config.data_dir()?;
        debug!(?data_dir, "Data directory configured");
        let storage = Arc::new(FileStore::new(data_dir)?);

        Ok(Self::with_storage(storage))
    }

    pub fn with_storage(storage: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            store: RosterStore::new(storage, tx),

            page: Page::Form,
            form_focus: FormFocus::FirstName,
            first_name: String::new(),
            last_name: String::new(),
            form_error: None,
            list_selection: 0,

            status_message: None,
            last_saved: None,
            persist_rx: rx,
        }
    }

    /// Restore the persisted roster.
    ///
    /// Called before the event loop starts, so a submit can never race the
    /// load and clobber restored entries.
    pub fn load_roster(&mut self) {
        self.store.restore();
    }

    /// Rendering snapshot of the roster, most recently added first.
    pub fn students(&self) -> &[StudentRecord] {
        self.store.students()
    }

    // =========================================================================
    // User Intents
    // =========================================================================

    /// Submit the form. Presence check only: either field empty means no
    /// addition and an inline error; otherwise add and reset the form.
    pub fn submit(&mut self) {
        if self.first_name.is_empty() || self.last_name.is_empty() {
            self.form_error = Some(VALIDATION_MESSAGE.to_string());
            return;
        }

        self.form_error = None;
        self.store.add(&self.first_name, &self.last_name);
        self.first_name.clear();
        self.last_name.clear();
        self.form_focus = FormFocus::FirstName;
    }

    /// Switch to the student list.
    pub fn show_students(&mut self) {
        self.page = Page::Show;
        self.list_selection = 0;
    }

    /// Switch back to the data-entry form.
    pub fn add_new(&mut self) {
        self.page = Page::Form;
        self.form_focus = FormFocus::FirstName;
    }

    pub fn can_add_name_char(len: usize) -> bool {
        len < MAX_NAME_LENGTH
    }

    // =========================================================================
    // Background Write Outcomes
    // =========================================================================

    /// Drain outcomes from background roster writes.
    ///
    /// A confirmed save updates the last-saved time and clears any earlier
    /// failure notice; a failure goes to the status bar. The in-memory
    /// roster is never touched here.
    pub fn check_persist_results(&mut self) {
        while let Ok(result) = self.persist_rx.try_recv() {
            match result {
                PersistResult::Saved { count, at } => {
                    debug!(count, "Roster save confirmed");
                    self.last_saved = Some(at);
                    self.status_message = None;
                }
                PersistResult::Failed(msg) => {
                    self.status_message = Some(format!("Save failed: {}", msg));
                }
            }
        }
    }

    /// Status-bar text for the last confirmed save.
    pub fn saved_age_display(&self) -> String {
        match self.last_saved {
            Some(at) => age_display(at),
            None => "never".to_string(),
        }
    }
}

fn age_display(at: DateTime<Utc>) -> String {
    let minutes = (Utc::now() - at).num_minutes();
    if minutes < 1 {
        // Covers clock skew too
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else {
        format!("{}h ago", minutes / 60)
    }
}

// ============================================================================
// Tests
// ============================================================================
