use crate::render::{render_tasks, summarize, FETCH_FAILED_MESSAGE};
use crate::view_model::{AppViewModel, TaskListView};
use crate::{ControllerError, SubmissionGate, SubmissionSettings, Task};

/// Latest result of a fetch cycle. Each cycle replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Listing {
    /// No cycle has completed yet.
    #[default]
    Loading,
    Loaded(Vec<Task>),
    Failed(ControllerError),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: SubmissionSettings,
    input: String,
    gate: SubmissionGate,
    listing: Listing,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SubmissionSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let tasks = match &self.listing {
            Listing::Loading => TaskListView::Loading,
            Listing::Loaded(tasks) => render_tasks(Some(tasks.as_slice())),
            Listing::Failed(err) => TaskListView::Error {
                message: FETCH_FAILED_MESSAGE.to_string(),
                detail: err.to_string(),
            },
        };
        let summary = match &tasks {
            TaskListView::Rows(rows) => Some(summarize(rows)),
            _ => None,
        };
        AppViewModel {
            input: self.input.clone(),
            submitting: self.gate.is_engaged(),
            tasks,
            summary,
            dirty: self.dirty,
        }
    }

    pub fn settings(&self) -> &SubmissionSettings {
        &self.settings
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn is_submitting(&self) -> bool {
        self.gate.is_engaged()
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_input(&mut self) {
        self.set_input(String::new());
    }

    pub(crate) fn gate_mut(&mut self) -> &mut SubmissionGate {
        self.mark_dirty();
        &mut self.gate
    }

    pub(crate) fn replace_listing(&mut self, listing: Listing) {
        self.listing = listing;
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
