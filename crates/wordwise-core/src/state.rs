use std::time::{Duration, Instant, SystemTime};

use serde::Serialize;
use wordwise_config::Config;
use wordwise_translator::TranslateError;
use wordwise_types::{AUTO_DETECT, Language, ResultShape};

use crate::catalog::LanguageCatalog;
use crate::feedback::{CopyTicket, FeedbackState};
use crate::history::HistoryStore;
use crate::selection::{PickerSide, SelectionState};
use crate::session::{LookupPayload, PendingRequest, SessionController};
use crate::view::{self, CopyKey, ResultTab, ResultView};

/// The whole interactive session as one object, mutated only through the
/// operations below and observed by the render layer.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    #[serde(skip)]
    catalog: LanguageCatalog,
    selection: SelectionState,
    controller: SessionController,
    feedback: FeedbackState,
    tab: ResultTab,
}

impl Session {
    pub fn new(
        shape: ResultShape,
        source_code: &str,
        target_code: &str,
        history_capacity: usize,
        copy_feedback: Duration,
    ) -> Self {
        Self {
            catalog: LanguageCatalog::default(),
            selection: SelectionState::new(source_code, target_code),
            controller: SessionController::new(shape, history_capacity),
            feedback: FeedbackState::new(copy_feedback),
            tab: ResultTab::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.backend.shape,
            &config.session.source_lang,
            &config.session.target_lang,
            config.history_capacity(),
            Duration::from_millis(config.ui.copy_feedback_ms),
        )
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn feedback(&self) -> &FeedbackState {
        &self.feedback
    }

    pub fn history(&self) -> &HistoryStore {
        self.controller.history()
    }

    pub fn shape(&self) -> ResultShape {
        self.controller.shape()
    }

    pub fn tab(&self) -> ResultTab {
        self.tab
    }

    pub fn set_input(&mut self, text: &str) {
        self.controller.set_input(text);
    }

    /// Submit the current input for the selected language pair.
    pub fn submit(&mut self) -> Option<PendingRequest> {
        let input = self.controller.input().to_string();
        self.controller.submit(
            &input,
            self.selection.source_code(),
            self.selection.target_code(),
            &self.catalog,
        )
    }

    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<LookupPayload, TranslateError>,
    ) -> bool {
        self.controller.complete(generation, outcome, SystemTime::now())
    }

    pub fn clear(&mut self) {
        self.controller.clear();
    }

    pub fn toggle_picker(&mut self, side: PickerSide) {
        self.selection.toggle_picker(side);
    }

    pub fn set_language_query(&mut self, side: PickerSide, query: &str) {
        self.selection.set_query(side, query);
    }

    /// Catalog entries matching `side`'s current search query.
    pub fn filtered_languages(&self, side: PickerSide) -> Vec<&Language> {
        self.catalog.filter(self.selection.query(side))
    }

    /// Choose a language; unknown codes are refused. Auto-detect is only
    /// valid as a plain-text source.
    pub fn select_language(&mut self, side: PickerSide, code: &str) -> bool {
        let auto_allowed = side == PickerSide::Source && self.shape() == ResultShape::PlainText;
        let valid = self.catalog.contains(code) || (auto_allowed && code == AUTO_DETECT);
        if !valid {
            tracing::debug!(%side, code, "refusing unknown language");
            return false;
        }
        self.selection.select(side, code);
        true
    }

    /// Exchange the language pair; plain-text sessions also exchange the
    /// input and output buffers.
    pub fn swap(&mut self) -> bool {
        if !self.selection.swap() {
            return false;
        }
        if self.shape() == ResultShape::PlainText {
            self.controller.swap_buffers();
        }
        true
    }

    pub fn select_tab(&mut self, tab: ResultTab) {
        self.tab = tab;
    }

    pub fn view(&self) -> Option<ResultView<'_>> {
        ResultView::project(self.controller.result(), self.tab)
    }

    /// Text behind `key` in the current session, if any.
    pub fn copy_text(&self, key: &CopyKey) -> Option<&str> {
        match key {
            CopyKey::Input => Some(self.controller.input()),
            CopyKey::Output => Some(self.controller.output()),
            key => view::copy_text(self.controller.result()?, key),
        }
    }

    /// Mark `key` copied and hand back its text for the clipboard. Empty or
    /// missing fields are ignored.
    pub fn copy(&mut self, key: CopyKey, now: Instant) -> Option<(String, CopyTicket)> {
        let text = self.copy_text(&key).filter(|t| !t.is_empty())?.to_string();
        let ticket = self.feedback.mark_copied(key, now);
        Some((text, ticket))
    }

    pub fn expire_copy(&mut self, ticket: &CopyTicket) -> bool {
        self.feedback.on_expire(ticket)
    }

    pub fn recall(&mut self, index: usize) -> bool {
        self.controller.recall(index)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
