use std::time::SystemTime;

use serde::Serialize;
use wordwise_translator::{LookupRequest, TranslateError, Translator};
use wordwise_types::{AUTO_DETECT, LookupResult, ResultShape, Translation};

use crate::catalog::LanguageCatalog;
use crate::history::{HistoryRecord, HistoryStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Requesting,
    Failed,
}

/// A request accepted by the controller, tagged with its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    Lookup {
        generation: u64,
        request: LookupRequest,
    },
    Translate {
        generation: u64,
        text: String,
        /// Display name, or the auto-detect sentinel
        from: String,
        to: String,
    },
}

impl PendingRequest {
    pub fn generation(&self) -> u64 {
        match self {
            PendingRequest::Lookup { generation, .. } => *generation,
            PendingRequest::Translate { generation, .. } => *generation,
        }
    }

    pub async fn run(&self, translator: &dyn Translator) -> Result<LookupPayload, TranslateError> {
        match self {
            PendingRequest::Lookup { request, .. } => {
                translator.lookup(request).await.map(LookupPayload::Lookup)
            }
            PendingRequest::Translate { text, from, to, .. } => translator
                .translate(text, from, to)
                .await
                .map(LookupPayload::Translation),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupPayload {
    Lookup(LookupResult),
    Translation(Translation),
}

/// Owns the request lifecycle, the current result and the history log.
///
/// `Idle --submit--> Requesting --success/failure--> Idle`. Every accepted
/// submit bumps the generation; a completion is applied only if it carries
/// the latest one.
#[derive(Debug, Clone, Serialize)]
pub struct SessionController {
    shape: ResultShape,
    input: String,
    output: String,
    result: Option<LookupResult>,
    status: RequestStatus,
    last_failure: Option<String>,
    history: HistoryStore,
    #[serde(skip)]
    generation: u64,
    #[serde(skip)]
    in_flight: Option<PendingRequest>,
}

impl SessionController {
    pub fn new(shape: ResultShape, history_capacity: usize) -> Self {
        Self {
            shape,
            input: String::new(),
            output: String::new(),
            result: None,
            status: RequestStatus::Idle,
            last_failure: None,
            history: HistoryStore::with_capacity(history_capacity),
            generation: 0,
            in_flight: None,
        }
    }

    pub fn shape(&self) -> ResultShape {
        self.shape
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
    }

    /// Plain-text output buffer.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn result(&self) -> Option<&LookupResult> {
        self.result.as_ref()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Status for display: `Failed` while the last lookup's failure is unacknowledged.
    pub fn display_status(&self) -> RequestStatus {
        match (self.status, &self.last_failure) {
            (RequestStatus::Idle, Some(_)) => RequestStatus::Failed,
            (status, _) => status,
        }
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn can_submit(&self, raw_input: &str) -> bool {
        self.status != RequestStatus::Requesting && !raw_input.trim().is_empty()
    }

    /// Accept a submission and describe the request to issue, or reject it
    /// (blank input, or a request already in flight) without touching state.
    pub fn submit(
        &mut self,
        raw_input: &str,
        source_code: &str,
        target_code: &str,
        catalog: &LanguageCatalog,
    ) -> Option<PendingRequest> {
        if !self.can_submit(raw_input) {
            tracing::debug!(status = ?self.status, "submit rejected");
            return None;
        }

        self.generation += 1;
        let generation = self.generation;
        let trimmed = raw_input.trim();
        let target = catalog.display_name(target_code).to_string();

        let pending = match self.shape {
            ResultShape::Structured => PendingRequest::Lookup {
                generation,
                request: LookupRequest {
                    word: trimmed.to_lowercase(),
                    target_language: target,
                },
            },
            ResultShape::PlainText => {
                let from = if source_code == AUTO_DETECT {
                    AUTO_DETECT.to_string()
                } else {
                    catalog.display_name(source_code).to_string()
                };
                PendingRequest::Translate {
                    generation,
                    text: trimmed.to_string(),
                    from,
                    to: target,
                }
            }
        };

        tracing::info!(generation, shape = %self.shape, "lookup requested");
        self.status = RequestStatus::Requesting;
        self.last_failure = None;
        self.in_flight = Some(pending.clone());
        Some(pending)
    }

    /// Apply the outcome of request `generation`. Returns false for stale outcomes.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<LookupPayload, TranslateError>,
        now: SystemTime,
    ) -> bool {
        let pending = match self.in_flight.take() {
            Some(pending) if pending.generation() == generation => pending,
            other => {
                tracing::debug!(generation, latest = self.generation, "discarding stale response");
                self.in_flight = other;
                return false;
            }
        };
        self.status = RequestStatus::Idle;

        match outcome {
            Ok(LookupPayload::Lookup(result)) => {
                tracing::info!(generation, word = %result.source_word, "lookup succeeded");
                self.history
                    .record(HistoryRecord::Lookup(result.clone()), now);
                self.result = Some(result);
            }
            Ok(LookupPayload::Translation(translation)) => {
                tracing::info!(generation, to = %translation.to, "translation succeeded");
                let input_text = match pending {
                    PendingRequest::Translate { text, .. } => text,
                    PendingRequest::Lookup { request, .. } => request.word,
                };
                self.history.record(
                    HistoryRecord::Translation {
                        source_language: translation.from,
                        target_language: translation.to,
                        input_text,
                        output_text: translation.text.clone(),
                    },
                    now,
                );
                self.output = translation.text;
            }
            Err(e) => {
                tracing::warn!(generation, "lookup failed: {e}");
                self.result = None;
                self.output.clear();
                self.last_failure = Some(e.to_string());
            }
        }
        true
    }

    /// Submit, run against `translator` and apply the outcome in one step.
    pub async fn submit_with(
        &mut self,
        raw_input: &str,
        source_code: &str,
        target_code: &str,
        catalog: &LanguageCatalog,
        translator: &dyn Translator,
    ) -> bool {
        let Some(pending) = self.submit(raw_input, source_code, target_code, catalog) else {
            return false;
        };
        let outcome = pending.run(translator).await;
        self.complete(pending.generation(), outcome, SystemTime::now())
    }

    /// Reset input and result. History is kept; an in-flight response is dropped.
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
        self.result = None;
        self.last_failure = None;
        if self.in_flight.take().is_some() {
            tracing::debug!(generation = self.generation, "clear invalidated in-flight request");
            self.generation += 1;
        }
        self.status = RequestStatus::Idle;
    }

    /// Let the previous output become the next input.
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.input, &mut self.output);
    }

    /// Show a history entry again without issuing a request.
    pub fn recall(&mut self, index: usize) -> bool {
        let Some(entry) = self.history.get(index) else {
            return false;
        };
        match &entry.record {
            HistoryRecord::Lookup(result) => {
                self.input = result.source_word.clone();
                self.result = Some(result.clone());
            }
            HistoryRecord::Translation {
                input_text,
                output_text,
                ..
            } => {
                self.input = input_text.clone();
                self.output = output_text.clone();
            }
        }
        self.last_failure = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wordwise_translator::{ProviderMetadata, StubTranslator};
    use wordwise_types::Example;

    use super::*;

    /// Records every lookup and answers from a script.
    struct ScriptedTranslator {
        calls: Mutex<Vec<LookupRequest>>,
        fail: bool,
    }

    impl ScriptedTranslator {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn calls(&self) -> Vec<LookupRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translator for ScriptedTranslator {
        async fn lookup(&self, request: &LookupRequest) -> Result<LookupResult, TranslateError> {
            self.calls.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(TranslateError::Api("HTTP 503".to_string()));
            }
            Ok(beautiful())
        }

        async fn translate(
            &self,
            _text: &str,
            _from: &str,
            _to: &str,
        ) -> Result<Translation, TranslateError> {
            Err(TranslateError::Unsupported("translate".to_string()))
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "scripted".to_string(),
                requires_network: false,
            }
        }
    }

    fn beautiful() -> LookupResult {
        LookupResult {
            source_word: "beautiful".to_string(),
            translation: "hermoso".to_string(),
            target_language_name: "Spanish".to_string(),
            meaning: "pleasing the senses".to_string(),
            examples: vec![Example {
                id: "1".to_string(),
                text: "The sunset was beautiful.".to_string(),
            }],
        }
    }

    fn structured() -> SessionController {
        SessionController::new(ResultShape::Structured, 10)
    }

    #[tokio::test]
    async fn blank_input_makes_no_call_and_no_change() {
        let catalog = LanguageCatalog::default();
        let translator = ScriptedTranslator::ok();
        let mut controller = structured();

        for raw in ["", "   ", "\t\n"] {
            let before = serde_json::to_value(&controller).unwrap();
            assert!(!controller.submit_with(raw, "en", "es", &catalog, &translator).await);
            assert_eq!(serde_json::to_value(&controller).unwrap(), before);
            assert_eq!(controller.generation(), 0);
        }
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn successful_lookup_stores_result_and_history() {
        let catalog = LanguageCatalog::default();
        let translator = ScriptedTranslator::ok();
        let mut controller = structured();

        assert!(controller.submit_with("  Beautiful ", "en", "es", &catalog, &translator).await);

        assert_eq!(
            translator.calls(),
            vec![LookupRequest {
                word: "beautiful".to_string(),
                target_language: "Spanish".to_string(),
            }]
        );
        assert_eq!(controller.result(), Some(&beautiful()));
        assert_eq!(controller.status(), RequestStatus::Idle);
        assert_eq!(controller.history().len(), 1);
        assert_eq!(
            controller.history().latest().map(|e| &e.record),
            Some(&HistoryRecord::Lookup(beautiful()))
        );
    }

    #[tokio::test]
    async fn failed_lookup_clears_result_and_skips_history() {
        let catalog = LanguageCatalog::default();
        let mut controller = structured();
        controller
            .submit_with("beautiful", "en", "es", &catalog, &ScriptedTranslator::ok())
            .await;

        let failing = ScriptedTranslator::failing();
        assert!(controller.submit_with("happy", "en", "es", &catalog, &failing).await);

        assert_eq!(failing.calls()[0].word, "happy");
        assert_eq!(controller.result(), None);
        assert_eq!(controller.status(), RequestStatus::Idle);
        assert_eq!(controller.display_status(), RequestStatus::Failed);
        assert_eq!(controller.history().len(), 1);
        assert!(controller.last_failure().is_some_and(|e| e.contains("503")));
    }

    #[test]
    fn submit_is_refused_while_requesting() {
        let catalog = LanguageCatalog::default();
        let mut controller = structured();

        let first = controller.submit("one", "en", "es", &catalog);
        assert!(first.is_some());
        assert_eq!(controller.status(), RequestStatus::Requesting);

        assert_eq!(controller.submit("two", "en", "es", &catalog), None);
        assert_eq!(controller.generation(), 1);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let catalog = LanguageCatalog::default();
        let mut controller = structured();

        let first = controller.submit("one", "en", "es", &catalog).unwrap();
        controller.clear();
        let second = controller.submit("two", "en", "es", &catalog).unwrap();
        assert_ne!(first.generation(), second.generation());

        let applied = controller.complete(
            first.generation(),
            Ok(LookupPayload::Lookup(beautiful())),
            SystemTime::now(),
        );
        assert!(!applied);
        assert_eq!(controller.result(), None);
        assert_eq!(controller.status(), RequestStatus::Requesting);
        assert!(controller.history().is_empty());

        assert!(controller.complete(
            second.generation(),
            Ok(LookupPayload::Lookup(beautiful())),
            SystemTime::now(),
        ));
        assert_eq!(controller.status(), RequestStatus::Idle);
    }

    #[tokio::test]
    async fn clear_keeps_history() {
        let catalog = LanguageCatalog::default();
        let mut controller = structured();
        controller.set_input("beautiful");
        controller
            .submit_with("beautiful", "en", "es", &catalog, &ScriptedTranslator::ok())
            .await;

        controller.clear();

        assert_eq!(controller.input(), "");
        assert_eq!(controller.result(), None);
        assert_eq!(controller.history().len(), 1);
    }

    #[tokio::test]
    async fn history_is_capped_at_ten_for_lookups() {
        let catalog = LanguageCatalog::default();
        let translator = StubTranslator::new();
        let mut controller = structured();

        for i in 0..15 {
            controller
                .submit_with(&format!("word{i}"), "en", "fr", &catalog, &translator)
                .await;
        }

        assert_eq!(controller.history().len(), 10);
        let Some(HistoryRecord::Lookup(latest)) = controller.history().latest().map(|e| &e.record)
        else {
            panic!("expected lookup record");
        };
        assert_eq!(latest.source_word, "word14");
    }

    #[tokio::test]
    async fn plain_text_translation_fills_output_and_history() {
        let catalog = LanguageCatalog::default();
        let mut controller = SessionController::new(ResultShape::PlainText, 5);

        controller
            .submit_with(" Hello There ", AUTO_DETECT, "es", &catalog, &StubTranslator::new())
            .await;

        assert_eq!(controller.output(), "[Spanish] Hello There");
        assert_eq!(controller.result(), None);
        assert_eq!(
            controller.history().latest().map(|e| &e.record),
            Some(&HistoryRecord::Translation {
                source_language: "English".to_string(),
                target_language: "Spanish".to_string(),
                input_text: "Hello There".to_string(),
                output_text: "[Spanish] Hello There".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn recall_restores_entry_without_new_history() {
        let catalog = LanguageCatalog::default();
        let mut controller = structured();
        let stub = StubTranslator::new();
        controller.submit_with("first", "en", "es", &catalog, &stub).await;
        controller.submit_with("second", "en", "es", &catalog, &stub).await;

        assert!(controller.recall(1));
        assert_eq!(controller.result().map(|r| r.source_word.as_str()), Some("first"));
        assert_eq!(controller.input(), "first");
        assert_eq!(controller.history().len(), 2);
        assert!(!controller.recall(7));
    }
}
