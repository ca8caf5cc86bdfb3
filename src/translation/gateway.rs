use log::{debug, warn};

use crate::backend::{TranslateBackend, TranslateRequest};
use crate::errors::BackendError;
use crate::skip_text::SkipText;

// @module: Skip rules and error tolerance in front of the backend

/// Thin adapter between the reflow engine and the translation backend
///
/// Holds the language pair, the terminology names and the skip text for a
/// whole batch run, so the per-paragraph call site only carries the text.
pub struct TranslationGateway {
    // @field: The backend client
    backend: Box<dyn TranslateBackend>,

    // @field: Text that must never be translated
    skip: SkipText,

    // @field: Source language code
    source_language_code: String,

    // @field: Destination language code
    dest_language_code: String,

    // @field: Terminologies applied to every request
    terminology_names: Vec<String>,
}

impl TranslationGateway {
    pub fn new(
        backend: Box<dyn TranslateBackend>,
        skip: SkipText,
        source_language_code: impl Into<String>,
        dest_language_code: impl Into<String>,
        terminology_names: Vec<String>,
    ) -> Self {
        TranslationGateway {
            backend,
            skip,
            source_language_code: source_language_code.into(),
            dest_language_code: dest_language_code.into(),
            terminology_names,
        }
    }

    pub fn source_language_code(&self) -> &str {
        &self.source_language_code
    }

    pub fn dest_language_code(&self) -> &str {
        &self.dest_language_code
    }

    /// Translate one piece of text, or decide not to
    ///
    /// `Ok(None)` means the text was deliberately left untranslated: it was
    /// empty, matched the skip text, looked like a URL, or the backend
    /// rejected it as invalid (oversized input and the like). Only failures
    /// that should abort the current file surface as errors.
    pub fn translate(&self, text: &str) -> Result<Option<String>, BackendError> {
        if text.is_empty() {
            return Ok(None);
        }
        if self.skip.matches(text) {
            debug!("Skipping text matching the skip rule");
            return Ok(None);
        }
        if text.starts_with("http") {
            debug!("Skipping URL text");
            return Ok(None);
        }

        let request = TranslateRequest {
            text: text.to_string(),
            source_language_code: self.source_language_code.clone(),
            target_language_code: self.dest_language_code.clone(),
            terminology_names: self.terminology_names.clone(),
        };
        match self.backend.translate_text(&request) {
            Ok(response) => Ok(Some(response.translated_text)),
            Err(BackendError::Validation(message)) => {
                warn!("Invalid text, ignoring: {}", message);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
