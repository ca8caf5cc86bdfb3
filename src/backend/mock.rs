/*!
 * Mock backend implementation for testing.
 *
 * Simulates the behaviors the gateway has to cope with:
 * - `MockBackend::working()` - always succeeds with translated text
 * - `MockBackend::validation_failure()` - rejects every text as invalid
 * - `MockBackend::failing()` - always fails with a fatal API error
 *
 * Every request is recorded so tests can assert what reached the backend,
 * in particular that skipped text never did.
 */

use std::sync::Mutex;

use crate::backend::{
    ImportTerminologyRequest, TranslateBackend, TranslateRequest, TranslateResponse,
};
use crate::errors::BackendError;

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Rejects every text the way the service rejects oversized input
    ValidationFailure,
    /// Always fails with a fatal API error
    Failing,
}

/// Mock backend for testing translation behavior
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,

    /// Recorded translate requests
    requests: Mutex<Vec<TranslateRequest>>,

    /// Recorded terminology import names
    terminology_imports: Mutex<Vec<String>>,

    /// Custom response generator (optional)
    custom_response: Option<fn(&TranslateRequest) -> String>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        MockBackend {
            behavior,
            requests: Mutex::new(Vec::new()),
            terminology_imports: Mutex::new(Vec::new()),
            custom_response: None,
        }
    }

    /// Create a working mock backend that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock backend that rejects every text as invalid
    pub fn validation_failure() -> Self {
        Self::new(MockBehavior::ValidationFailure)
    }

    /// Create a mock backend that always fails fatally
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Use a custom response generator instead of the default echo
    pub fn with_response(mut self, custom_response: fn(&TranslateRequest) -> String) -> Self {
        self.custom_response = Some(custom_response);
        self
    }

    /// Number of translate requests that reached the backend
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or(0)
    }

    /// Copies of the recorded translate requests
    pub fn requests(&self) -> Vec<TranslateRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Names of the terminologies imported so far
    pub fn terminology_imports(&self) -> Vec<String> {
        self.terminology_imports
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

impl TranslateBackend for MockBackend {
    fn translate_text(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, BackendError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match self.behavior {
            MockBehavior::Working => {
                let translated_text = match self.custom_response {
                    Some(custom_response) => custom_response(request),
                    None => format!("[{}] {}", request.target_language_code, request.text),
                };
                Ok(TranslateResponse { translated_text })
            }
            MockBehavior::ValidationFailure => Err(BackendError::Validation(
                "text exceeds the size limit of the service".to_string(),
            )),
            MockBehavior::Failing => Err(BackendError::Api {
                status_code: 500,
                message: "internal service error".to_string(),
            }),
        }
    }

    fn import_terminology(&self, request: &ImportTerminologyRequest) -> Result<(), BackendError> {
        if let Ok(mut names) = self.terminology_imports.lock() {
            names.push(request.name.clone());
        }
        match self.behavior {
            MockBehavior::Failing => Err(BackendError::Api {
                status_code: 500,
                message: "internal service error".to_string(),
            }),
            _ => Ok(()),
        }
    }
}
