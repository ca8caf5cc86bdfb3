/*!
 * Translation backend clients.
 *
 * This module defines the interface the rest of the application uses to talk
 * to a text-translation service, plus the client implementations:
 * - `aws`: Amazon Translate over its JSON REST protocol
 * - `mock`: configurable in-memory backend for tests
 */

use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::BackendError;

/// A request to translate one piece of text
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    /// The text to translate
    pub text: String,

    /// Source language code (e.g. "en")
    pub source_language_code: String,

    /// Destination language code (e.g. "fr")
    pub target_language_code: String,

    /// Custom terminologies to apply, possibly empty
    pub terminology_names: Vec<String>,
}

/// The translated text returned by the backend
#[derive(Debug, Clone)]
pub struct TranslateResponse {
    /// The translated text
    pub translated_text: String,
}

/// How an imported terminology merges with an existing one of the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Replace the existing terminology wholesale
    Overwrite,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "OVERWRITE",
        }
    }
}

/// A request to upload a custom terminology ahead of translation
#[derive(Debug, Clone)]
pub struct ImportTerminologyRequest {
    /// Name the terminology is stored under
    pub name: String,

    /// Merge strategy for an existing terminology of the same name
    pub merge_strategy: MergeStrategy,

    /// Raw CSV bytes
    pub data: Vec<u8>,
}

/// Common trait for translation backends
///
/// Synchronous by design: the caller processes one paragraph at a time and
/// blocks on the round trip. A `BackendError::Validation` failure means the
/// input itself was rejected and the caller may continue without a
/// translation; any other error is fatal for the document being processed.
pub trait TranslateBackend: Send + Sync + Debug {
    /// Translate one piece of text
    fn translate_text(&self, request: &TranslateRequest)
        -> Result<TranslateResponse, BackendError>;

    /// Upload a custom terminology
    fn import_terminology(&self, request: &ImportTerminologyRequest) -> Result<(), BackendError>;
}

impl<T: TranslateBackend + ?Sized> TranslateBackend for Arc<T> {
    fn translate_text(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, BackendError> {
        (**self).translate_text(request)
    }

    fn import_terminology(&self, request: &ImportTerminologyRequest) -> Result<(), BackendError> {
        (**self).import_terminology(request)
    }
}

pub mod aws;
pub mod mock;
