/*!
 * Error types for the pptx-translator application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend rejected the input text (oversized or otherwise invalid).
    /// This is the one backend failure the caller is expected to recover from.
    #[error("Backend rejected the text: {0}")]
    Validation(String),

    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication or credential resolution
    #[error("Authentication error: {0}")]
    Authentication(String),
}

impl BackendError {
    /// Whether this failure is recoverable by leaving the text untranslated
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Errors that can occur during translation of a presentation
#[derive(Error, Debug)]
pub enum TranslateError {
    /// The destination language has no document-native representation
    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    /// Error from the translation backend
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Errors that can occur while reading or writing the document container
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Error from a file operation
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the ZIP archive layer
    #[error("Archive error: {0}")]
    Zip(String),

    /// Error parsing or rewriting an XML part
    #[error("XML error: {0}")]
    Xml(String),

    /// A part the container format requires is absent
    #[error("Missing archive part: {0}")]
    MissingPart(String),
}

/// Failure to enable auto-fit on a shape, recovered per shape
#[derive(Error, Debug)]
pub enum ResizeError {
    /// The shape has no text frame at all
    #[error("Shape has no text frame")]
    NoTextFrame,

    /// The text frame was parsed without body properties to adjust
    #[error("Text frame has no body properties")]
    MissingBodyProperties,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the document container
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslateError),

    /// Error from the translation backend
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
