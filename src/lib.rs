/*!
 * # pptx-translator
 *
 * A Rust library and CLI for batch translation of PowerPoint decks.
 *
 * ## Features
 *
 * - Translate the visible text of .pptx files between languages
 * - Preserve layout by stepping font sizes down and re-enabling auto-fit
 * - Steer domain terms with a custom terminology uploaded to the backend
 * - Skip URLs and configurable placeholder text
 * - Batch processing of a whole input directory
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Presentation model and .pptx container handling
 * - `translation`: The translation-and-reflow pass:
 *   - `translation::gateway`: Skip rules and error tolerance
 *   - `translation::reflow`: Per-paragraph translate-and-refit
 *   - `translation::resize`: Shape auto-fit adjustment
 *   - `translation::presentation`: Slide/shape/paragraph iteration
 * - `backend`: Translation service clients:
 *   - `backend::aws`: Amazon Translate client
 *   - `backend::mock`: Mock backend for tests
 * - `language_id`: Language code registry
 * - `skip_text`: Skip-text resource loading
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod backend;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_id;
pub mod skip_text;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use document::{Paragraph, Presentation, PptxDocument, Pt, Run, Shape, Slide, TextFrame};
pub use errors::{AppError, BackendError, DocumentError, ResizeError, TranslateError};
pub use language_id::LanguageId;
pub use skip_text::{SkipText, SkipTextStore};
pub use translation::{
    PresentationTranslator, ReflowSettings, RunReflowEngine, ShapeResizer, TranslationGateway,
};
