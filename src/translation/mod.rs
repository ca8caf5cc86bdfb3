/*!
 * Translation of presentations, paragraph by paragraph.
 *
 * This module contains the core translation-and-reflow logic:
 *
 * - `gateway`: skip rules and error tolerance in front of the backend
 * - `reflow`: the per-paragraph translate-and-refit algorithm
 * - `resize`: auto-fit adjustment of a shape after its paragraphs are done
 * - `presentation`: iteration over slides, shapes and paragraphs
 */

// Re-export main types for easier usage
pub use self::gateway::TranslationGateway;
pub use self::presentation::PresentationTranslator;
pub use self::reflow::{ReflowSettings, RunReflowEngine};
pub use self::resize::ShapeResizer;

pub mod gateway;
pub mod presentation;
pub mod reflow;
pub mod resize;
