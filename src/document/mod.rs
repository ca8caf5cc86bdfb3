/*!
 * Document container handling.
 *
 * The in-memory presentation model lives in `model`; reading and writing the
 * `.pptx` container (a ZIP archive of XML parts) lives in `pptx`. The model is
 * constructed when a file is opened, mutated in place by the translation
 * pass, and written back by the container layer; the translation code never
 * creates or destroys a presentation itself.
 */

pub use self::model::{
    AutoSize, BodyProperties, Paragraph, Presentation, Pt, Run, Shape, Slide, TextFrame,
};
pub use self::pptx::PptxDocument;

pub mod model;
pub mod pptx;
