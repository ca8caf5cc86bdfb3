use crate::document::{AutoSize, Shape};
use crate::errors::ResizeError;

// @module: Shape auto-fit adjustment

/// Re-enables text fitting on a shape after its paragraphs were reflowed
pub struct ShapeResizer;

impl ShapeResizer {
    /// Set the shape's text frame to fit text to the shape and wrap words
    ///
    /// A shape without a text frame, or a frame parsed without body
    /// properties, cannot be adjusted; the caller recovers per shape and
    /// moves on.
    pub fn apply(shape: &mut Shape) -> Result<(), ResizeError> {
        let frame = shape.text_frame.as_mut().ok_or(ResizeError::NoTextFrame)?;
        let body = frame
            .body
            .as_mut()
            .ok_or(ResizeError::MissingBodyProperties)?;
        body.auto_size = AutoSize::TextToFitShape;
        body.word_wrap = Some(true);
        Ok(())
    }
}
