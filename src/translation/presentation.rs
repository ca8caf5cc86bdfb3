use log::{info, warn};

use crate::document::{Presentation, Slide};
use crate::errors::TranslateError;
use crate::translation::gateway::TranslationGateway;
use crate::translation::reflow::RunReflowEngine;
use crate::translation::resize::ShapeResizer;

// @module: Whole-presentation translation pass

/// Walks a presentation and translates it in place
///
/// Slides, shapes and paragraphs are visited strictly in document order.
/// Shapes without a text frame are skipped entirely; each remaining shape has
/// every paragraph reflowed and is then resized once. A resize failure is
/// recovered per shape; translation failures abort the presentation.
pub struct PresentationTranslator {
    gateway: TranslationGateway,
    engine: RunReflowEngine,
}

impl PresentationTranslator {
    pub fn new(gateway: TranslationGateway, engine: RunReflowEngine) -> Self {
        PresentationTranslator { gateway, engine }
    }

    pub fn gateway(&self) -> &TranslationGateway {
        &self.gateway
    }

    /// Translate every slide of the presentation
    pub fn translate(&self, presentation: &mut Presentation) -> Result<(), TranslateError> {
        let slide_count = presentation.slide_count();
        for (index, slide) in presentation.slides.iter_mut().enumerate() {
            info!("Slide {} of {}", index + 1, slide_count);
            self.translate_slide(slide)?;
        }
        Ok(())
    }

    fn translate_slide(&self, slide: &mut Slide) -> Result<(), TranslateError> {
        for shape in &mut slide.shapes {
            if !shape.has_text_frame() {
                continue;
            }
            if let Some(frame) = shape.text_frame.as_mut() {
                for paragraph in &mut frame.paragraphs {
                    self.engine.reflow(paragraph, &self.gateway)?;
                }
            }
            if let Err(e) = ShapeResizer::apply(shape) {
                warn!("Could not enable auto-fit on shape: {}", e);
            }
        }
        Ok(())
    }
}
