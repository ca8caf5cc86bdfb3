use crate::document::{Paragraph, Pt};
use crate::errors::TranslateError;
use crate::language_id::LanguageId;
use crate::translation::gateway::TranslationGateway;

// @module: Per-paragraph translate-and-refit

/// Tuning knobs for the reflow pass
///
/// Translated text tends to run longer than its source, so sizes are stepped
/// down before translation and sufficiently small text is left alone rather
/// than degraded further. The defaults are the values that have worked on
/// real decks; neither falls out of a layout model.
#[derive(Debug, Clone, Copy)]
pub struct ReflowSettings {
    /// How far the font size steps down to make room, in points
    pub shrink_step: Pt,

    /// Text at or below this size after shrinking is left untranslated
    pub min_translate_size: Pt,
}

impl Default for ReflowSettings {
    fn default() -> Self {
        ReflowSettings {
            shrink_step: Pt::new(3.0),
            min_translate_size: Pt::new(13.0),
        }
    }
}

/// The per-paragraph translation algorithm
///
/// Mutates a paragraph in place: the concatenated text of its runs is
/// translated as one unit and attached as a new run appended after the
/// originals, with font sizes stepped down so the combined text still has a
/// chance of fitting its shape.
pub struct RunReflowEngine {
    dest_language_code: String,
    settings: ReflowSettings,
}

impl RunReflowEngine {
    pub fn new(dest_language_code: impl Into<String>, settings: ReflowSettings) -> Self {
        RunReflowEngine {
            dest_language_code: dest_language_code.into(),
            settings,
        }
    }

    pub fn settings(&self) -> &ReflowSettings {
        &self.settings
    }

    /// Translate one paragraph and refit its runs
    ///
    /// Steps:
    /// 1. concatenate the text of the existing runs, in order; run
    ///    boundaries are presentational, the paragraph is the unit of
    ///    translation;
    /// 2. append a new empty run that will carry the translated text;
    /// 3. propagate font size: an explicit paragraph size steps down and is
    ///    mirrored onto the new run; otherwise an explicit size on the first
    ///    existing run steps down and is normalized across every run; with
    ///    neither, the new run inherits;
    /// 4. translate only if the new run's size is unset or still above the
    ///    small-print threshold after shrinking;
    /// 5. attach the translated text behind a single separating space and tag
    ///    the new run with the destination language. The tag is set even when
    ///    nothing was translated, so the appended run is always well-formed.
    pub fn reflow(
        &self,
        paragraph: &mut Paragraph,
        gateway: &TranslationGateway,
    ) -> Result<(), TranslateError> {
        // Resolved before anything can go out on the wire
        let language = LanguageId::resolve(&self.dest_language_code)?;

        let source_text = paragraph.text();
        let first_run_size = paragraph.runs.first().and_then(|run| run.font_size);

        let new_size = if let Some(size) = paragraph.font_size {
            let reduced = size - self.settings.shrink_step;
            paragraph.font_size = Some(reduced);
            Some(reduced)
        } else if let Some(size) = first_run_size {
            let reduced = size - self.settings.shrink_step;
            for run in &mut paragraph.runs {
                run.font_size = Some(reduced);
            }
            Some(reduced)
        } else {
            None
        };

        let translate = match new_size {
            Some(size) => size > self.settings.min_translate_size,
            None => true,
        };

        let translated = if translate {
            gateway.translate(&source_text)?
        } else {
            None
        };

        let run = paragraph.append_run();
        run.font_size = new_size;
        run.language = Some(language);
        if let Some(text) = translated {
            run.text = format!(" {}", text);
        }
        Ok(())
    }
}
