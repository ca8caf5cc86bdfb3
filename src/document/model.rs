use std::fmt;
use std::ops::{Add, Sub};

use crate::language_id::LanguageId;

// @module: In-memory presentation model

/// Font size in points
///
/// The container stores sizes in hundredths of a point (`sz="1800"` is 18pt);
/// absence of a size means "inherit from paragraph or higher scope" and is
/// modeled as `Option<Pt>` wherever it can occur.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Pt(pub f32);

impl Pt {
    pub fn new(points: f32) -> Self {
        Pt(points)
    }

    /// Parse from the container's centipoint representation
    pub fn from_centipoints(centipoints: i64) -> Self {
        Pt(centipoints as f32 / 100.0)
    }

    /// Value written back into the container's `sz` attribute
    pub fn centipoints(self) -> i64 {
        (self.0 * 100.0).round() as i64
    }
}

impl Add for Pt {
    type Output = Pt;

    fn add(self, rhs: Pt) -> Pt {
        Pt(self.0 + rhs.0)
    }
}

impl Sub for Pt {
    type Output = Pt;

    fn sub(self, rhs: Pt) -> Pt {
        Pt(self.0 - rhs.0)
    }
}

impl fmt::Display for Pt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

/// Auto-size behavior of a text frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoSize {
    /// No automatic fitting
    #[default]
    None,
    /// Grow the shape to fit its text
    ShapeToFitText,
    /// Shrink the text to fit the shape's bounds
    TextToFitShape,
}

/// A contiguous span of identically-formatted text within a paragraph
#[derive(Debug, Clone, Default)]
pub struct Run {
    /// Literal text
    pub text: String,

    /// Explicit font size, absent means inherited
    pub font_size: Option<Pt>,

    /// Language identifier tagged on the run
    pub language: Option<LanguageId>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            font_size: None,
            language: None,
        }
    }
}

/// An ordered sequence of runs with optional paragraph-level formatting
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    /// Runs in document order
    pub runs: Vec<Run>,

    /// Paragraph-level font size, absent means inherited
    pub font_size: Option<Pt>,

    /// Paragraph property attributes carried through rewriting untouched
    /// (alignment, indent levels and the like)
    pub properties: Vec<(String, String)>,
}

impl Paragraph {
    pub fn new() -> Self {
        Paragraph::default()
    }

    /// Concatenated text of every run, in order
    ///
    /// Run boundaries are presentational, not semantic, so the concatenation
    /// is the unit handed to translation.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Append a new empty run and return it
    ///
    /// This is the only way a run is added during reflow; the appended run is
    /// always the last run of the paragraph.
    pub fn append_run(&mut self) -> &mut Run {
        self.runs.push(Run::default());
        self.runs.last_mut().expect("just pushed")
    }
}

/// Body properties of a text frame
///
/// Attributes other than word wrap are preserved verbatim so that enabling
/// auto-fit does not clobber unrelated settings like anchoring.
#[derive(Debug, Clone, Default)]
pub struct BodyProperties {
    /// Auto-size behavior
    pub auto_size: AutoSize,

    /// Word wrap flag, absent means inherited
    pub word_wrap: Option<bool>,

    /// Remaining attributes, carried through rewriting untouched
    pub extra_attrs: Vec<(String, String)>,
}

/// The text container of a shape
#[derive(Debug, Clone, Default)]
pub struct TextFrame {
    /// Paragraphs in document order
    pub paragraphs: Vec<Paragraph>,

    /// Body properties; a frame parsed without them cannot be resized
    pub body: Option<BodyProperties>,
}

impl TextFrame {
    pub fn new() -> Self {
        TextFrame::default()
    }
}

/// A drawable element on a slide
#[derive(Debug, Clone, Default)]
pub struct Shape {
    /// Text capability; shapes without one are skipped entirely
    pub text_frame: Option<TextFrame>,
}

impl Shape {
    pub fn new() -> Self {
        Shape::default()
    }

    pub fn with_text_frame(frame: TextFrame) -> Self {
        Shape {
            text_frame: Some(frame),
        }
    }

    pub fn has_text_frame(&self) -> bool {
        self.text_frame.is_some()
    }
}

/// An ordered sequence of shapes
#[derive(Debug, Clone, Default)]
pub struct Slide {
    pub shapes: Vec<Shape>,
}

impl Slide {
    pub fn new() -> Self {
        Slide::default()
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

/// An ordered sequence of slides, mutated in place by translation
#[derive(Debug, Clone, Default)]
pub struct Presentation {
    pub slides: Vec<Slide>,
}

impl Presentation {
    pub fn new() -> Self {
        Presentation::default()
    }

    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}
