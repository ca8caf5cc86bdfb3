use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::document::model::{
    AutoSize, BodyProperties, Paragraph, Presentation, Pt, Run, Shape, Slide, TextFrame,
};
use crate::errors::DocumentError;
use crate::language_id::LanguageId;

// @module: PPTX container reading and writing

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// An opened `.pptx` file
///
/// Holds every archive part in original order plus the parsed presentation
/// model. Saving streams the parts back out, rewriting only the text bodies
/// of parsed shapes; everything else is copied verbatim. Run-level styling
/// beyond font size and language is not preserved through a rewrite.
pub struct PptxDocument {
    /// Archive parts in original order
    parts: Vec<(String, Vec<u8>)>,

    /// Part names of the slides, in presentation order
    slide_parts: Vec<String>,

    /// The mutable presentation model
    pub presentation: Presentation,
}

impl PptxDocument {
    /// Open a `.pptx` file and parse its slides into the presentation model
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let file = File::open(path.as_ref())?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| DocumentError::Zip(e.to_string()))?;

        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| DocumentError::Zip(e.to_string()))?;
            if entry.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;
            parts.push((entry.name().to_string(), data));
        }

        let slide_parts = slide_order(&parts)?;
        let mut presentation = Presentation::new();
        for name in &slide_parts {
            let data = find_part(&parts, name)?;
            let xml = std::str::from_utf8(data)
                .map_err(|e| DocumentError::Xml(format!("{}: {}", name, e)))?;
            presentation.add_slide(parse_slide_xml(xml)?);
        }
        debug!(
            "Opened presentation with {} slides across {} parts",
            presentation.slide_count(),
            parts.len()
        );

        Ok(PptxDocument {
            parts,
            slide_parts,
            presentation,
        })
    }

    /// Write the document, with the mutated model, to a new `.pptx` file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DocumentError> {
        let file = File::create(path.as_ref())?;
        let mut writer = ZipWriter::new(file);
        let options = FileOptions::default();

        for (name, data) in &self.parts {
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| DocumentError::Zip(e.to_string()))?;
            if let Some(index) = self.slide_parts.iter().position(|part| part == name) {
                let xml = std::str::from_utf8(data)
                    .map_err(|e| DocumentError::Xml(format!("{}: {}", name, e)))?;
                let rewritten = rewrite_slide_xml(xml, &self.presentation.slides[index])?;
                writer.write_all(&rewritten)?;
            } else {
                writer.write_all(data)?;
            }
        }

        writer
            .finish()
            .map_err(|e| DocumentError::Zip(e.to_string()))?;
        Ok(())
    }

    /// Part names of the slides, in presentation order
    pub fn slide_part_names(&self) -> &[String] {
        &self.slide_parts
    }
}

fn find_part<'a>(parts: &'a [(String, Vec<u8>)], name: &str) -> Result<&'a [u8], DocumentError> {
    parts
        .iter()
        .find(|(part, _)| part == name)
        .map(|(_, data)| data.as_slice())
        .ok_or_else(|| DocumentError::MissingPart(name.to_string()))
}

fn xml_error(part: &str, e: impl std::fmt::Display) -> DocumentError {
    DocumentError::Xml(format!("{}: {}", part, e))
}

/// Resolve the slide part names in presentation order
///
/// The relationships part maps relationship ids to slide parts; the
/// `sldIdLst` of the presentation part gives the order those ids appear in.
fn slide_order(parts: &[(String, Vec<u8>)]) -> Result<Vec<String>, DocumentError> {
    let rels = find_part(parts, PRESENTATION_RELS_PART)?;
    let rels_xml =
        std::str::from_utf8(rels).map_err(|e| xml_error(PRESENTATION_RELS_PART, e))?;

    let mut targets: HashMap<String, String> = HashMap::new();
    let mut reader = Reader::from_str(rels_xml);
    reader.trim_text(true);
    loop {
        match reader
            .read_event()
            .map_err(|e| xml_error(PRESENTATION_RELS_PART, e))?
        {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut id = String::new();
                let mut rel_type = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    let value = attr
                        .unescape_value()
                        .map_err(|e| xml_error(PRESENTATION_RELS_PART, e))?
                        .to_string();
                    match attr.key.as_ref() {
                        b"Id" => id = value,
                        b"Type" => rel_type = value,
                        b"Target" => target = value,
                        _ => {}
                    }
                }
                if rel_type.ends_with("/slide") {
                    // Targets are relative to ppt/ unless they start with /
                    let full = match target.strip_prefix('/') {
                        Some(stripped) => stripped.to_string(),
                        None => format!("ppt/{}", target),
                    };
                    targets.insert(id, full);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let pres = find_part(parts, PRESENTATION_PART)?;
    let pres_xml = std::str::from_utf8(pres).map_err(|e| xml_error(PRESENTATION_PART, e))?;

    let mut order = Vec::new();
    let mut reader = Reader::from_str(pres_xml);
    reader.trim_text(true);
    loop {
        match reader
            .read_event()
            .map_err(|e| xml_error(PRESENTATION_PART, e))?
        {
            Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"p:sldId" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"r:id" {
                        let id = attr
                            .unescape_value()
                            .map_err(|e| xml_error(PRESENTATION_PART, e))?
                            .to_string();
                        let target = targets.get(&id).ok_or_else(|| {
                            DocumentError::Xml(format!("unresolved slide relationship {}", id))
                        })?;
                        order.push(target.clone());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(order)
}

/// Parse one slide part into the model
///
/// The scan is a flat pass over the element stream: text bodies are collected
/// in document order, which is the same order `rewrite_slide_xml` consumes
/// them in, so grouped shapes need no special handling. Only `a:r` runs carry
/// translatable text; fields and line breaks are left to the rewrite to drop.
pub fn parse_slide_xml(xml: &str) -> Result<Slide, DocumentError> {
    let mut reader = Reader::from_str(xml);

    let mut slide = Slide::new();
    let mut shape: Option<Shape> = None;
    let mut frame: Option<TextFrame> = None;
    let mut paragraph: Option<Paragraph> = None;
    let mut run: Option<Run> = None;
    let mut in_body_properties = false;
    let mut in_paragraph_properties = false;
    let mut in_text = false;

    loop {
        let event = reader.read_event().map_err(|e| xml_error("slide", e))?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let empty = matches!(&event, Event::Empty(_));
                match e.name().as_ref() {
                    b"p:sp" if !empty => {
                        shape = Some(Shape::new());
                    }
                    b"p:pic" | b"p:graphicFrame" | b"p:cxnSp" if shape.is_none() => {
                        // No text capability; recorded so iteration can skip it
                        slide.add_shape(Shape::new());
                    }
                    b"p:txBody" => {
                        frame = Some(TextFrame::new());
                        if empty {
                            attach_frame(&mut slide, &mut shape, &mut frame);
                        }
                    }
                    b"a:bodyPr" if frame.is_some() => {
                        let mut body = BodyProperties::default();
                        for attr in e.attributes().flatten() {
                            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
                            let value = attr
                                .unescape_value()
                                .map_err(|e| xml_error("slide", e))?
                                .to_string();
                            if key == "wrap" {
                                body.word_wrap = Some(value != "none");
                            } else {
                                body.extra_attrs.push((key, value));
                            }
                        }
                        if let Some(frame) = frame.as_mut() {
                            frame.body = Some(body);
                        }
                        in_body_properties = !empty;
                    }
                    b"a:normAutofit" if in_body_properties => {
                        set_auto_size(&mut frame, AutoSize::TextToFitShape);
                    }
                    b"a:spAutoFit" if in_body_properties => {
                        set_auto_size(&mut frame, AutoSize::ShapeToFitText);
                    }
                    b"a:noAutofit" if in_body_properties => {
                        set_auto_size(&mut frame, AutoSize::None);
                    }
                    b"a:p" if frame.is_some() => {
                        if empty {
                            // Self-closing empty paragraph, kept in the model
                            if let Some(frame) = frame.as_mut() {
                                frame.paragraphs.push(Paragraph::new());
                            }
                        } else {
                            paragraph = Some(Paragraph::new());
                        }
                    }
                    b"a:pPr" if paragraph.is_some() => {
                        if let Some(paragraph) = paragraph.as_mut() {
                            for attr in e.attributes().flatten() {
                                let key =
                                    String::from_utf8_lossy(attr.key.as_ref()).to_string();
                                let value = attr
                                    .unescape_value()
                                    .map_err(|e| xml_error("slide", e))?
                                    .to_string();
                                paragraph.properties.push((key, value));
                            }
                        }
                        in_paragraph_properties = !empty;
                    }
                    b"a:defRPr" if in_paragraph_properties => {
                        if let Some(paragraph) = paragraph.as_mut() {
                            paragraph.font_size = size_attr(e).or(paragraph.font_size);
                        }
                    }
                    b"a:r" if paragraph.is_some() && !empty => {
                        run = Some(Run::default());
                    }
                    b"a:rPr" if run.is_some() => {
                        if let Some(run) = run.as_mut() {
                            run.font_size = size_attr(e);
                            run.language = language_attr(e);
                        }
                    }
                    b"a:t" if run.is_some() && !empty => {
                        in_text = true;
                    }
                    _ => {}
                }
            }
            Event::Text(ref t) if in_text => {
                if let Some(run) = run.as_mut() {
                    run.text
                        .push_str(&t.unescape().map_err(|e| xml_error("slide", e))?);
                }
            }
            Event::CData(ref t) if in_text => {
                if let Some(run) = run.as_mut() {
                    run.text.push_str(&String::from_utf8_lossy(t));
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"a:t" => in_text = false,
                b"a:rPr" => {}
                b"a:r" => {
                    if let (Some(paragraph), Some(run)) = (paragraph.as_mut(), run.take()) {
                        paragraph.runs.push(run);
                    }
                }
                b"a:pPr" => in_paragraph_properties = false,
                b"a:p" => {
                    if let (Some(frame), Some(paragraph)) = (frame.as_mut(), paragraph.take()) {
                        frame.paragraphs.push(paragraph);
                    }
                }
                b"a:bodyPr" => in_body_properties = false,
                b"p:txBody" => {
                    attach_frame(&mut slide, &mut shape, &mut frame);
                }
                b"p:sp" => {
                    if let Some(shape) = shape.take() {
                        slide.add_shape(shape);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(slide)
}

fn attach_frame(slide: &mut Slide, shape: &mut Option<Shape>, frame: &mut Option<TextFrame>) {
    match shape.as_mut() {
        Some(shape) => shape.text_frame = frame.take(),
        // A text body outside a shape element still has to be consumed in
        // order, or the rewrite pass would lose the correlation.
        None => {
            if let Some(frame) = frame.take() {
                slide.add_shape(Shape::with_text_frame(frame));
            }
        }
    }
}

fn set_auto_size(frame: &mut Option<TextFrame>, auto_size: AutoSize) {
    if let Some(body) = frame.as_mut().and_then(|frame| frame.body.as_mut()) {
        body.auto_size = auto_size;
    }
}

fn size_attr(e: &BytesStart) -> Option<Pt> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"sz" {
            return String::from_utf8_lossy(&attr.value)
                .parse::<i64>()
                .ok()
                .map(Pt::from_centipoints);
        }
    }
    None
}

fn language_attr(e: &BytesStart) -> Option<LanguageId> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"lang" {
            return LanguageId::from_ooxml_tag(&String::from_utf8_lossy(&attr.value));
        }
    }
    None
}

/// Rewrite one slide part from the mutated model
///
/// Streams the original XML through untouched except for `p:txBody`
/// subtrees, which are regenerated from the corresponding model text frame.
pub fn rewrite_slide_xml(xml: &str, slide: &Slide) -> Result<Vec<u8>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut frames = slide
        .shapes
        .iter()
        .filter_map(|shape| shape.text_frame.as_ref());

    loop {
        match reader.read_event().map_err(|e| xml_error("slide", e))? {
            Event::Start(e) if e.name().as_ref() == b"p:txBody" => {
                let frame = frames
                    .next()
                    .ok_or_else(|| DocumentError::Xml("unmatched text body".to_string()))?;
                writer
                    .write_event(Event::Start(e))
                    .map_err(|e| xml_error("slide", e))?;
                write_text_frame(&mut writer, frame)?;
                skip_element(&mut reader)?;
                writer
                    .write_event(Event::End(BytesEnd::new("p:txBody")))
                    .map_err(|e| xml_error("slide", e))?;
            }
            Event::Empty(e) if e.name().as_ref() == b"p:txBody" => {
                let frame = frames
                    .next()
                    .ok_or_else(|| DocumentError::Xml("unmatched text body".to_string()))?;
                writer
                    .write_event(Event::Start(e))
                    .map_err(|e| xml_error("slide", e))?;
                write_text_frame(&mut writer, frame)?;
                writer
                    .write_event(Event::End(BytesEnd::new("p:txBody")))
                    .map_err(|e| xml_error("slide", e))?;
            }
            Event::Eof => break,
            event => {
                writer
                    .write_event(event)
                    .map_err(|e| xml_error("slide", e))?;
            }
        }
    }

    Ok(writer.into_inner().into_inner())
}

/// Consume events up to and including the end of the current element
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), DocumentError> {
    let mut depth = 0usize;
    loop {
        match reader.read_event().map_err(|e| xml_error("slide", e))? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            Event::Eof => {
                return Err(DocumentError::Xml("unexpected end of slide part".to_string()))
            }
            _ => {}
        }
    }
}

fn write_text_frame(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    frame: &TextFrame,
) -> Result<(), DocumentError> {
    if let Some(body) = &frame.body {
        let mut element = BytesStart::new("a:bodyPr");
        for (key, value) in &body.extra_attrs {
            element.push_attribute((key.as_str(), value.as_str()));
        }
        if let Some(wrap) = body.word_wrap {
            element.push_attribute(("wrap", if wrap { "square" } else { "none" }));
        }
        match body.auto_size {
            AutoSize::None => {
                writer
                    .write_event(Event::Empty(element))
                    .map_err(|e| xml_error("slide", e))?;
            }
            AutoSize::TextToFitShape | AutoSize::ShapeToFitText => {
                let child = match body.auto_size {
                    AutoSize::TextToFitShape => "a:normAutofit",
                    _ => "a:spAutoFit",
                };
                writer
                    .write_event(Event::Start(element))
                    .map_err(|e| xml_error("slide", e))?;
                writer
                    .write_event(Event::Empty(BytesStart::new(child)))
                    .map_err(|e| xml_error("slide", e))?;
                writer
                    .write_event(Event::End(BytesEnd::new("a:bodyPr")))
                    .map_err(|e| xml_error("slide", e))?;
            }
        }
    }

    for paragraph in &frame.paragraphs {
        write_paragraph(writer, paragraph)?;
    }
    Ok(())
}

fn write_paragraph(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    paragraph: &Paragraph,
) -> Result<(), DocumentError> {
    writer
        .write_event(Event::Start(BytesStart::new("a:p")))
        .map_err(|e| xml_error("slide", e))?;

    if paragraph.font_size.is_some() || !paragraph.properties.is_empty() {
        let mut properties = BytesStart::new("a:pPr");
        for (key, value) in &paragraph.properties {
            properties.push_attribute((key.as_str(), value.as_str()));
        }
        match paragraph.font_size {
            Some(size) => {
                writer
                    .write_event(Event::Start(properties))
                    .map_err(|e| xml_error("slide", e))?;
                let mut default_run = BytesStart::new("a:defRPr");
                default_run.push_attribute(("sz", size.centipoints().to_string().as_str()));
                writer
                    .write_event(Event::Empty(default_run))
                    .map_err(|e| xml_error("slide", e))?;
                writer
                    .write_event(Event::End(BytesEnd::new("a:pPr")))
                    .map_err(|e| xml_error("slide", e))?;
            }
            None => {
                writer
                    .write_event(Event::Empty(properties))
                    .map_err(|e| xml_error("slide", e))?;
            }
        }
    }

    for run in &paragraph.runs {
        writer
            .write_event(Event::Start(BytesStart::new("a:r")))
            .map_err(|e| xml_error("slide", e))?;
        let mut properties = BytesStart::new("a:rPr");
        if let Some(language) = run.language {
            properties.push_attribute(("lang", language.ooxml_tag()));
        }
        if let Some(size) = run.font_size {
            properties.push_attribute(("sz", size.centipoints().to_string().as_str()));
        }
        writer
            .write_event(Event::Empty(properties))
            .map_err(|e| xml_error("slide", e))?;
        writer
            .write_event(Event::Start(BytesStart::new("a:t")))
            .map_err(|e| xml_error("slide", e))?;
        writer
            .write_event(Event::Text(BytesText::new(&run.text)))
            .map_err(|e| xml_error("slide", e))?;
        writer
            .write_event(Event::End(BytesEnd::new("a:t")))
            .map_err(|e| xml_error("slide", e))?;
        writer
            .write_event(Event::End(BytesEnd::new("a:r")))
            .map_err(|e| xml_error("slide", e))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("a:p")))
        .map_err(|e| xml_error("slide", e))?;
    Ok(())
}
