/*!
 * Common test utilities shared by the unit and integration tests.
 */

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use pptx_translator::backend::mock::MockBackend;
use pptx_translator::document::{Paragraph, Pt, Run};
use pptx_translator::skip_text::SkipText;
use pptx_translator::translation::TranslationGateway;

/// A run with the given text and an optional explicit size in points
pub fn run(text: &str, size: Option<f32>) -> Run {
    let mut run = Run::new(text);
    run.font_size = size.map(Pt::new);
    run
}

/// A paragraph from runs, with an optional paragraph-level size in points
pub fn paragraph(runs: Vec<Run>, size: Option<f32>) -> Paragraph {
    let mut paragraph = Paragraph::new();
    paragraph.runs = runs;
    paragraph.font_size = size.map(Pt::new);
    paragraph
}

/// A gateway over a shared mock backend
pub fn gateway(
    backend: &Arc<MockBackend>,
    skip: &str,
    source: &str,
    dest: &str,
) -> TranslationGateway {
    TranslationGateway::new(
        Box::new(Arc::clone(backend)),
        SkipText::new(skip),
        source,
        dest,
        Vec::new(),
    )
}

/// Slide XML with one shape: "Hello" in a 20pt paragraph
pub const SLIDE_XML_HELLO: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr wrap="none" anchor="ctr"/><a:p><a:pPr algn="ctr"><a:defRPr sz="2000"/></a:pPr><a:r><a:rPr lang="en-US" sz="2000"/><a:t>Hello</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;

/// Slide XML with a picture (no text) and a two-run unsized paragraph
pub const SLIDE_XML_MIXED: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:pic><p:nvPicPr><p:cNvPr id="4" name="Picture 3"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr></p:pic><p:sp><p:nvSpPr><p:cNvPr id="5" name="Content 4"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="en-US"/><a:t>Good </a:t></a:r><a:r><a:rPr lang="en-US"/><a:t>morning</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#;

/// Write a minimal .pptx archive containing the given slides, in order
pub fn write_minimal_pptx(path: &Path, slide_xmls: &[&str]) {
    let file = File::create(path).expect("create pptx fixture");
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::FileOptions::default();

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(CONTENT_TYPES_XML.as_bytes()).unwrap();

    writer.start_file("_rels/.rels", options).unwrap();
    writer.write_all(ROOT_RELS_XML.as_bytes()).unwrap();

    let mut slide_ids = String::new();
    let mut relationships = String::new();
    for (index, _) in slide_xmls.iter().enumerate() {
        let number = index + 1;
        slide_ids.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            255 + number,
            number
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            number, number
        ));
    }

    writer.start_file("ppt/presentation.xml", options).unwrap();
    writer
        .write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
                slide_ids
            )
            .as_bytes(),
        )
        .unwrap();

    writer
        .start_file("ppt/_rels/presentation.xml.rels", options)
        .unwrap();
    writer
        .write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                relationships
            )
            .as_bytes(),
        )
        .unwrap();

    for (index, slide_xml) in slide_xmls.iter().enumerate() {
        writer
            .start_file(format!("ppt/slides/slide{}.xml", index + 1), options)
            .unwrap();
        writer.write_all(slide_xml.as_bytes()).unwrap();
    }

    writer.finish().unwrap();
}
