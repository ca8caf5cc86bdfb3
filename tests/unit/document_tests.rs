/*!
 * Tests for slide XML parsing and rewriting
 */

use pptx_translator::document::pptx::{parse_slide_xml, rewrite_slide_xml};
use pptx_translator::document::{AutoSize, PptxDocument, Pt};
use pptx_translator::language_id::LanguageId;

use crate::common::{write_minimal_pptx, SLIDE_XML_HELLO, SLIDE_XML_MIXED};

/// Test that a sized paragraph parses into the model
#[test]
fn test_parse_slide_withSizedParagraph_shouldBuildModel() {
    let slide = parse_slide_xml(SLIDE_XML_HELLO).unwrap();

    assert_eq!(slide.shapes.len(), 1);
    let frame = slide.shapes[0].text_frame.as_ref().unwrap();

    let body = frame.body.as_ref().unwrap();
    assert_eq!(body.word_wrap, Some(false));
    assert_eq!(body.auto_size, AutoSize::None);
    assert!(body
        .extra_attrs
        .contains(&("anchor".to_string(), "ctr".to_string())));

    assert_eq!(frame.paragraphs.len(), 1);
    let paragraph = &frame.paragraphs[0];
    assert_eq!(paragraph.font_size, Some(Pt::new(20.0)));
    assert!(paragraph
        .properties
        .contains(&("algn".to_string(), "ctr".to_string())));

    assert_eq!(paragraph.runs.len(), 1);
    assert_eq!(paragraph.runs[0].text, "Hello");
    assert_eq!(paragraph.runs[0].font_size, Some(Pt::new(20.0)));
    assert_eq!(paragraph.runs[0].language, Some(LanguageId::EnglishUs));
}

/// Test that shapes without text and multi-run paragraphs parse correctly
#[test]
fn test_parse_slide_withMixedShapes_shouldTrackTextCapability() {
    let slide = parse_slide_xml(SLIDE_XML_MIXED).unwrap();

    assert_eq!(slide.shapes.len(), 2);
    assert!(!slide.shapes[0].has_text_frame());
    assert!(slide.shapes[1].has_text_frame());

    let frame = slide.shapes[1].text_frame.as_ref().unwrap();
    let paragraph = &frame.paragraphs[0];
    assert_eq!(paragraph.font_size, None);
    assert_eq!(paragraph.runs.len(), 2);
    assert_eq!(paragraph.text(), "Good morning");
    // Leading/trailing spaces inside a run are significant
    assert_eq!(paragraph.runs[0].text, "Good ");
}

/// Test that rewriting carries model mutations and preserves the rest
#[test]
fn test_rewrite_slide_withMutatedModel_shouldCarryChanges() {
    let mut slide = parse_slide_xml(SLIDE_XML_HELLO).unwrap();
    {
        let frame = slide.shapes[0].text_frame.as_mut().unwrap();
        let body = frame.body.as_mut().unwrap();
        body.auto_size = AutoSize::TextToFitShape;
        body.word_wrap = Some(true);

        let paragraph = &mut frame.paragraphs[0];
        paragraph.font_size = Some(Pt::new(17.0));
        let run = paragraph.append_run();
        run.text = " Bonjour".to_string();
        run.font_size = Some(Pt::new(17.0));
        run.language = Some(LanguageId::French);
    }

    let rewritten = rewrite_slide_xml(SLIDE_XML_HELLO, &slide).unwrap();
    let xml = String::from_utf8(rewritten).unwrap();

    // Everything outside the text body is untouched
    assert!(xml.contains(r#"<p:cNvPr id="2" name="Title 1"/>"#));
    // The mutated body properties and sizes are written back
    assert!(xml.contains(r#"wrap="square""#));
    assert!(xml.contains("<a:normAutofit/>"));
    assert!(xml.contains(r#"<a:defRPr sz="1700"/>"#));
    assert!(xml.contains(r#"<a:rPr lang="fr-FR" sz="1700"/>"#));
    assert!(xml.contains("<a:t> Bonjour</a:t>"));
    assert!(xml.contains("<a:t>Hello</a:t>"));
}

/// Test that the rewritten slide parses back to the mutated model
#[test]
fn test_rewrite_slide_shouldRoundTripThroughParse() {
    let mut slide = parse_slide_xml(SLIDE_XML_MIXED).unwrap();
    {
        let frame = slide.shapes[1].text_frame.as_mut().unwrap();
        let run = frame.paragraphs[0].append_run();
        run.text = " Guten Morgen".to_string();
        run.language = Some(LanguageId::German);
    }

    let rewritten = rewrite_slide_xml(SLIDE_XML_MIXED, &slide).unwrap();
    let reparsed = parse_slide_xml(std::str::from_utf8(&rewritten).unwrap()).unwrap();

    assert_eq!(reparsed.shapes.len(), 2);
    let frame = reparsed.shapes[1].text_frame.as_ref().unwrap();
    assert_eq!(frame.paragraphs[0].runs.len(), 3);
    assert_eq!(frame.paragraphs[0].text(), "Good morning Guten Morgen");
    assert_eq!(
        frame.paragraphs[0].runs[2].language,
        Some(LanguageId::German)
    );
}

/// Test opening and saving a whole archive
#[test]
fn test_open_and_save_withMinimalArchive_shouldRoundTrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("deck.pptx");
    write_minimal_pptx(&input, &[SLIDE_XML_HELLO, SLIDE_XML_MIXED]);

    let mut document = PptxDocument::open(&input).unwrap();
    assert_eq!(document.presentation.slide_count(), 2);
    assert_eq!(
        document.slide_part_names(),
        &["ppt/slides/slide1.xml", "ppt/slides/slide2.xml"]
    );

    // Mutate slide 1 and save
    {
        let frame = document.presentation.slides[0].shapes[0]
            .text_frame
            .as_mut()
            .unwrap();
        let run = frame.paragraphs[0].append_run();
        run.text = " Bonjour".to_string();
        run.language = Some(LanguageId::French);
    }
    let output = dir.path().join("deck-out.pptx");
    document.save(&output).unwrap();

    let reopened = PptxDocument::open(&output).unwrap();
    assert_eq!(reopened.presentation.slide_count(), 2);
    let frame = reopened.presentation.slides[0].shapes[0]
        .text_frame
        .as_ref()
        .unwrap();
    assert_eq!(frame.paragraphs[0].runs.len(), 2);
    assert_eq!(frame.paragraphs[0].runs[1].text, " Bonjour");
    // The untouched slide survives byte-for-byte semantics
    let frame = reopened.presentation.slides[1].shapes[1]
        .text_frame
        .as_ref()
        .unwrap();
    assert_eq!(frame.paragraphs[0].text(), "Good morning");
}

/// Test the failure for an archive that is not a presentation
#[test]
fn test_open_withMissingParts_shouldFail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.pptx");
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("hello.txt", zip::write::FileOptions::default())
        .unwrap();
    use std::io::Write as _;
    writer.write_all(b"not a deck").unwrap();
    writer.finish().unwrap();

    assert!(PptxDocument::open(&path).is_err());
}
