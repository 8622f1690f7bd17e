//! Replacement page composition.
//!
//! Draws a [`ReportRecord`] onto a fresh US-Letter page: a bordered two-row,
//! three-column data table, bold underlined "ECG" and "Observation:" labels,
//! one line per observation, and the signature image scaled to the page width
//! minus the side margins.
//!
//! Layout state is a single vertical cursor threaded through the drawing
//! steps; each step takes the current offset and returns the next one.

use crate::error::PdfError;
use crate::signature::SignatureImage;
use ecg_extract::ReportRecord;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;

const LEFT_MARGIN: f32 = 40.0;
const TABLE_WIDTH: f32 = 520.0;
const ROW_HEIGHT: f32 = 50.0;
const COLUMN_SEPARATORS: [f32; 2] = [200.0, 370.0];
const CELL_TEXT_X: [f32; 3] = [75.0, 225.0, 390.0];

const TOP_START_Y: f32 = 720.0;
const SPACE_AFTER_TABLE: f32 = 5.0;
const SECTION_HEIGHT: f32 = 5.0;
const OBSERVATION_LINE_STEP: f32 = 20.0;
const SPACE_AFTER_OBSERVATIONS: f32 = 15.0;
const IMAGE_BASELINE_DROP: f32 = 200.0;
const IMAGE_SIDE_MARGINS: f32 = 80.0;

const BODY_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";
const SIGNATURE_XOBJECT: &[u8] = b"Im1";

/// Compose the replacement page into `doc` and return its page dictionary.
///
/// The content stream and image XObject are added to `doc`; the returned
/// dictionary carries everything but `Parent`, which the caller sets when it
/// splices the page into a tree.
pub fn compose_page(
    doc: &mut Document,
    record: &ReportRecord,
    signature: &SignatureImage,
) -> Result<Dictionary, PdfError> {
    let mut ops = Vec::new();

    let y = draw_data_table(&mut ops, record, TOP_START_Y);
    let y = draw_section_label(&mut ops, "ECG", y, SECTION_HEIGHT + SPACE_AFTER_TABLE + 20.0);
    let y = draw_section_label(&mut ops, "Observation:", y, SECTION_HEIGHT + SPACE_AFTER_TABLE);
    let y = draw_observations(&mut ops, &record.observations, y);
    draw_signature(&mut ops, signature, y);

    let content = Content { operations: ops };
    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        content
            .encode()
            .map_err(|e| PdfError::Operation(format!("Content encoding failed: {}", e)))?,
    ));
    let image_id = doc.add_object(signature.to_xobject());

    let mut page = Dictionary::new();
    page.set("Type", Object::Name(b"Page".to_vec()));
    page.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ]),
    );
    page.set("Contents", Object::Reference(content_id));
    page.set(
        "Resources",
        Object::Dictionary(page_resources(image_id)),
    );

    Ok(page)
}

/// Bordered 2x3 table with one metadata field per cell. Returns the cursor
/// position below the table.
fn draw_data_table(ops: &mut Vec<Operation>, record: &ReportRecord, y: f32) -> f32 {
    stroke_rect(ops, LEFT_MARGIN, y - 2.0 * ROW_HEIGHT, TABLE_WIDTH, 2.0 * ROW_HEIGHT);
    for x in COLUMN_SEPARATORS {
        stroke_line(ops, x, y - 2.0 * ROW_HEIGHT, x, y);
    }
    stroke_line(
        ops,
        LEFT_MARGIN,
        y - ROW_HEIGHT,
        LEFT_MARGIN + TABLE_WIDTH,
        y - ROW_HEIGHT,
    );

    let row1 = [
        format!("Name: {}", record.name),
        format!("Patient ID: {}", record.patient_id),
        format!("Age: {}", record.age),
    ];
    for (x, cell) in CELL_TEXT_X.iter().zip(row1) {
        draw_text(ops, BODY_FONT, 10.0, *x, y - ROW_HEIGHT + 20.0, &cell);
    }
    let y = y - ROW_HEIGHT;

    let row2 = [
        format!("Gender: {}", record.gender),
        format!("Test date: {}", record.test_date),
        format!("Report date: {}", record.report_date),
    ];
    for (x, cell) in CELL_TEXT_X.iter().zip(row2) {
        draw_text(ops, BODY_FONT, 10.0, *x, y - ROW_HEIGHT + 20.0, &cell);
    }

    y - ROW_HEIGHT - SPACE_AFTER_TABLE - 20.0
}

/// Bold underlined section label. Returns the cursor dropped by `advance`.
fn draw_section_label(ops: &mut Vec<Operation>, text: &str, y: f32, advance: f32) -> f32 {
    draw_text(ops, BOLD_FONT, 12.0, LEFT_MARGIN, y, text);
    stroke_line(
        ops,
        LEFT_MARGIN,
        y - 2.0,
        LEFT_MARGIN + approx_text_width(text, 12.0),
        y - 2.0,
    );
    y - advance
}

/// One bold line per formatted observation.
fn draw_observations(ops: &mut Vec<Operation>, observations: &[String], mut y: f32) -> f32 {
    for observation in observations {
        draw_text(ops, BOLD_FONT, 10.0, LEFT_MARGIN, y - 20.0, observation);
        y -= OBSERVATION_LINE_STEP;
    }
    y - SPACE_AFTER_OBSERVATIONS
}

/// Signature scaled to the page width minus the side margins, aspect ratio
/// preserved.
fn draw_signature(ops: &mut Vec<Operation>, signature: &SignatureImage, y: f32) {
    let width = PAGE_WIDTH - IMAGE_SIDE_MARGINS;
    let height = width / signature.aspect_ratio();

    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "cm",
        vec![
            Object::Real(width),
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(height),
            Object::Real(LEFT_MARGIN),
            Object::Real(y - IMAGE_BASELINE_DROP),
        ],
    ));
    ops.push(Operation::new(
        "Do",
        vec![Object::Name(SIGNATURE_XOBJECT.to_vec())],
    ));
    ops.push(Operation::new("Q", vec![]));
}

fn draw_text(ops: &mut Vec<Operation>, font: &[u8], size: f32, x: f32, y: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.to_vec()), Object::Real(size)],
    ));
    ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(
            text.as_bytes().to_vec(),
            lopdf::StringFormat::Literal,
        )],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn stroke_rect(ops: &mut Vec<Operation>, x: f32, y: f32, width: f32, height: f32) {
    ops.push(Operation::new(
        "re",
        vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(width),
            Object::Real(height),
        ],
    ));
    ops.push(Operation::new("S", vec![]));
}

fn stroke_line(ops: &mut Vec<Operation>, x1: f32, y1: f32, x2: f32, y2: f32) {
    ops.push(Operation::new("m", vec![Object::Real(x1), Object::Real(y1)]));
    ops.push(Operation::new("l", vec![Object::Real(x2), Object::Real(y2)]));
    ops.push(Operation::new("S", vec![]));
}

/// Underline length estimate from Helvetica's average glyph width. Close
/// enough for a label underline without carrying font metrics.
fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.6
}

fn page_resources(image_id: lopdf::ObjectId) -> Dictionary {
    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Dictionary(standard_font(b"Helvetica")));
    fonts.set("F2", Object::Dictionary(standard_font(b"Helvetica-Bold")));

    let mut xobjects = Dictionary::new();
    xobjects.set("Im1", Object::Reference(image_id));

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    resources.set("XObject", Object::Dictionary(xobjects));
    resources
}

fn standard_font(base_font: &[u8]) -> Dictionary {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(base_font.to_vec()));
    font
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_signature() -> SignatureImage {
        SignatureImage::from_rgb8(4, 2, vec![0xFF; 24]).unwrap()
    }

    fn test_record() -> ReportRecord {
        ReportRecord {
            name: "John Smith".into(),
            patient_id: "P-1042".into(),
            age: "45".into(),
            gender: "Male".into(),
            test_date: "2024-04-30".into(),
            report_date: "2024-05-01".into(),
            observations: vec!["1. Sinus rhythm".into(), "2. Normal axis".into()],
        }
    }

    fn composed_operations(record: &ReportRecord) -> Vec<Operation> {
        let mut doc = Document::with_version("1.7");
        let page = compose_page(&mut doc, record, &test_signature()).unwrap();

        let content_id = page.get(b"Contents").unwrap().as_reference().unwrap();
        let stream = doc.get_object(content_id).unwrap().as_stream().unwrap();
        Content::decode(&stream.content).unwrap().operations
    }

    fn real(obj: &Object) -> f32 {
        match obj {
            Object::Real(f) => *f,
            Object::Integer(i) => *i as f32,
            other => panic!("expected numeric operand, got {:?}", other),
        }
    }

    fn drawn_strings(ops: &[Operation]) -> Vec<String> {
        ops.iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_page_draws_all_cells_labels_and_observations() {
        let ops = composed_operations(&test_record());
        let strings = drawn_strings(&ops);

        assert_eq!(
            strings,
            vec![
                "Name: John Smith",
                "Patient ID: P-1042",
                "Age: 45",
                "Gender: Male",
                "Test date: 2024-04-30",
                "Report date: 2024-05-01",
                "ECG",
                "Observation:",
                "1. Sinus rhythm",
                "2. Normal axis",
            ]
        );
    }

    #[test]
    fn test_page_draws_table_border_and_separators() {
        let ops = composed_operations(&test_record());
        let rects = ops.iter().filter(|op| op.operator == "re").count();
        let lines = ops.iter().filter(|op| op.operator == "m").count();

        assert_eq!(rects, 1);
        // Two column separators, one row separator, two label underlines.
        assert_eq!(lines, 5);
    }

    #[test]
    fn test_page_references_signature_xobject() {
        let ops = composed_operations(&test_record());
        let draws: Vec<_> = ops.iter().filter(|op| op.operator == "Do").collect();

        assert_eq!(draws.len(), 1);
        assert_eq!(
            draws[0].operands,
            vec![Object::Name(b"Im1".to_vec())]
        );
    }

    #[test]
    fn test_signature_scaled_to_page_width_preserving_aspect() {
        let ops = composed_operations(&test_record());
        let cm = ops.iter().find(|op| op.operator == "cm").unwrap();

        let width = real(&cm.operands[0]);
        let height = real(&cm.operands[3]);
        assert_eq!(width, PAGE_WIDTH - IMAGE_SIDE_MARGINS);
        // 4x2 test image has aspect ratio 2.
        assert_eq!(height, width / 2.0);
    }

    #[test]
    fn test_empty_record_still_composes() {
        let ops = composed_operations(&ReportRecord::default());
        let strings = drawn_strings(&ops);

        assert!(strings.contains(&"Name: ".to_string()));
        assert!(strings.contains(&"ECG".to_string()));
        assert!(strings.contains(&"Observation:".to_string()));
        // No observation lines, but the image still draws.
        assert_eq!(ops.iter().filter(|op| op.operator == "Do").count(), 1);
    }

    #[test]
    fn test_observation_lines_step_down_the_page() {
        let record = ReportRecord {
            observations: vec!["1. A".into(), "2. B".into(), "3. C".into()],
            ..Default::default()
        };
        let ops = composed_operations(&record);

        let mut text_y = Vec::new();
        let mut is_bold_10 = false;
        for op in &ops {
            match op.operator.as_str() {
                "Tf" => {
                    is_bold_10 = op.operands.first() == Some(&Object::Name(b"F2".to_vec()))
                        && op.operands.get(1).map(real) == Some(10.0);
                }
                "Td" if is_bold_10 => {
                    text_y.push(real(&op.operands[1]));
                }
                _ => {}
            }
        }

        assert_eq!(text_y.len(), 3);
        assert_eq!(text_y[0] - text_y[1], OBSERVATION_LINE_STEP);
        assert_eq!(text_y[1] - text_y[2], OBSERVATION_LINE_STEP);
    }
}
