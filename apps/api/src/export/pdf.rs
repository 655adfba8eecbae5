//! PDF encoder for paginated text.
//!
//! Builds the document object-by-object with lopdf: one Helvetica font shared by every
//! page, one uncompressed content stream per page. Output is byte-identical for the
//! same pages, layout and metadata; the creation date comes from `DocumentMetadata`.

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::export::paginator::{Page, PageLayout};
use crate::export::ExportError;

#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Encodes `pages` as a PDF. An empty slice still yields a valid single blank page.
pub fn encode_as_document(
    pages: &[Page],
    layout: &PageLayout,
    metadata: &DocumentMetadata,
) -> Result<Vec<u8>, ExportError> {
    let blank = [Page::default()];
    let pages = if pages.is_empty() { &blank[..] } else { pages };

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![(
            "F1",
            Object::Reference(font_id),
        )])),
    )]));

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, layout);
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Encode(format!("content stream: {e}")))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(layout.media_width as i64),
                    Object::Integer(layout.media_height as i64),
                ]),
            ),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        page_ids.push(page_id);
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    let info_id = doc.add_object(Dictionary::from_iter(vec![
        (
            "Title",
            Object::String(encode_text(&metadata.title), StringFormat::Literal),
        ),
        (
            "Producer",
            Object::String(b"consent-api".to_vec(), StringFormat::Literal),
        ),
        (
            "CreationDate",
            Object::String(pdf_date(&metadata.created_at).into_bytes(), StringFormat::Literal),
        ),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Encode(format!("save failed: {e}")))?;
    Ok(buffer)
}

fn page_content(page: &Page, layout: &PageLayout) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(b"F1".to_vec()),
                Object::Integer(layout.font_size as i64),
            ],
        ),
    ];

    for (slot, line) in page.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        operations.push(Operation::new(
            "Tm",
            vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                Object::Integer(layout.left_x as i64),
                Object::Integer(layout.baseline(slot) as i64),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_text(line), StringFormat::Literal)],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

/// Maps text onto WinAnsiEncoding, the single-byte encoding declared for Helvetica.
/// Latin-1 maps to itself and curly quotes, dashes and the euro sign land in the
/// 0x80..=0x9F block. Tabs become spaces; anything else becomes `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x09 => b' ',
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => winansi_high_byte(c).unwrap_or(b'?'),
        })
        .collect()
}

/// WinAnsi codes 0x80..=0x9F, which differ from Latin-1.
fn winansi_high_byte(c: char) -> Option<u8> {
    let byte = match c {
        '\u{20AC}' => 0x80, // €
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85, // …
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91, // ‘
        '\u{2019}' => 0x92, // ’
        '\u{201C}' => 0x93, // “
        '\u{201D}' => 0x94, // ”
        '\u{2022}' => 0x95, // •
        '\u{2013}' => 0x96, // –
        '\u{2014}' => 0x97, // —
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99, // ™
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

fn pdf_date(at: &DateTime<Utc>) -> String {
    format!("D:{}Z", at.format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::paginator::{default_page_layout, render_to_pages};
    use chrono::TimeZone;

    fn metadata() -> DocumentMetadata {
        DocumentMetadata {
            title: "consent_agreement".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    /// Text drawn on each page, in drawing order.
    fn drawn_text(pdf: &[u8]) -> Vec<Vec<String>> {
        let doc = Document::load_mem(pdf).unwrap();
        doc.get_pages()
            .values()
            .map(|page_id| {
                let raw = doc.get_page_content(*page_id).unwrap();
                Content::decode(&raw)
                    .unwrap()
                    .operations
                    .into_iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.first() {
                        Some(Object::String(bytes, _)) => {
                            Some(String::from_utf8_lossy(bytes).into_owned())
                        }
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_two_lines_one_page() {
        let layout = default_page_layout();
        let pages = render_to_pages("Line A\nLine B", &layout);
        let pdf = encode_as_document(&pages, &layout, &metadata()).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert_eq!(drawn_text(&pdf), vec![vec!["Line A".to_string(), "Line B".to_string()]]);
    }

    #[test]
    fn test_one_pdf_page_per_layout_page() {
        let layout = default_page_layout();
        let text = (0..80).map(|i| format!("row {i}")).collect::<Vec<_>>().join("\n");
        let pages = render_to_pages(&text, &layout);
        let pdf = encode_as_document(&pages, &layout, &metadata()).unwrap();

        let drawn = drawn_text(&pdf);
        assert_eq!(drawn.len(), 3);
        assert_eq!(drawn[0].len(), 37);
        assert_eq!(drawn[2], vec!["row 74", "row 75", "row 76", "row 77", "row 78", "row 79"]);
    }

    #[test]
    fn test_empty_text_is_single_blank_page() {
        let layout = default_page_layout();
        let pages = render_to_pages("", &layout);
        let pdf = encode_as_document(&pages, &layout, &metadata()).unwrap();
        assert_eq!(drawn_text(&pdf), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_output_is_deterministic() {
        let layout = default_page_layout();
        let pages = render_to_pages("Same input\nSame output (really)", &layout);
        let first = encode_as_document(&pages, &layout, &metadata()).unwrap();
        let second = encode_as_document(&pages, &layout, &metadata()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_creation_date_comes_from_metadata() {
        let layout = default_page_layout();
        let pdf = encode_as_document(&render_to_pages("x", &layout), &layout, &metadata()).unwrap();
        let doc = Document::load_mem(&pdf).unwrap();
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        match info.get(b"CreationDate").unwrap() {
            Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"D:20250102030405Z"),
            other => panic!("unexpected CreationDate {other:?}"),
        }
    }

    #[test]
    fn test_unrepresentable_characters_become_question_marks() {
        assert_eq!(encode_text("café\t✓"), vec![b'c', b'a', b'f', 0xE9, b' ', b'?']);
        assert_eq!(encode_text("日本 \u{0080}"), vec![b'?', b'?', b' ', b'?']);
    }

    #[test]
    fn test_typographic_punctuation_uses_winansi_codes() {
        assert_eq!(
            encode_text("don\u{2019}t \u{2014} \u{201C}x\u{201D} \u{20AC}5"),
            vec![100, 111, 110, 146, 116, 32, 151, 32, 147, 120, 148, 32, 128, 53]
        );
        assert_eq!(
            encode_text("\u{2018}a\u{2026}\u{2013}\u{2022}\u{2122}"),
            vec![0x91, b'a', 0x85, 0x96, 0x95, 0x99]
        );
    }

    #[test]
    fn test_smart_quotes_survive_into_the_page_stream() {
        let layout = default_page_layout();
        let pages = render_to_pages("It\u{2019}s \u{201C}fine\u{201D}", &layout);
        let pdf = encode_as_document(&pages, &layout, &metadata()).unwrap();
        let doc = Document::load_mem(&pdf).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let drawn = content
            .operations
            .iter()
            .find(|op| op.operator == "Tj")
            .and_then(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(drawn, b"It\x92s \x93fine\x94".to_vec());
    }
}
