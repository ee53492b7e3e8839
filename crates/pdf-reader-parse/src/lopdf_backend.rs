//! lopdf-based PDF parsing backend.
//!
//! Implements [`DocumentParser`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate. This is the default backend for pdf-reader.

use pdf_reader_core::{DocumentHandle, InfoDictionary, InfoValue, parse_pdf_date};

use crate::backend::DocumentParser;
use crate::error::BackendError;

/// `/Info` keys holding PDF date strings.
const DATE_KEYS: [&str; 2] = ["CreationDate", "ModDate"];

/// The lopdf-based PDF parser.
///
/// # Example
///
/// ```ignore
/// use pdf_reader_parse::{DocumentParser, LopdfParser};
///
/// let doc = LopdfParser.parse(&pdf_bytes)?;
/// let text = doc.raw_text();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfParser;

impl DocumentParser for LopdfParser {
    fn parse(&self, bytes: &[u8]) -> Result<DocumentHandle, BackendError> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if doc.is_encrypted() {
            return Err(BackendError::Encrypted);
        }

        let pages = extract_page_texts(&doc);
        let info = extract_info_dictionary(&doc);
        let version = Some(doc.version.clone()).filter(|v| !v.is_empty());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            pages = pages.len(),
            info_entries = info.len(),
            version = version.as_deref().unwrap_or("unknown"),
            "parsed PDF"
        );

        Ok(DocumentHandle::new(pages, info, version))
    }
}

/// Extract the text of every page in document order.
///
/// A page whose content cannot be decoded contributes an empty string.
fn extract_page_texts(doc: &lopdf::Document) -> Vec<String> {
    doc.get_pages()
        .keys()
        .map(|&page_number| match doc.extract_text(&[page_number]) {
            Ok(text) => text.trim_end_matches(['\n', '\r']).to_string(),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(page = page_number, error = %_e, "text extraction failed");
                String::new()
            }
        })
        .collect()
}

/// Resolve an object through at most one indirect reference.
fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a lopdf::Object) -> Option<&'a lopdf::Object> {
    match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Decode a PDF text string, handling UTF-16 BE (with BOM), UTF-8 and Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

/// Read the trailer's `/Info` dictionary into a raw [`InfoDictionary`].
///
/// Missing or malformed `/Info` yields an empty mapping; entries that are
/// neither strings nor names are skipped.
fn extract_info_dictionary(doc: &lopdf::Document) -> InfoDictionary {
    let mut info = InfoDictionary::new();

    let Some(dict) = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
    else {
        return info;
    };

    for (key, value) in dict.iter() {
        let key = String::from_utf8_lossy(key).into_owned();
        let text = match resolve(doc, value) {
            Some(lopdf::Object::String(bytes, _)) => decode_pdf_string(bytes),
            Some(lopdf::Object::Name(name)) => String::from_utf8_lossy(name).into_owned(),
            _ => continue,
        };

        let value = if DATE_KEYS.contains(&key.as_str()) {
            parse_pdf_date(&text).map_or(InfoValue::Text(text), InfoValue::Date)
        } else {
            InfoValue::Text(text)
        };
        info.insert(key, value);
    }

    info
}

/// Create a PDF with `page_count` empty pages.
#[cfg(test)]
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    use lopdf::{Document, Object, ObjectId, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let mut page_ids: Vec<Object> = Vec::new();
    for _ in 0..page_count {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        page_ids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

/// Create a one-page PDF showing `text` in Helvetica.
#[cfg(test)]
fn create_test_pdf_with_text(text: &str) -> Vec<u8> {
    use lopdf::{Document, Object, ObjectId, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let content = format!("BT /F1 12 Tf 72 700 Td ({text}) Tj ET");
    let content_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), content.into_bytes()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
        "Resources" => Object::Dictionary(dictionary! {
            "Font" => Object::Dictionary(dictionary! {
                "F1" => font_id,
            }),
        }),
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

/// Create a one-page PDF whose `/Info` holds the given entries.
#[cfg(test)]
fn create_test_pdf_with_info(entries: &[(&str, lopdf::Object)], inline: bool) -> Vec<u8> {
    use lopdf::{Document, Object, ObjectId, dictionary};

    let mut doc = Document::with_version("1.7");
    let pages_id: ObjectId = doc.new_object_id();

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut info_dict = lopdf::Dictionary::new();
    for (key, value) in entries {
        info_dict.set(*key, value.clone());
    }
    if inline {
        doc.trailer.set("Info", Object::Dictionary(info_dict));
    } else {
        let info_id = doc.add_object(Object::Dictionary(info_dict));
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}
