//! Artifact display helpers: XML re-indentation, signature detection,
//! and byte-size formatting for the XML/ZIP/CDR viewers.
//!
//! Nothing here interprets the documents — the backend validates and
//! parses them. These helpers only make the raw artifacts readable.

use std::io::Cursor;

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use crate::core::ComprobanteError;

/// Re-indent an XML document with 2-space indentation.
///
/// Inter-element whitespace is discarded, so already-formatted input
/// comes out normalized rather than double-indented. Malformed XML is
/// an error.
pub fn pretty_print(xml: &str) -> Result<String, ComprobanteError> {
    let mut reader = Reader::from_str(xml);
    // Existing inter-element whitespace is formatting noise from the
    // previous indentation; drop it and let the writer re-indent.
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => {
                writer
                    .write_event(event)
                    .map_err(|e| ComprobanteError::Xml(format!("XML write error: {e}")))?;
            }
            Err(e) => {
                return Err(ComprobanteError::Xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    let buf = writer.into_inner().into_inner();
    String::from_utf8(buf).map_err(|e| ComprobanteError::Xml(format!("XML UTF-8 error: {e}")))
}

/// Whether an XML document carries an enveloped XML-DSig signature
/// block (`ds:Signature`, or an unprefixed `Signature` bound to the
/// xmldsig namespace).
pub fn contains_signature(xml: &str) -> bool {
    xml.contains("<ds:Signature")
        || (xml.contains("<Signature") && xml.contains("http://www.w3.org/2000/09/xmldsig#"))
}

/// Format a byte count for display: "0 B", "1.5 KB", "2.34 MB", …
/// Two decimals, trailing zeros trimmed.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{value:.2}");
    let formatted = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", formatted, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_indents_nested_elements() {
        let xml = "<Invoice><ID>F001-00000001</ID><Total>236.00</Total></Invoice>";
        let pretty = pretty_print(xml).unwrap();
        assert_eq!(
            pretty,
            "<Invoice>\n  <ID>F001-00000001</ID>\n  <Total>236.00</Total>\n</Invoice>"
        );
    }

    #[test]
    fn pretty_print_normalizes_existing_formatting() {
        let xml = "<a>\n      <b>x</b>\n</a>";
        let pretty = pretty_print(xml).unwrap();
        assert_eq!(pretty, "<a>\n  <b>x</b>\n</a>");
    }

    #[test]
    fn pretty_print_keeps_attributes_and_declaration() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?><Amount currencyID="PEN">100.00</Amount>"#;
        let pretty = pretty_print(xml).unwrap();
        assert!(pretty.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(pretty.contains(r#"<Amount currencyID="PEN">100.00</Amount>"#));
    }

    #[test]
    fn pretty_print_rejects_malformed_xml() {
        assert!(pretty_print("<a><b></a></b>").is_err());
    }

    #[test]
    fn signature_detection() {
        assert!(contains_signature("<x><ds:Signature>…</ds:Signature></x>"));
        assert!(contains_signature(
            "<x><Signature xmlns=\"http://www.w3.org/2000/09/xmldsig#\"/></x>"
        ));
        assert!(!contains_signature("<x><Firma/></x>"));
    }

    #[test]
    fn byte_formatting() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 * 1024), "1 MB");
        assert_eq!(format_bytes(2_459_238), "2.35 MB");
    }
}
