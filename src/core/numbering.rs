use super::error::ComprobanteError;
use super::types::DocumentType;

/// Gapless correlative sequence for one document series.
///
/// SUNAT numbers documents per (document type, series): "B001-00000001",
/// "B001-00000002", … with no gaps. This struct tracks the next
/// correlative for a series and formats document identifiers.
#[derive(Debug, Clone)]
pub struct SeriesSequence {
    document_type: DocumentType,
    series: String,
    next_number: u32,
}

impl SeriesSequence {
    /// Create a new sequence starting at correlative 1.
    ///
    /// The series must be 4 alphanumeric characters and, for facturas
    /// and boletas, start with the letter SUNAT fixes for the type
    /// ("F" / "B").
    pub fn new(
        document_type: DocumentType,
        series: impl Into<String>,
    ) -> Result<Self, ComprobanteError> {
        Self::starting_at(document_type, series, 1)
    }

    /// Create a sequence continuing from a given correlative.
    pub fn starting_at(
        document_type: DocumentType,
        series: impl Into<String>,
        next_number: u32,
    ) -> Result<Self, ComprobanteError> {
        let series = series.into();
        validate_series(document_type, &series)?;
        if next_number == 0 {
            return Err(ComprobanteError::Numbering(
                "correlative numbers start at 1".into(),
            ));
        }
        Ok(Self {
            document_type,
            series,
            next_number,
        })
    }

    /// Issue the next correlative number.
    pub fn next_number(&mut self) -> u32 {
        let num = self.next_number;
        self.next_number += 1;
        num
    }

    /// Issue the next correlative and return the formatted document id,
    /// e.g. "B001-00000003".
    pub fn next_document_id(&mut self) -> String {
        let num = self.next_number();
        format_document_id(&self.series, num)
    }

    /// Preview the next correlative without consuming it.
    pub fn peek(&self) -> u32 {
        self.next_number
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }
}

/// Format a series-correlative identifier: 8-digit zero-padded number.
pub fn format_document_id(series: &str, number: u32) -> String {
    format!("{series}-{number:08}")
}

/// Validate a series against SUNAT format rules for a document type.
pub fn validate_series(document_type: DocumentType, series: &str) -> Result<(), ComprobanteError> {
    if series.len() != 4 || !series.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ComprobanteError::Numbering(format!(
            "series '{series}' must be 4 alphanumeric characters"
        )));
    }
    if let Some(prefix) = document_type.series_prefix() {
        if !series.starts_with(prefix) {
            return Err(ComprobanteError::Numbering(format!(
                "series '{series}' must start with '{prefix}' for document type {}",
                document_type.code()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_numbering() {
        let mut seq = SeriesSequence::new(DocumentType::Boleta, "B001").unwrap();
        assert_eq!(seq.next_document_id(), "B001-00000001");
        assert_eq!(seq.next_document_id(), "B001-00000002");
        assert_eq!(seq.next_document_id(), "B001-00000003");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut seq = SeriesSequence::new(DocumentType::Factura, "F001").unwrap();
        assert_eq!(seq.peek(), 1);
        assert_eq!(seq.peek(), 1);
        assert_eq!(seq.next_number(), 1);
        assert_eq!(seq.peek(), 2);
    }

    #[test]
    fn starting_at_continues() {
        let mut seq = SeriesSequence::starting_at(DocumentType::Boleta, "B002", 42).unwrap();
        assert_eq!(seq.next_document_id(), "B002-00000042");
        assert_eq!(seq.next_document_id(), "B002-00000043");
    }

    #[test]
    fn zero_start_rejected() {
        assert!(SeriesSequence::starting_at(DocumentType::Boleta, "B001", 0).is_err());
    }

    #[test]
    fn series_prefix_enforced() {
        assert!(SeriesSequence::new(DocumentType::Factura, "B001").is_err());
        assert!(SeriesSequence::new(DocumentType::Boleta, "F001").is_err());
        assert!(SeriesSequence::new(DocumentType::Factura, "F001").is_ok());
    }

    #[test]
    fn series_format_enforced() {
        assert!(validate_series(DocumentType::Boleta, "B1").is_err());
        assert!(validate_series(DocumentType::Boleta, "B0001").is_err());
        assert!(validate_series(DocumentType::Boleta, "B-01").is_err());
        assert!(validate_series(DocumentType::CreditNote, "FC01").is_ok());
    }

    #[test]
    fn document_id_is_zero_padded() {
        assert_eq!(format_document_id("B001", 7), "B001-00000007");
        assert_eq!(format_document_id("F001", 12345678), "F001-12345678");
    }
}
