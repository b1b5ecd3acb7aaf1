//! Document formats and the conversion dispatch table.
//!
//! Conversions are an enumerated table, not a string built from format
//! names: a pair either has an entry point in the toolchain or the request
//! is rejected before any file is touched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serialization formats the toolchain understands.
///
/// `Html` is a rendering target only; the toolchain cannot read it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    Tag,
    Rdf,
    Spreadsheet,
    Html,
}

impl DocumentFormat {
    /// Whether documents in this format can be a conversion source.
    pub fn is_source(&self) -> bool {
        !matches!(self, DocumentFormat::Html)
    }

    /// Whether the source document should be verified before conversion.
    /// Mirrors the toolchain, which only ships verifiers for the two
    /// textual SPDX serializations.
    pub fn is_verifiable(&self) -> bool {
        matches!(self, DocumentFormat::Tag | DocumentFormat::Rdf)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Tag => write!(f, "Tag"),
            DocumentFormat::Rdf => write!(f, "RDF"),
            DocumentFormat::Spreadsheet => write!(f, "Spreadsheet"),
            DocumentFormat::Html => write!(f, "Html"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Tag" => Ok(DocumentFormat::Tag),
            "RDF" => Ok(DocumentFormat::Rdf),
            "Spreadsheet" => Ok(DocumentFormat::Spreadsheet),
            "Html" => Ok(DocumentFormat::Html),
            other => Err(format!(
                "Unknown document format '{}', expected one of: Tag, RDF, Spreadsheet, Html",
                other
            )),
        }
    }
}

/// The supported conversions and their toolchain entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    TagToRdf,
    TagToSpreadsheet,
    RdfToTag,
    RdfToSpreadsheet,
    RdfToHtml,
    SpreadsheetToTag,
    SpreadsheetToRdf,
}

impl ConversionKind {
    /// Look up the conversion for a `(from, to)` pair. `None` means the
    /// toolchain has no entry point for that pair.
    pub fn for_pair(from: DocumentFormat, to: DocumentFormat) -> Option<Self> {
        use DocumentFormat::*;
        match (from, to) {
            (Tag, Rdf) => Some(ConversionKind::TagToRdf),
            (Tag, Spreadsheet) => Some(ConversionKind::TagToSpreadsheet),
            (Rdf, Tag) => Some(ConversionKind::RdfToTag),
            (Rdf, Spreadsheet) => Some(ConversionKind::RdfToSpreadsheet),
            (Rdf, Html) => Some(ConversionKind::RdfToHtml),
            (Spreadsheet, Tag) => Some(ConversionKind::SpreadsheetToTag),
            (Spreadsheet, Rdf) => Some(ConversionKind::SpreadsheetToRdf),
            _ => None,
        }
    }

    /// Toolchain entry-point name, as understood by `org.spdx.tools.Main`.
    pub fn entry_point(&self) -> &'static str {
        match self {
            ConversionKind::TagToRdf => "TagToRDF",
            ConversionKind::TagToSpreadsheet => "TagToSpreadsheet",
            ConversionKind::RdfToTag => "RdfToTag",
            ConversionKind::RdfToSpreadsheet => "RdfToSpreadsheet",
            ConversionKind::RdfToHtml => "RdfToHtml",
            ConversionKind::SpreadsheetToTag => "SpreadsheetToTag",
            ConversionKind::SpreadsheetToRdf => "SpreadsheetToRDF",
        }
    }

    pub fn from_format(&self) -> DocumentFormat {
        use ConversionKind::*;
        match self {
            TagToRdf | TagToSpreadsheet => DocumentFormat::Tag,
            RdfToTag | RdfToSpreadsheet | RdfToHtml => DocumentFormat::Rdf,
            SpreadsheetToTag | SpreadsheetToRdf => DocumentFormat::Spreadsheet,
        }
    }
}
