//! User-facing error taxonomy.
//!
//! Every failure that can cross the `ingest` / `ask` boundary is one of
//! these variants. All of them are recoverable and their `Display` text is
//! what the user sees.

use thiserror::Error;

use crate::extract::ExtractError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QaError {
    /// File extension is not `.pdf`, `.docx`, or `.txt`.
    #[error("Unsupported file format. Please upload PDF, DOCX, or TXT.")]
    UnsupportedFormat,

    /// Extraction produced no usable text.
    #[error("Error reading file. Please upload a valid file.")]
    EmptyDocument,

    /// No section pattern matched; the document does not look like release notes.
    #[error("Invalid release notes uploaded. Please upload a valid file with proper sections.")]
    NoSectionsFound,

    #[error("Error: No release notes loaded. Please upload a valid file first.")]
    NoDocumentLoaded,

    #[error("Sorry, I couldn't find any relevant information for your question.")]
    NoRelevantMatch,

    /// The embedding backend failed.
    #[error("Embedding failed: {0}")]
    Embedding(String),
}

impl From<ExtractError> for QaError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(_) => QaError::UnsupportedFormat,
            other => {
                tracing::warn!(error = %other, "extraction yielded no usable text");
                QaError::EmptyDocument
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_maps_through() {
        let err: QaError = ExtractError::UnsupportedFormat("notes.md".into()).into();
        assert_eq!(err, QaError::UnsupportedFormat);
    }

    #[test]
    fn unreadable_files_become_empty_document() {
        let pdf: QaError = ExtractError::Pdf("bad xref".into()).into();
        let docx: QaError = ExtractError::Docx("not a zip".into()).into();
        let txt: QaError = ExtractError::Encoding("invalid utf-8".into()).into();
        let empty: QaError = ExtractError::Empty.into();
        for err in [pdf, docx, txt, empty] {
            assert_eq!(err, QaError::EmptyDocument);
        }
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            QaError::NoRelevantMatch.to_string(),
            "Sorry, I couldn't find any relevant information for your question."
        );
        assert!(QaError::Embedding("timeout".into())
            .to_string()
            .contains("timeout"));
    }
}
