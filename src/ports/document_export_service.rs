//! Document Export Service Port - renders a composed resolution to a file.
//!
//! The domain composes a `ComposedDocument`; adapters turn it into bytes for
//! download. Remote images are fetched beforehand by the application and
//! passed in through `ExportAssets`, so renderers stay free of network I/O.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::asset_fetcher::FetchedAsset;
use crate::domain::document::ComposedDocument;

/// Turns a composed resolution into a downloadable file.
///
/// ```rust,ignore
/// let file = exporter
///     .export(&document, &ExportAssets::default(), ExportFormat::Docx)
///     .await?;
/// assert_eq!(file.filename, "Resolution-012.docx");
/// ```
#[async_trait]
pub trait DocumentExportService: Send + Sync {
    /// The filename is `document.base_filename` plus the format extension.
    async fn export(
        &self,
        document: &ComposedDocument,
        assets: &ExportAssets,
        format: ExportFormat,
    ) -> Result<ExportedDocument, ExportError>;
}

/// Images already downloaded for embedding.
#[derive(Debug, Clone, Default)]
pub struct ExportAssets {
    /// District logo; `None` renders the header without it.
    pub logo: Option<FetchedAsset>,
}

impl ExportAssets {
    pub fn with_logo(logo: FetchedAsset) -> Self {
        Self { logo: Some(logo) }
    }
}

/// `?format=` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Word document (Office Open XML), legal-size pages.
    #[default]
    Docx,
    /// Standalone HTML page, identical to the preview.
    Html,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Html => "html",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    /// Case-insensitive; `word` and `htm` are accepted aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s.trim().to_ascii_lowercase().as_str() {
            "docx" | "word" => ExportFormat::Docx,
            "html" | "htm" => ExportFormat::Html,
            _ => return Err(ExportError::UnsupportedFormat(s.to_string())),
        };
        Ok(format)
    }
}

/// A rendered file, ready to send as an attachment.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub content: Vec<u8>,
    pub content_type: String,
    /// `Resolution-{number}.{ext}`, or `Resolution-Draft.{ext}` when unnumbered.
    pub filename: String,
    pub format: ExportFormat,
}

impl ExportedDocument {
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }

    pub fn from_html(html: String, base_filename: &str) -> Self {
        Self::new(html.into_bytes(), ExportFormat::Html, base_filename)
    }

    pub fn from_docx(bytes: Vec<u8>, base_filename: &str) -> Self {
        Self::new(bytes, ExportFormat::Docx, base_filename)
    }
}

#[derive(Debug, Clone, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Writing the document package failed.
    #[error("Document packaging failed: {0}")]
    PackagingFailed(String),
}

impl ExportError {
    pub fn packaging(reason: impl Into<String>) -> Self {
        Self::PackagingFailed(reason.into())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::PackagingFailed(err.to_string())
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::PackagingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_content_types_are_correct() {
        assert_eq!(
            ExportFormat::Docx.content_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(ExportFormat::Html.content_type(), "text/html; charset=utf-8");
    }

    #[test]
    fn query_values_parse_with_aliases() {
        for (raw, expected) in [
            ("docx", ExportFormat::Docx),
            (" DOCX", ExportFormat::Docx),
            ("word", ExportFormat::Docx),
            ("Html", ExportFormat::Html),
            ("htm", ExportFormat::Html),
        ] {
            assert_eq!(raw.parse::<ExportFormat>().unwrap(), expected);
        }
        assert_eq!(ExportFormat::default(), ExportFormat::Docx);
    }

    #[test]
    fn export_format_parse_rejects_unknown_format() {
        let result = "pdf".parse::<ExportFormat>();
        assert!(matches!(result.unwrap_err(), ExportError::UnsupportedFormat(_)));
    }

    #[test]
    fn export_format_serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&ExportFormat::Docx).unwrap(), "\"docx\"");
        assert_eq!(ExportFormat::Html.to_string(), "html");
    }

    #[test]
    fn exported_document_appends_extension() {
        let doc = ExportedDocument::from_docx(vec![0x50, 0x4B], "Resolution-012");
        assert_eq!(doc.filename, "Resolution-012.docx");
        assert_eq!(doc.format, ExportFormat::Docx);

        let doc = ExportedDocument::from_html("<html></html>".to_string(), "Resolution-Draft");
        assert_eq!(doc.filename, "Resolution-Draft.html");
        assert_eq!(doc.content_type, "text/html; charset=utf-8");
    }

    #[test]
    fn export_error_displays_messages() {
        let err = ExportError::packaging("disk full");
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn document_export_service_is_object_safe() {
        fn check<T: DocumentExportService + ?Sized>() {}
        check::<dyn DocumentExportService>();
    }
}
