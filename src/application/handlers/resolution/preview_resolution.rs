//! PreviewResolutionHandler - Query handler for the print preview.
//!
//! Renders through the export port in HTML form, so the preview and the
//! downloaded HTML file are the same document.

use std::sync::Arc;

use super::source::{DocumentSource, DraftLoader, RenderResolutionError};
use crate::domain::foundation::UserId;
use crate::ports::{
    DocumentExportService, ExportAssets, ExportError, ExportFormat, OrgProfileRepository,
    ResolutionRepository,
};

/// Query for a rendered preview.
#[derive(Debug, Clone)]
pub struct PreviewResolutionQuery {
    pub owner: UserId,
    pub source: DocumentSource,
}

/// Handler producing preview HTML.
pub struct PreviewResolutionHandler {
    loader: DraftLoader,
    exporter: Arc<dyn DocumentExportService>,
}

impl PreviewResolutionHandler {
    pub fn new(
        resolutions: Arc<dyn ResolutionRepository>,
        profiles: Arc<dyn OrgProfileRepository>,
        exporter: Arc<dyn DocumentExportService>,
    ) -> Self {
        Self {
            loader: DraftLoader::new(resolutions, profiles),
            exporter,
        }
    }

    pub async fn handle(&self, query: PreviewResolutionQuery) -> Result<String, RenderResolutionError> {
        let session = self.loader.session(&query.owner, query.source).await?;
        let profile = self.loader.profile(&query.owner).await?;
        let document = session.compose(&profile);

        let rendered = self
            .exporter
            .export(&document, &ExportAssets::default(), ExportFormat::Html)
            .await?;

        String::from_utf8(rendered.content)
            .map_err(|e| ExportError::packaging(format!("preview is not UTF-8: {}", e)).into())
    }
}
