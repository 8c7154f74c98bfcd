//! ExportResolutionHandler - Query handler for downloadable documents.
//!
//! For DOCX the district logo is downloaded and embedded. A failed download
//! is logged and the document is exported without it.

use std::sync::Arc;

use tracing::{info, warn};

use super::source::{DocumentSource, DraftLoader, RenderResolutionError};
use crate::domain::foundation::UserId;
use crate::ports::{
    AssetFetcher, DocumentExportService, ExportAssets, ExportFormat, ExportedDocument,
    OrgProfileRepository, ResolutionRepository,
};

/// Query for an exported document.
#[derive(Debug, Clone)]
pub struct ExportResolutionQuery {
    pub owner: UserId,
    pub source: DocumentSource,
    pub format: ExportFormat,
}

/// Handler producing document files.
pub struct ExportResolutionHandler {
    loader: DraftLoader,
    fetcher: Arc<dyn AssetFetcher>,
    exporter: Arc<dyn DocumentExportService>,
}

impl ExportResolutionHandler {
    pub fn new(
        resolutions: Arc<dyn ResolutionRepository>,
        profiles: Arc<dyn OrgProfileRepository>,
        fetcher: Arc<dyn AssetFetcher>,
        exporter: Arc<dyn DocumentExportService>,
    ) -> Self {
        Self {
            loader: DraftLoader::new(resolutions, profiles),
            fetcher,
            exporter,
        }
    }

    pub async fn handle(
        &self,
        query: ExportResolutionQuery,
    ) -> Result<ExportedDocument, RenderResolutionError> {
        let session = self.loader.session(&query.owner, query.source).await?;
        let profile = self.loader.profile(&query.owner).await?;
        let document = session.compose(&profile);

        // HTML links the logo by URL; only DOCX needs the bytes.
        let assets = match (query.format, document.logo_url()) {
            (ExportFormat::Docx, Some(url)) => self.fetch_logo(url).await,
            _ => ExportAssets::default(),
        };

        let exported = self.exporter.export(&document, &assets, query.format).await?;

        info!(
            owner = %query.owner,
            filename = %exported.filename,
            bytes = exported.content.len(),
            "Resolution exported"
        );
        Ok(exported)
    }

    async fn fetch_logo(&self, url: &str) -> ExportAssets {
        match self.fetcher.fetch(url).await {
            Ok(logo) => ExportAssets::with_logo(logo),
            Err(e) => {
                warn!(url = %url, error = %e, "Logo fetch failed, exporting without logo");
                ExportAssets::default()
            }
        }
    }
}
