//! HTTP handlers for resolution endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::ErrorResponse;
use crate::application::handlers::resolution::{
    DeleteResolutionCommand, DeleteResolutionHandler, DocumentSource, ExportResolutionHandler,
    ExportResolutionQuery, GenerateDraftCommand, GenerateDraftError, GenerateDraftHandler,
    GetResolutionHandler, GetResolutionQuery, ListResolutionsHandler, ListResolutionsQuery,
    PreviewResolutionHandler, PreviewResolutionQuery, RenderResolutionError,
    SaveResolutionCommand, SaveResolutionHandler, StartDraftHandler, StartDraftQuery,
};
use crate::domain::foundation::ResolutionId;
use crate::domain::resolution::{ResolutionDraft, ResolutionError};
use crate::ports::{
    AssetFetcher, DocumentExportService, DraftingError, DraftingService, ExportError,
    ExportFormat, ExportedDocument, OrgProfileRepository, ResolutionRepository,
};

use super::dto::{
    DeleteResolutionRequest, ExportParams, GenerateDraftRequest, GenerateDraftResponse,
    ListResolutionsParams, NewDraftParams, NewDraftResponse, ResolutionListResponse,
    ResolutionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ResolutionHandlers {
    save_handler: Arc<SaveResolutionHandler>,
    get_handler: Arc<GetResolutionHandler>,
    list_handler: Arc<ListResolutionsHandler>,
    delete_handler: Arc<DeleteResolutionHandler>,
    start_handler: Arc<StartDraftHandler>,
    preview_handler: Arc<PreviewResolutionHandler>,
    export_handler: Arc<ExportResolutionHandler>,
    generate_handler: Arc<GenerateDraftHandler>,
}

impl ResolutionHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        save_handler: Arc<SaveResolutionHandler>,
        get_handler: Arc<GetResolutionHandler>,
        list_handler: Arc<ListResolutionsHandler>,
        delete_handler: Arc<DeleteResolutionHandler>,
        start_handler: Arc<StartDraftHandler>,
        preview_handler: Arc<PreviewResolutionHandler>,
        export_handler: Arc<ExportResolutionHandler>,
        generate_handler: Arc<GenerateDraftHandler>,
    ) -> Self {
        Self {
            save_handler,
            get_handler,
            list_handler,
            delete_handler,
            start_handler,
            preview_handler,
            export_handler,
            generate_handler,
        }
    }

    /// Builds every handler from its collaborators.
    pub fn from_ports(
        resolutions: Arc<dyn ResolutionRepository>,
        profiles: Arc<dyn OrgProfileRepository>,
        fetcher: Arc<dyn AssetFetcher>,
        exporter: Arc<dyn DocumentExportService>,
        drafting: Arc<dyn DraftingService>,
    ) -> Self {
        Self::new(
            Arc::new(SaveResolutionHandler::new(resolutions.clone())),
            Arc::new(GetResolutionHandler::new(resolutions.clone())),
            Arc::new(ListResolutionsHandler::new(resolutions.clone())),
            Arc::new(DeleteResolutionHandler::new(resolutions.clone())),
            Arc::new(StartDraftHandler::new(profiles.clone())),
            Arc::new(PreviewResolutionHandler::new(
                resolutions.clone(),
                profiles.clone(),
                exporter.clone(),
            )),
            Arc::new(ExportResolutionHandler::new(
                resolutions,
                profiles.clone(),
                fetcher,
                exporter,
            )),
            Arc::new(GenerateDraftHandler::new(drafting, profiles)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/resolutions - Dashboard list, optionally filtered by `?query=`
pub async fn list_resolutions(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListResolutionsParams>,
) -> Response {
    let query = ListResolutionsQuery {
        owner: user.id,
        search: params.query,
    };

    match handlers.list_handler.handle(query).await {
        Ok(records) => {
            let response: ResolutionListResponse = records.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_resolution_error(e),
    }
}

/// GET /api/resolutions/new - Blank draft with the district's default signatories
pub async fn new_draft(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<NewDraftParams>,
) -> Response {
    let query = StartDraftQuery {
        owner: user.id,
        series_year: params.series_year,
    };

    match handlers.start_handler.handle(query).await {
        Ok(result) => {
            let response: NewDraftResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_resolution_error(e),
    }
}

/// POST /api/resolutions - Save a draft, replacing any resolution with the same number and year
pub async fn create_resolution(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Json(draft): Json<ResolutionDraft>,
) -> Response {
    let cmd = SaveResolutionCommand {
        owner: user.id,
        resolution_id: None,
        draft,
    };

    match handlers.save_handler.handle(cmd).await {
        Ok(record) => {
            let response: ResolutionResponse = record.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_resolution_error(e),
    }
}

/// GET /api/resolutions/:id - Load a stored resolution
pub async fn get_resolution(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(resolution_id): Path<String>,
) -> Response {
    let resolution_id = match parse_id(&resolution_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetResolutionQuery {
        owner: user.id,
        resolution_id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(record) => {
            let response: ResolutionResponse = record.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_resolution_error(e),
    }
}

/// PUT /api/resolutions/:id - Overwrite a stored resolution
pub async fn update_resolution(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(resolution_id): Path<String>,
    Json(draft): Json<ResolutionDraft>,
) -> Response {
    let resolution_id = match parse_id(&resolution_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SaveResolutionCommand {
        owner: user.id,
        resolution_id: Some(resolution_id),
        draft,
    };

    match handlers.save_handler.handle(cmd).await {
        Ok(record) => {
            let response: ResolutionResponse = record.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_resolution_error(e),
    }
}

/// DELETE /api/resolutions/:id - Remove a resolution after typed confirmation
pub async fn delete_resolution(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(resolution_id): Path<String>,
    body: Option<Json<DeleteResolutionRequest>>,
) -> Response {
    let resolution_id = match parse_id(&resolution_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let confirmation = body.map(|Json(req)| req.confirm).unwrap_or_default();

    let cmd = DeleteResolutionCommand {
        owner: user.id,
        resolution_id,
        confirmation,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_resolution_error(e),
    }
}

/// POST /api/resolutions/preview - Render unsaved form contents as HTML
pub async fn preview_draft(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Json(draft): Json<ResolutionDraft>,
) -> Response {
    let query = PreviewResolutionQuery {
        owner: user.id,
        source: DocumentSource::Draft(draft),
    };

    match handlers.preview_handler.handle(query).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => handle_render_error(e),
    }
}

/// GET /api/resolutions/:id/preview - Render a stored resolution as HTML
pub async fn preview_resolution(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(resolution_id): Path<String>,
) -> Response {
    let resolution_id = match parse_id(&resolution_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = PreviewResolutionQuery {
        owner: user.id,
        source: DocumentSource::Stored(resolution_id),
    };

    match handlers.preview_handler.handle(query).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => handle_render_error(e),
    }
}

/// POST /api/resolutions/export?format= - Download unsaved form contents
pub async fn export_draft(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ExportParams>,
    Json(draft): Json<ResolutionDraft>,
) -> Response {
    let format = match parse_format(params.format.as_deref()) {
        Ok(format) => format,
        Err(e) => return handle_export_error(e),
    };

    let query = ExportResolutionQuery {
        owner: user.id,
        source: DocumentSource::Draft(draft),
        format,
    };

    match handlers.export_handler.handle(query).await {
        Ok(document) => attachment(document),
        Err(e) => handle_render_error(e),
    }
}

/// GET /api/resolutions/:id/export?format= - Download a stored resolution
pub async fn export_resolution(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(resolution_id): Path<String>,
    Query(params): Query<ExportParams>,
) -> Response {
    let resolution_id = match parse_id(&resolution_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let format = match parse_format(params.format.as_deref()) {
        Ok(format) => format,
        Err(e) => return handle_export_error(e),
    };

    let query = ExportResolutionQuery {
        owner: user.id,
        source: DocumentSource::Stored(resolution_id),
        format,
    };

    match handlers.export_handler.handle(query).await {
        Ok(document) => attachment(document),
        Err(e) => handle_render_error(e),
    }
}

/// POST /api/resolutions/generate - Ask the model for a draft and merge it
pub async fn generate_draft(
    State(handlers): State<ResolutionHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<GenerateDraftRequest>,
) -> Response {
    let cmd = GenerateDraftCommand {
        owner: user.id,
        prompt: req.prompt,
        draft: req.draft,
    };

    match handlers.generate_handler.handle(cmd).await {
        Ok(result) => {
            let response = GenerateDraftResponse {
                suggestion: result.suggestion,
                draft: result.draft,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(GenerateDraftError::Resolution(e)) => handle_resolution_error(e),
        Err(GenerateDraftError::Drafting(e)) => handle_drafting_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_id(raw: &str) -> Result<ResolutionId, Response> {
    raw.parse::<ResolutionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid resolution ID")),
        )
            .into_response()
    })
}

/// Missing format means DOCX.
fn parse_format(raw: Option<&str>) -> Result<ExportFormat, ExportError> {
    raw.unwrap_or("docx").parse()
}

fn attachment(document: ExportedDocument) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        quoted_filename(&document.filename)
    );
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, document.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.content,
    )
        .into_response()
}

/// Filename safe inside a quoted `Content-Disposition` parameter.
fn quoted_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_resolution_error(error: ResolutionError) -> Response {
    match error {
        ResolutionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Resolution", &id.to_string())),
        )
            .into_response(),
        ResolutionError::ValidationFailed(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::validation(&errors)),
        )
            .into_response(),
        ResolutionError::ConfirmationRequired => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                error.code().to_string(),
                error.message(),
            )),
        )
            .into_response(),
        ResolutionError::GenerationInProgress => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(
                error.code().to_string(),
                error.message(),
            )),
        )
            .into_response(),
        ResolutionError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}

fn handle_drafting_error(error: DraftingError) -> Response {
    let status = match &error {
        DraftingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        DraftingError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        DraftingError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        DraftingError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorResponse::new("DRAFTING_FAILED", error.user_message())),
    )
        .into_response()
}

fn handle_export_error(error: ExportError) -> Response {
    match error {
        ExportError::UnsupportedFormat(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        ExportError::PackagingFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(error.to_string())),
        )
            .into_response(),
    }
}

fn handle_render_error(error: RenderResolutionError) -> Response {
    match error {
        RenderResolutionError::Resolution(e) => handle_resolution_error(e),
        RenderResolutionError::Export(e) => handle_export_error(e),
    }
}
