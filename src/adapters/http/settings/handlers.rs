//! HTTP handlers for organization settings.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::ErrorResponse;
use crate::application::handlers::settings::{
    GetSettingsHandler, GetSettingsQuery, SettingsError, UpdateSettingsCommand,
    UpdateSettingsHandler, UploadAssetCommand, UploadAssetHandler,
};
use crate::domain::organization::OrgProfile;
use crate::ports::{
    AssetKind, BlobStorage, OrgProfileRepository, UploadError, UploadPolicy, UploadRequest,
};

use super::dto::{SettingsResponse, UploadParams, UploadResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SettingsHandlers {
    get_handler: Arc<GetSettingsHandler>,
    update_handler: Arc<UpdateSettingsHandler>,
    upload_handler: Arc<UploadAssetHandler>,
}

impl SettingsHandlers {
    pub fn new(
        get_handler: Arc<GetSettingsHandler>,
        update_handler: Arc<UpdateSettingsHandler>,
        upload_handler: Arc<UploadAssetHandler>,
    ) -> Self {
        Self {
            get_handler,
            update_handler,
            upload_handler,
        }
    }

    /// Builds every handler from its collaborators.
    pub fn from_ports(
        profiles: Arc<dyn OrgProfileRepository>,
        storage: Arc<dyn BlobStorage>,
        policy: UploadPolicy,
    ) -> Self {
        Self::new(
            Arc::new(GetSettingsHandler::new(profiles.clone())),
            Arc::new(UpdateSettingsHandler::new(profiles)),
            Arc::new(UploadAssetHandler::new(storage, policy)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/settings - Current profile, empty when never saved
pub async fn get_settings(
    State(handlers): State<SettingsHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetSettingsQuery { owner: user.id };

    match handlers.get_handler.handle(query).await {
        Ok(profile) => {
            let response: SettingsResponse = profile.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_settings_error(e),
    }
}

/// PUT /api/settings - Replace the profile
pub async fn update_settings(
    State(handlers): State<SettingsHandlers>,
    RequireAuth(user): RequireAuth,
    Json(profile): Json<OrgProfile>,
) -> Response {
    let cmd = UpdateSettingsCommand {
        owner: user.id,
        profile,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(profile) => {
            let response: SettingsResponse = profile.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_settings_error(e),
    }
}

/// POST /api/settings/uploads?kind= - Store a logo or signature image
///
/// The body is the raw image; `Content-Type` names its type. The returned
/// URL is not written to the profile until the next `PUT /api/settings`.
pub async fn upload_asset(
    State(handlers): State<SettingsHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let kind = match params.kind.parse::<AssetKind>() {
        Ok(kind) => kind,
        Err(e) => return handle_settings_error(e.into()),
    };
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let cmd = UploadAssetCommand {
        owner: user.id,
        request: UploadRequest {
            kind,
            content_type,
            bytes: body.to_vec(),
        },
    };

    match handlers.upload_handler.handle(cmd).await {
        Ok(result) => {
            let response: UploadResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_settings_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_settings_error(error: SettingsError) -> Response {
    match error {
        SettingsError::ValidationFailed(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::validation(&errors)),
        )
            .into_response(),
        SettingsError::Upload(UploadError::Validation(reason)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("UPLOAD_REJECTED", reason)),
        )
            .into_response(),
        SettingsError::Upload(UploadError::Storage(reason)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(reason)),
        )
            .into_response(),
        SettingsError::Storage(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(e.to_string())),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn validation_failure_maps_to_422() {
        let error = SettingsError::ValidationFailed(vec![ValidationError::empty_field("logo_url")]);
        assert_eq!(
            handle_settings_error(error).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn rejected_upload_maps_to_400() {
        let error = SettingsError::Upload(UploadError::validation("too large"));
        assert_eq!(handle_settings_error(error).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let error = SettingsError::Upload(UploadError::storage("disk full"));
        assert_eq!(
            handle_settings_error(error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
