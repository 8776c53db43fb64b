//! Share creation, public access, and the human-facing redirect.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Redirect;

use weightshare_core::types::ShareId;
use weightshare_entity::{ShareRecord, SnapshotInput};
use weightshare_service::ShareError;

use crate::dto::{ApiResponse, CreateShareResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, InboundOrigin};
use crate::state::AppState;

/// POST /api/shares
pub async fn create_share(
    State(state): State<AppState>,
    InboundOrigin(origin): InboundOrigin,
    ApiJson(snapshot): ApiJson<SnapshotInput>,
) -> Result<Json<CreateShareResponse>, ApiError> {
    let link = state
        .share_service
        .create_share(snapshot, origin.as_ref())
        .await?;

    Ok(Json(link.into()))
}

/// GET /api/shares/{share_id}
pub async fn get_share(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> Result<Json<ApiResponse<ShareRecord>>, ApiError> {
    let record = state.access_service.get_share(&share_id).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// GET /share/{share_id}
pub async fn redirect_share(Path(share_id): Path<String>) -> Result<Redirect, ApiError> {
    if !ShareId::is_well_formed(&share_id) {
        return Err(ShareError::NotFound.into());
    }
    Ok(Redirect::temporary(&format!("/api/shares/{share_id}")))
}
