//! The repurpose endpoint: a strictly linear pipeline.
//!
//! validate → extract → build prompt → complete → parse → respond. Any
//! stage failure short-circuits with a stage-tagged message; nothing is
//! retried and no partial result is ever returned.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    auth::{dtos::ErrorResponse, middleware::AuthenticatedUser},
    campaign::{
        dtos::{RepurposeRequest, RepurposeResponse},
        parser,
        prompt::build_prompt,
        schema::PACKAGE_FIELDS,
    },
    extractor::{self, ExtractError, SourceKind},
};

#[utoipa::path(
    post,
    path = "/api/repurpose",
    tag = "campaign",
    request_body = RepurposeRequest,
    responses(
        (status = 200, description = "Campaign generated", body = RepurposeResponse),
        (status = 400, description = "Missing or invalid source URL", body = ErrorResponse),
        (status = 401, description = "No valid session"),
        (status = 500, description = "A pipeline stage failed", body = ErrorResponse)
    )
)]
pub async fn repurpose(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<RepurposeRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }
    let url = payload.content_url;
    let kind = SourceKind::classify(&url);

    info!(%url, ?kind, "extracting source text");
    let extracted = match extractor::extract(&url).await {
        Ok(extracted) => extracted,
        Err(err) => return extraction_error_response(kind, err),
    };
    info!(chars = extracted.text.len(), "source text extracted");

    let prompt = build_prompt(&extracted.text, PACKAGE_FIELDS);

    info!("generating content");
    let raw = match state.completions.complete(&prompt).await {
        Ok(raw) => raw,
        Err(err) => {
            error!(error = %err, "completion failed");
            return stage_failure(format!("Failed to generate AI content: {err}"));
        }
    };
    info!(chars = raw.len(), "content generated");

    let package = match parser::parse(&raw, PACKAGE_FIELDS) {
        Ok(package) => package,
        Err(err) => {
            error!(error = %err, "model response did not decode");
            return stage_failure(format!("Failed to process AI response: {err}"));
        }
    };

    (
        StatusCode::OK,
        Json(RepurposeResponse {
            repurposed_content: raw,
            package,
        }),
    )
        .into_response()
}

/// Map an extraction failure onto the HTTP contract. A video URL that never
/// matched the platform's shapes is the caller's mistake (400); everything
/// else is a stage failure (500) prefixed with the stage that died.
fn extraction_error_response(kind: SourceKind, err: ExtractError) -> Response {
    error!(error = %err, ?kind, "extraction failed");

    if matches!(err, ExtractError::InvalidVideoUrl) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid video URL".to_string(),
            }),
        )
            .into_response();
    }

    let stage = match kind {
        SourceKind::Article => "Failed to fetch article",
        SourceKind::Video => "Failed to fetch transcript",
    };
    stage_failure(format!("{stage}: {err}"))
}

fn stage_failure(error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error }),
    )
        .into_response()
}
