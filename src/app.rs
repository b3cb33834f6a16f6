//! Router construction and the OpenAPI surface.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{app_state::AppState, auth, campaign, health};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::handlers::me,
        campaign::handlers::repurpose
    ),
    components(schemas(
        health::HealthResponse,
        auth::dtos::ErrorResponse,
        auth::dtos::SessionResponse,
        campaign::dtos::RepurposeRequest,
        campaign::dtos::RepurposeResponse,
        campaign::schema::ContentPackage,
        campaign::schema::TikTokScript
    ))
)]
struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/api/me", get(auth::handlers::me))
        .route("/api/repurpose", post(campaign::handlers::repurpose))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
