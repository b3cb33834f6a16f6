use axum::Json;

use crate::auth::{dtos::SessionResponse, middleware::AuthenticatedUser};

/// Identity echo for the UI header. Account management (sign-in, sign-up,
/// sign-out) is entirely the auth provider's; nothing to do here beyond
/// reflecting the verified session.
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "auth",
    responses(
        (status = 200, description = "The signed-in caller", body = SessionResponse),
        (status = 401, description = "No valid session")
    )
)]
pub async fn me(user: AuthenticatedUser) -> Json<SessionResponse> {
    Json(SessionResponse { email: user.email })
}
