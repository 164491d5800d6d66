use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{SignupRequest, SignupResponse, VerifyUserRequest},
        repo_types::User,
        services::IdentityService,
    },
    error::ApiError,
    extract::Payload,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/verifyUser", post(verify_user))
}

#[instrument(skip(identity, payload))]
pub async fn signup(
    State(identity): State<IdentityService>,
    Payload(payload): Payload<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let user_id = identity
        .create_user(payload)
        .await
        .map_err(ApiError::with("Signup failed"))?;

    info!(%user_id, "user created");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
            user_id,
        }),
    ))
}

/// Responds with a one-element array holding the matched user.
#[instrument(skip(identity, payload))]
pub async fn verify_user(
    State(identity): State<IdentityService>,
    Payload(payload): Payload<VerifyUserRequest>,
) -> Result<Json<Vec<User>>, ApiError> {
    let user = identity
        .verify_credentials(payload)
        .await
        .map_err(ApiError::with("Login failed"))?;

    info!(user_id = %user.id, "user verified");
    Ok(Json(vec![user]))
}
