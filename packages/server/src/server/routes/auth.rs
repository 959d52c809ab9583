//! Auth endpoints: OTP issuance/verification and signup.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::domains::auth::actions::{
    send_otp, signup, verify_otp, SignupOutcome, VerifyOtpOutcome,
};
use crate::domains::user::models::SignupPayload;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
}

/// POST /auth/send-otp
///
/// Always acknowledges once the record is persisted, whatever happened to
/// delivery.
pub async fn send_otp_handler(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    send_otp(payload.email, &state.server_deps).await?;

    Ok(Json(MessageResponse {
        message: "OTP generated and email (attempted) to be sent".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub identifier: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum VerifyOtpResponse {
    /// Caller must proceed to signup; no token issued
    NewUser { new_user: bool, identifier: String },
    /// Existing user logged in
    LoggedIn {
        message: String,
        new_user: bool,
        access_token: String,
        token_type: String,
    },
}

/// POST /auth/verify-otp
pub async fn verify_otp_handler(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
    match verify_otp(payload.identifier, payload.code, &state.server_deps).await? {
        VerifyOtpOutcome::InvalidOrExpired => Err(ApiError::InvalidOrExpiredOtp),
        VerifyOtpOutcome::TooManyAttempts => Err(ApiError::TooManyAttempts),
        VerifyOtpOutcome::NewUser { identifier } => Ok(Json(VerifyOtpResponse::NewUser {
            new_user: true,
            identifier,
        })),
        VerifyOtpOutcome::LoggedIn { access_token, .. } => {
            Ok(Json(VerifyOtpResponse::LoggedIn {
                message: "Login successful".to_string(),
                new_user: false,
                access_token,
                token_type: "bearer".to_string(),
            }))
        }
    }
}

/// POST /auth/signup
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    match signup(payload, &state.db_pool).await? {
        SignupOutcome::AlreadyExists => Err(ApiError::UserAlreadyExists),
        SignupOutcome::Created { .. } => Ok(Json(MessageResponse {
            message: "Signup completed".to_string(),
        })),
    }
}
