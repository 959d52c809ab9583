//! Authenticated endpoints and the liveness probe.

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::domains::user::actions::update_profile;
use crate::domains::user::models::{ProfileUpdate, UserRole};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::CurrentUser;
use crate::server::routes::auth::MessageResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college_or_company: String,
    pub skills: Vec<String>,
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: String,
    pub role: UserRole,
    pub profile: ProfileResponse,
}

/// GET /home
pub async fn home_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<HomeResponse> {
    Json(HomeResponse {
        message: format!("Welcome {}", user.full_name),
        role: user.role,
        profile: ProfileResponse {
            email: user.email,
            phone: user.phone,
            college_or_company: user.college_or_company,
            skills: user.skills,
            city: user.city,
        },
    })
}

/// PUT /profile
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<MessageResponse>, ApiError> {
    if payload.is_empty() {
        return Err(ApiError::NoFieldsToUpdate);
    }

    update_profile(user.id, payload, &state.db_pool).await?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

/// GET / - liveness
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Project Sprint API is running".to_string(),
    })
}
