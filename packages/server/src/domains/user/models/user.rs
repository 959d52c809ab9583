use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Role granted at signup, embedded in session tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

/// User model - SQL persistence layer
///
/// Exactly one of email/phone is set at signup, depending on which
/// identifier the user verified.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub full_name: String,
    pub college_or_company: String,
    pub skills: Vec<String>,
    pub role: UserRole,
    pub city: String,
    pub signup_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

/// Signup request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub identifier: String,
    pub full_name: String,
    pub college_or_company: String,
    pub skills: Vec<String>,
    pub role: UserRole,
    pub city: String,
}

/// Partial profile update - only present fields are applied
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub college_or_company: Option<String>,
    pub skills: Option<Vec<String>>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.college_or_company.is_none()
            && self.skills.is_none()
            && self.city.is_none()
            && self.phone.is_none()
    }
}

/// Split an identifier into (email, phone) on the presence of `@`
pub fn split_identifier(identifier: &str) -> (Option<String>, Option<String>) {
    if identifier.contains('@') {
        (Some(identifier.to_string()), None)
    } else {
        (None, Some(identifier.to_string()))
    }
}

impl User {
    /// Find user by id
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find user by email or phone identifier
    pub async fn find_by_identifier(identifier: &str, pool: &PgPool) -> Result<Option<Self>> {
        let query = if identifier.contains('@') {
            "SELECT * FROM users WHERE email = $1"
        } else {
            "SELECT * FROM users WHERE phone = $1"
        };

        sqlx::query_as::<_, Self>(query)
            .bind(identifier)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new user from a signup payload
    ///
    /// Sets signup_at and last_login_at to the same instant.
    pub async fn insert_from_signup(payload: &SignupPayload, pool: &PgPool) -> Result<Self> {
        let (email, phone) = split_identifier(&payload.identifier);
        let now = Utc::now();

        sqlx::query_as::<_, Self>(
            "INSERT INTO users (
                email,
                phone,
                full_name,
                college_or_company,
                skills,
                role,
                city,
                signup_at,
                last_login_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING *",
        )
        .bind(email)
        .bind(phone)
        .bind(&payload.full_name)
        .bind(&payload.college_or_company)
        .bind(&payload.skills)
        .bind(payload.role)
        .bind(&payload.city)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Stamp last_login_at on a successful login
    pub async fn touch_last_login(id: Uuid, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE users SET last_login_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Apply a partial profile update, leaving absent fields untouched
    pub async fn apply_update(id: Uuid, update: &ProfileUpdate, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE users
             SET full_name = COALESCE($2, full_name),
                 college_or_company = COALESCE($3, college_or_company),
                 skills = COALESCE($4, skills),
                 city = COALESCE($5, city),
                 phone = COALESCE($6, phone)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&update.full_name)
        .bind(&update.college_or_company)
        .bind(&update.skills)
        .bind(&update.city)
        .bind(&update.phone)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_identifier_email() {
        let (email, phone) = split_identifier("a@b.com");
        assert_eq!(email.as_deref(), Some("a@b.com"));
        assert!(phone.is_none());
    }

    #[test]
    fn test_split_identifier_phone() {
        let (email, phone) = split_identifier("+15551234567");
        assert!(email.is_none());
        assert_eq!(phone.as_deref(), Some("+15551234567"));
    }

    #[test]
    fn test_profile_update_is_empty() {
        assert!(ProfileUpdate::default().is_empty());

        let update = ProfileUpdate {
            city: Some("Pune".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"USER\"");
        assert_eq!(
            serde_json::from_str::<UserRole>("\"ADMIN\"").unwrap(),
            UserRole::Admin
        );
    }
}
