//! Test fixtures: dependency containers and database rows.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use server_core::domains::auth::models::Otp;
use server_core::domains::auth::JwtService;
use server_core::domains::user::models::{SignupPayload, User, UserRole};
use server_core::kernel::{BaseMailer, MockMailer, ServerDeps};

pub const TEST_JWT_SECRET: &str = "test_secret_key";

/// Dependency container with a capturing mock mailer
pub fn test_deps(pool: &PgPool) -> (ServerDeps, Arc<MockMailer>) {
    deps_with_mailer(pool, MockMailer::new())
}

/// Dependency container whose mailer fails every send
pub fn failing_deps(pool: &PgPool) -> (ServerDeps, Arc<MockMailer>) {
    deps_with_mailer(pool, MockMailer::failing())
}

fn deps_with_mailer(pool: &PgPool, mailer: MockMailer) -> (ServerDeps, Arc<MockMailer>) {
    let mailer = Arc::new(mailer);
    let as_base: Arc<dyn BaseMailer> = mailer.clone();

    let deps = ServerDeps::new(
        pool.clone(),
        as_base,
        Arc::new(JwtService::new(TEST_JWT_SECRET, 1440)),
    );

    (deps, mailer)
}

/// Unique email so tests sharing the database never collide
pub fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4())
}

/// Insert an OTP row with full control over expiry, attempts and used state
pub async fn insert_otp(
    pool: &PgPool,
    identifier: &str,
    code: &str,
    expires_in_minutes: i64,
    attempts: i32,
    used: bool,
) -> Otp {
    let expires_at = Utc::now() + chrono::Duration::minutes(expires_in_minutes);

    sqlx::query_as::<_, Otp>(
        "INSERT INTO otps (identifier, code, expires_at, attempts, used)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(identifier)
    .bind(code)
    .bind(expires_at)
    .bind(attempts)
    .bind(used)
    .fetch_one(pool)
    .await
    .expect("Failed to insert OTP fixture")
}

/// Reload an OTP row by id
pub async fn fetch_otp(pool: &PgPool, id: Uuid) -> Otp {
    sqlx::query_as::<_, Otp>("SELECT * FROM otps WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("Failed to fetch OTP fixture")
}

/// Insert a user via the signup path
pub async fn insert_user(pool: &PgPool, identifier: &str) -> User {
    User::insert_from_signup(
        &SignupPayload {
            identifier: identifier.to_string(),
            full_name: "Test User".to_string(),
            college_or_company: "Test College".to_string(),
            skills: vec!["rust".to_string(), "sql".to_string()],
            role: UserRole::User,
            city: "Mumbai".to_string(),
        },
        pool,
    )
    .await
    .expect("Failed to insert user fixture")
}
