use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// How long an issued code stays valid
pub const OTP_TTL_MINUTES: i64 = 10;

/// Verification attempts allowed per record
pub const MAX_ATTEMPTS: i32 = 3;

/// OTP record - SQL persistence layer
///
/// A record is consumable only while `used` is false, `attempts` is below
/// the limit and `expires_at` is in the future.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Otp {
    pub id: Uuid,
    pub identifier: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub attempts: i32,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl Otp {
    /// Insert a fresh record for an identifier, expiring in ten minutes
    pub async fn create(identifier: &str, code: &str, pool: &PgPool) -> Result<Self> {
        let expires_at = Utc::now() + chrono::Duration::minutes(OTP_TTL_MINUTES);

        sqlx::query_as::<_, Self>(
            "INSERT INTO otps (identifier, code, expires_at)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(identifier)
        .bind(code)
        .bind(expires_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find the newest unexpired, unused record for an identifier
    pub async fn find_live(identifier: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM otps
             WHERE identifier = $1
               AND used = FALSE
               AND expires_at > NOW()
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(identifier)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Find the newest unexpired, unused record carrying this exact code
    ///
    /// After a resend more than one record can be live for an identifier;
    /// verification matches on identifier and code together so every live
    /// code stays spendable.
    pub async fn find_live_matching(
        identifier: &str,
        code: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM otps
             WHERE identifier = $1
               AND code = $2
               AND used = FALSE
               AND expires_at > NOW()
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(identifier)
        .bind(code)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark a record used, but only if it is still unused
    ///
    /// Conditional update so two concurrent verifications cannot both
    /// consume the same code. Returns None when the record was already
    /// taken.
    pub async fn consume(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE otps
             SET used = TRUE
             WHERE id = $1
               AND used = FALSE
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Count a wrong code presented against this record
    pub async fn record_failed_attempt(id: Uuid, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE otps SET attempts = attempts + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Delete records that are used or expired for over an hour
    ///
    /// Called by the hourly retention sweep. Returns rows removed.
    pub async fn purge_stale(pool: &PgPool) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM otps WHERE used = TRUE OR expires_at < NOW() - INTERVAL '1 hour'")
                .execute(pool)
                .await?;

        Ok(result.rows_affected())
    }
}
