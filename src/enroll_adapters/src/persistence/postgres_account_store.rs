use enroll_core::{AccountRecord, AccountStore, AccountStoreError, Email, ReferralCode};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use sqlx::{Pool, Postgres, types::Json};

/// Account store backed by a single `jsonb` document column.
///
/// The schema is open-ended on purpose: clients may register with arbitrary
/// attributes, so the whole record is stored as one document. Uniqueness of
/// the email is enforced by an expression index.
#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: sqlx::PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Looking up matching account in PostgreSQL", skip_all)]
    async fn find_match(
        &self,
        criteria: &Map<String, Value>,
    ) -> Result<Option<AccountRecord>, AccountStoreError> {
        let document: Option<Json<Map<String, Value>>> = sqlx::query_scalar(
            r#"
                SELECT document
                FROM accounts
                WHERE document @> $1
            "#,
        )
        .bind(Json(criteria))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(document.map(|document| AccountRecord::from_attributes(document.0)))
    }

    #[tracing::instrument(name = "Crediting referrer in PostgreSQL", skip_all)]
    async fn credit_referrer(
        &self,
        code: &ReferralCode,
        new_member: &Email,
    ) -> Result<(), AccountStoreError> {
        // Single statement so the increment and the append stay atomic.
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET document = jsonb_set(
                    jsonb_set(
                        document,
                        '{freeSpots}',
                        to_jsonb(COALESCE((document->>'freeSpots')::bigint, 0) + 1)
                    ),
                    '{referrals}',
                    COALESCE(document->'referrals', '[]'::jsonb) || to_jsonb($2::text)
                )
                WHERE document->>'referralCode' = $1
            "#,
        )
        .bind(code.as_str())
        .bind(new_member.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            tracing::debug!("no account owns the supplied referral code");
        }

        Ok(())
    }

    #[tracing::instrument(name = "Inserting account into PostgreSQL", skip_all)]
    async fn insert(&self, record: AccountRecord) -> Result<AccountRecord, AccountStoreError> {
        let document: Json<Map<String, Value>> = sqlx::query_scalar(
            r#"
                INSERT INTO accounts (document)
                VALUES ($1)
                RETURNING document
            "#,
        )
        .bind(Json(record.attributes()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return AccountStoreError::AccountAlreadyExists;
                }
            }
            AccountStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(AccountRecord::from_attributes(document.0))
    }
}
