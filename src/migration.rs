//! Versioned DDL for the `user` and `restaurant` tables.
//!
//! Applied versions are recorded in `_migrations`; each pending step runs in
//! its own transaction together with its ledger row.

use crate::error::AppError;
use sqlx::PgPool;

pub struct Migration {
    pub version: &'static str,
    pub statements: &'static [&'static str],
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_create_user_table",
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS "user" (
                id UUID PRIMARY KEY,
                email VARCHAR(255) NOT NULL,
                full_name VARCHAR(255),
                hashed_password TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                is_superuser BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
            r#"CREATE UNIQUE INDEX IF NOT EXISTS ix_user_email ON "user" (email)"#,
        ],
    },
    Migration {
        version: "0002_create_restaurant_table",
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS restaurant (
                id UUID PRIMARY KEY,
                owner_id UUID NOT NULL REFERENCES "user" (id) ON DELETE CASCADE,
                title VARCHAR(255) NOT NULL,
                description VARCHAR(255)
            )
            "#,
            "CREATE INDEX IF NOT EXISTS ix_restaurant_owner_id ON restaurant (owner_id)",
        ],
    },
    Migration {
        version: "0003_add_restaurant_revo_keys",
        statements: &[
            "ALTER TABLE restaurant ADD COLUMN IF NOT EXISTS revo_tenant VARCHAR(255)",
            "ALTER TABLE restaurant ADD COLUMN IF NOT EXISTS revo_client_key VARCHAR(255)",
            "ALTER TABLE restaurant ADD COLUMN IF NOT EXISTS revo_api_key VARCHAR(255)",
        ],
    },
];

/// Versions from `migrations` not in `applied`, in declaration order.
pub fn pending<'a>(migrations: &'a [Migration], applied: &[String]) -> Vec<&'a Migration> {
    migrations
        .iter()
        .filter(|m| !applied.iter().any(|a| a == m.version))
        .collect()
}

/// Create the ledger table if needed and run every pending migration.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            version TEXT PRIMARY KEY,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    let applied: Vec<String> = sqlx::query_scalar("SELECT version FROM _migrations")
        .fetch_all(pool)
        .await?;

    for migration in pending(MIGRATIONS, &applied) {
        let mut tx = pool.begin().await?;
        for statement in migration.statements {
            sqlx::query(*statement).execute(&mut *tx).await?;
        }
        sqlx::query("INSERT INTO _migrations (version) VALUES ($1)")
            .bind(migration.version)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(version = migration.version, "applied migration");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_unique_and_sorted() {
        let versions: Vec<&str> = MIGRATIONS.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(versions, sorted);
    }

    #[test]
    fn pending_skips_applied_versions() {
        let applied = vec!["0001_create_user_table".to_string()];
        let left: Vec<&str> = pending(MIGRATIONS, &applied).iter().map(|m| m.version).collect();
        assert_eq!(left, ["0002_create_restaurant_table", "0003_add_restaurant_revo_keys"]);
    }
}
