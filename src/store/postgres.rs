//! PostgreSQL store on a shared `PgPool`.

use crate::error::AppError;
use crate::models::{NewUser, Restaurant, RestaurantUpdate, User};
use crate::store::Store;
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

const RESTAURANT_COLUMNS: &str =
    "id, owner_id, title, description, revo_tenant, revo_client_key, revo_api_key";
const USER_COLUMNS: &str = "id, email, full_name, hashed_password, is_active, is_superuser";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_restaurants(
        &self,
        owner: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Restaurant>, i64), AppError> {
        let (count, rows) = match owner {
            None => {
                let count: i64 = sqlx::query_scalar("SELECT count(*) FROM restaurant")
                    .fetch_one(&self.pool)
                    .await?;
                let sql = format!("SELECT {} FROM restaurant OFFSET $1 LIMIT $2", RESTAURANT_COLUMNS);
                tracing::debug!(sql = %sql, skip, limit, "query");
                let rows = sqlx::query_as::<_, Restaurant>(&sql)
                    .bind(skip)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?;
                (count, rows)
            }
            Some(owner_id) => {
                let count: i64 =
                    sqlx::query_scalar("SELECT count(*) FROM restaurant WHERE owner_id = $1")
                        .bind(owner_id)
                        .fetch_one(&self.pool)
                        .await?;
                let sql = format!(
                    "SELECT {} FROM restaurant WHERE owner_id = $1 OFFSET $2 LIMIT $3",
                    RESTAURANT_COLUMNS
                );
                tracing::debug!(sql = %sql, %owner_id, skip, limit, "query");
                let rows = sqlx::query_as::<_, Restaurant>(&sql)
                    .bind(owner_id)
                    .bind(skip)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?;
                (count, rows)
            }
        };
        Ok((rows, count))
    }

    async fn get_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, AppError> {
        let sql = format!("SELECT {} FROM restaurant WHERE id = $1", RESTAURANT_COLUMNS);
        let row = sqlx::query_as::<_, Restaurant>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_restaurant(&self, r: &Restaurant) -> Result<Restaurant, AppError> {
        let sql = format!(
            "INSERT INTO restaurant ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {cols}",
            cols = RESTAURANT_COLUMNS
        );
        let row = sqlx::query_as::<_, Restaurant>(&sql)
            .bind(r.id)
            .bind(r.owner_id)
            .bind(&r.title)
            .bind(&r.description)
            .bind(&r.revo_tenant)
            .bind(&r.revo_client_key)
            .bind(&r.revo_api_key)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_restaurant(
        &self,
        id: Uuid,
        patch: &RestaurantUpdate,
    ) -> Result<Option<Restaurant>, AppError> {
        let changes = patch.changed_columns();
        if changes.is_empty() {
            return self.get_restaurant(id).await;
        }
        let sql = update_sql(&changes);
        tracing::debug!(sql = %sql, "update restaurant");
        let mut query = sqlx::query_as::<_, Restaurant>(&sql).bind(id);
        for (_, value) in &changes {
            query = query.bind(*value);
        }
        let row = query.fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn delete_restaurant(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM restaurant WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!(r#"SELECT {} FROM "user" WHERE id = $1"#, USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!(r#"SELECT {} FROM "user" WHERE email = $1"#, USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let user = user.into_user();
        let sql = format!(
            r#"INSERT INTO "user" ({cols}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {cols}"#,
            cols = USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.hashed_password)
            .bind(user.is_active)
            .bind(user.is_superuser)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn set_user_password(&self, id: Uuid, hashed_password: &str) -> Result<(), AppError> {
        sqlx::query(r#"UPDATE "user" SET hashed_password = $2 WHERE id = $1"#)
            .bind(id)
            .bind(hashed_password)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM "user" WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Internal(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::Internal("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

/// `UPDATE` touching only `changes`; `$1` is the id, values follow in order.
fn update_sql(changes: &[(&'static str, Option<&str>)]) -> String {
    let sets: Vec<String> = changes
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{} = ${}", column, i + 2))
        .collect();
    format!(
        "UPDATE restaurant SET {} WHERE id = $1 RETURNING {}",
        sets.join(", "),
        RESTAURANT_COLUMNS
    )
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
