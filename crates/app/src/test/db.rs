//! Per-test PostgreSQL databases inside one shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

const DB_USER: &str = "storefront_test";
const DB_PASSWORD: &str = "storefront_test_password";
const POSTGRES_TAG: &str = "17-alpine";

/// Check a generated database name before it is spliced into DDL.
fn validate_database_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > 63 {
        return Err(format!("database name '{name}' must be 1-63 characters"));
    }

    if !name.starts_with(|c: char| c.is_ascii_lowercase() || c == '_') {
        return Err(format!(
            "database name '{name}' must start with a lowercase letter or underscore"
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(format!(
            "database name '{name}' may only contain lowercase letters, digits and underscores"
        ));
    }

    Ok(())
}

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

static DROP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn start_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(DB_USER)
        .with_password(DB_PASSWORD)
        .with_db_name("storefront_test")
        .with_tag(POSTGRES_TAG)
        .start()
        .await
        .expect("failed to start PostgreSQL container")
}

/// Background task dropping databases whose `TestDb` went away.
async fn start_drop_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                eprintln!("failed to drop test database '{name}': {error}");
            }
        }
    });

    sender
}

async fn maintenance_url() -> String {
    let container = POSTGRES_CONTAINER.get_or_init(start_container).await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("failed to read container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{DB_USER}:{DB_PASSWORD}@{host}:{port}")
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    if validate_database_name(name).is_err() || POSTGRES_CONTAINER.get().is_none() {
        return Ok(());
    }

    let mut conn = PgConnection::connect(&format!("{}/postgres", maintenance_url().await)).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database, dropped in the background once released.
#[derive(Debug, Clone)]
pub struct TestDb {
    pub pool: PgPool,
    pub name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = DROP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        let name = format!("storefront_{}", Uuid::now_v7().simple());

        DROP_SENDER.get_or_init(start_drop_task).await;

        validate_database_name(&name).expect("generated database name is valid");

        let base_url = maintenance_url().await;

        let mut conn = PgConnection::connect(&format!("{base_url}/postgres"))
            .await
            .expect("failed to connect to maintenance database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("failed to create test database");

        conn.close().await.expect("failed to close admin connection");

        let pool = PgPool::connect(&format!("{base_url}/{name}"))
            .await
            .expect("failed to connect to test database");

        crate::database::migrate(&pool)
            .await
            .expect("failed to migrate test database");

        Self { pool, name }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_valid() {
        let name = format!("storefront_{}", Uuid::now_v7().simple());

        assert!(validate_database_name(&name).is_ok());
    }

    #[test]
    fn unsafe_names_are_rejected() {
        assert!(validate_database_name("").is_err());
        assert!(validate_database_name(&"a".repeat(64)).is_err());
        assert!(validate_database_name("1starts_with_digit").is_err());
        assert!(validate_database_name("has\"quote").is_err());
        assert!(validate_database_name("has space").is_err());
        assert!(validate_database_name("Upper").is_err());
    }

    #[tokio::test]
    async fn databases_are_migrated() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM information_schema.tables WHERE table_name IN ('users', 'products', 'carts')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("failed to count tables");

        assert_eq!(tables, 3);
    }
}
