//! Per-test Postgres databases on a shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

const TEST_USER: &str = "storefront_test";
const TEST_PASSWORD: &str = "storefront_test_password";

/// Maximum connections per test pool. Concurrency tests need headroom above
/// the number of tasks they spawn.
const TEST_POOL_SIZE: u32 = 20;

/// Started once and shared by every test in the binary.
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Receives names of databases to drop once their `TestDb` goes away.
static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

/// Generated names are `[a-z0-9_]`; anything else is refused before it is
/// spliced into DDL.
fn is_safe_database_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name.starts_with(|c: char| c.is_ascii_lowercase())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(TEST_USER)
        .with_password(TEST_PASSWORD)
        .with_db_name(TEST_USER)
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn init_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(db_name) = receiver.recv().await {
            if let Err(err) = drop_database(&db_name).await {
                eprintln!("Failed to drop test database '{db_name}': {err}");
            }
        }
    });

    sender
}

async fn server_url(database: &str) -> Option<String> {
    let container = POSTGRES_CONTAINER.get()?;
    let port = container.get_host_port_ipv4(5432).await.ok()?;
    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    Some(format!(
        "postgresql://{TEST_USER}:{TEST_PASSWORD}@{host}:{port}/{database}"
    ))
}

async fn drop_database(db_name: &str) -> Result<(), sqlx::Error> {
    if !is_safe_database_name(db_name) {
        return Ok(());
    }

    let Some(url) = server_url("postgres").await else {
        return Ok(());
    };

    let mut conn = PgConnection::connect(&url).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database private to one test.
///
/// Services commit normally; isolation comes from every test getting its own
/// database, which is dropped in the background when the `TestDb` is dropped.
#[derive(Debug, Clone)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("Clock is before the Unix epoch")
            .as_nanos();

        let thread_id = format!("{:?}", std::thread::current().id())
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();

        let name = format!("storefront_test_{nanos}_{thread_id}");

        CLEANUP_SENDER.get_or_init(init_cleanup_task).await;
        POSTGRES_CONTAINER
            .get_or_init(init_postgres_container)
            .await;

        assert!(is_safe_database_name(&name), "unsafe database name {name}");

        let admin_url = server_url("postgres")
            .await
            .expect("Failed to resolve container address");

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let database_url = server_url(&name)
            .await
            .expect("Failed to resolve container address");

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(TEST_POOL_SIZE)
            .connect(&database_url)
            .await
            .expect("Failed to create pool for test database");

        crate::database::migrate(&pool)
            .await
            .expect("Failed to run migrations on test database");

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
    fn generated_names_are_safe() {
        assert!(is_safe_database_name("storefront_test_1700000000_12"));
    }

    #[test]
    fn names_with_quotes_or_uppercase_are_refused() {
        assert!(!is_safe_database_name(""));
        assert!(!is_safe_database_name("Storefront"));
        assert!(!is_safe_database_name("db\"; DROP DATABASE x; --"));
        assert!(!is_safe_database_name("1_starts_with_digit"));
        assert!(!is_safe_database_name(&"a".repeat(64)));
    }

    #[tokio::test]
    async fn migrations_create_storefront_tables() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'public' \
               AND table_name IN ('users', 'products', 'product_variants', 'carts', 'cart_items', 'orders')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to query tables");

        assert_eq!(tables, 6);
    }

    #[tokio::test]
    async fn one_open_cart_per_user_is_enforced() {
        let test_db = TestDb::new().await;

        let user: i64 = sqlx::query_scalar(
            "INSERT INTO users (email) VALUES ('a@example.test') RETURNING user_id",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to insert user");

        sqlx::query("INSERT INTO carts (user_id) VALUES ($1)")
            .bind(user)
            .execute(test_db.pool())
            .await
            .expect("Failed to insert first cart");

        let second = sqlx::query("INSERT INTO carts (user_id) VALUES ($1)")
            .bind(user)
            .execute(test_db.pool())
            .await;

        assert!(second.is_err(), "expected unique violation, got {second:?}");
    }
}
