//! SQLite database layer (embedded, no external dependencies)

use crate::error::StoreError;
use anyhow::{Context, Result};
use cafe_types::{Cafe, NewCafe};
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        let parent = match std::path::Path::new(database_path).parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => std::path::PathBuf::from("."),
        };

        tokio::fs::create_dir_all(&parent).await.with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;

        // Check if directory is writable
        let test_file = parent.join(".write_test");
        match tokio::fs::write(&test_file, b"test").await {
            Ok(_) => {
                let _ = tokio::fs::remove_file(&test_file).await;
                tracing::debug!("Database directory is writable");
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Database directory is not writable: {}: {}",
                    parent.display(),
                    e
                ));
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database. A single connection is kept open for the
    /// whole lifetime of the pool, otherwise the data would vanish.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cafe (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(250) NOT NULL UNIQUE CHECK (length(trim(name)) > 0),
                map_url VARCHAR(500) NOT NULL CHECK (length(trim(map_url)) > 0),
                img_url VARCHAR(500) NOT NULL CHECK (length(trim(img_url)) > 0),
                location VARCHAR(250) NOT NULL CHECK (length(trim(location)) > 0),
                seats VARCHAR(250) NOT NULL CHECK (length(trim(seats)) > 0),
                has_toilet BOOLEAN NOT NULL,
                has_wifi BOOLEAN NOT NULL,
                has_sockets BOOLEAN NOT NULL,
                can_take_calls BOOLEAN NOT NULL,
                coffee_price VARCHAR(250)
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<Cafe>, StoreError> {
        let rows: Vec<CafeRow> = sqlx::query_as(
            r#"
            SELECT id, name, map_url, img_url, location, seats,
                   has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price
            FROM cafe ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// All cafes ordered by name (binary collation, i.e. code point order).
    pub async fn list_by_name(&self) -> Result<Vec<Cafe>, StoreError> {
        let rows: Vec<CafeRow> = sqlx::query_as(
            r#"
            SELECT id, name, map_url, img_url, location, seats,
                   has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price
            FROM cafe ORDER BY name
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Cafe>, StoreError> {
        let row: Option<CafeRow> = sqlx::query_as(
            r#"
            SELECT id, name, map_url, img_url, location, seats,
                   has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price
            FROM cafe WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    pub async fn insert(&self, cafe: NewCafe) -> Result<Cafe, StoreError> {
        if let Some(field) = cafe.first_empty_field() {
            return Err(StoreError::MissingField(field));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO cafe (name, map_url, img_url, location, seats,
                              has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&cafe.name)
        .bind(&cafe.map_url)
        .bind(&cafe.img_url)
        .bind(&cafe.location)
        .bind(&cafe.seats)
        .bind(cafe.has_toilet)
        .bind(cafe.has_wifi)
        .bind(cafe.has_sockets)
        .bind(cafe.can_take_calls)
        .bind(&cafe.coffee_price)
        .execute(&*self.pool)
        .await
        .map_err(|e| classify_insert_error(e, &cafe.name))?;

        Ok(cafe.into_cafe(result.last_insert_rowid()))
    }

    /// Close every pooled connection. Later queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Remove a cafe. Returns whether a row was deleted; an unknown id is not
    /// an error.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM cafe WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn classify_insert_error(err: sqlx::Error, name: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => return StoreError::DuplicateName(name.to_string()),
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                return StoreError::Constraint(db_err.message().to_string())
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct CafeRow {
    id: i64,
    name: String,
    map_url: String,
    img_url: String,
    location: String,
    seats: String,
    has_toilet: bool,
    has_wifi: bool,
    has_sockets: bool,
    can_take_calls: bool,
    coffee_price: Option<String>,
}

impl From<CafeRow> for Cafe {
    fn from(r: CafeRow) -> Self {
        Cafe {
            id: r.id,
            name: r.name,
            map_url: r.map_url,
            img_url: r.img_url,
            location: r.location,
            seats: r.seats,
            has_toilet: r.has_toilet,
            has_wifi: r.has_wifi,
            has_sockets: r.has_sockets,
            can_take_calls: r.can_take_calls,
            coffee_price: r.coffee_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_cafe(name: &str) -> NewCafe {
        NewCafe {
            name: name.to_string(),
            map_url: "https://maps.example/1".to_string(),
            img_url: "https://img.example/1".to_string(),
            location: "Soho".to_string(),
            seats: "10-20".to_string(),
            has_toilet: true,
            has_wifi: true,
            has_sockets: false,
            can_take_calls: false,
            coffee_price: Some("£3".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_then_list() {
        let db = Database::in_memory().await.unwrap();

        let stored = db.insert(new_cafe("Blue Bottle")).await.unwrap();
        let all = db.list_all().await.unwrap();

        assert_eq!(all, vec![stored.clone()]);
        assert_eq!(stored.name, "Blue Bottle");
        assert!(stored.has_toilet);
        assert!(!stored.has_sockets);
        assert_eq!(stored.coffee_price.as_deref(), Some("£3"));
    }

    #[tokio::test]
    async fn test_ids_are_fresh_and_not_reused() {
        let db = Database::in_memory().await.unwrap();

        let first = db.insert(new_cafe("First")).await.unwrap();
        let second = db.insert(new_cafe("Second")).await.unwrap();
        assert_ne!(first.id, second.id);

        db.delete(second.id).await.unwrap();
        let third = db.insert(new_cafe("Third")).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = Database::in_memory().await.unwrap();

        db.insert(new_cafe("Blue Bottle")).await.unwrap();
        let err = db.insert(new_cafe("Blue Bottle")).await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateName(ref n) if n == "Blue Bottle"));
        let named: Vec<_> = db
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|c| c.name == "Blue Bottle")
            .collect();
        assert_eq!(named.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_required_field_rejected() {
        let db = Database::in_memory().await.unwrap();

        let mut cafe = new_cafe("Empty Seats");
        cafe.seats = String::new();
        let err = db.insert(cafe).await.unwrap_err();

        assert!(matches!(err, StoreError::MissingField("seats")));
        assert!(db.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_coffee_price_allowed() {
        let db = Database::in_memory().await.unwrap();

        let mut cafe = new_cafe("No Price");
        cafe.coffee_price = None;
        let stored = db.insert(cafe).await.unwrap();

        let fetched = db.get(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.coffee_price, None);
    }

    #[tokio::test]
    async fn test_delete_present_and_absent() {
        let db = Database::in_memory().await.unwrap();

        let keep = db.insert(new_cafe("Keep")).await.unwrap();
        let gone = db.insert(new_cafe("Gone")).await.unwrap();

        assert!(db.delete(gone.id).await.unwrap());
        assert_eq!(db.get(gone.id).await.unwrap(), None);
        assert_eq!(db.list_all().await.unwrap(), vec![keep.clone()]);

        // Unknown ids are a silent no-op
        assert!(!db.delete(gone.id).await.unwrap());
        assert!(!db.delete(9999).await.unwrap());
        assert_eq!(db.list_all().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn test_list_by_name_sorted() {
        let db = Database::in_memory().await.unwrap();

        for name in ["Monmouth", "Attendant", "Workshop", "Caravan"] {
            db.insert(new_cafe(name)).await.unwrap();
        }

        let names: Vec<String> = db
            .list_by_name()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Attendant", "Caravan", "Monmouth", "Workshop"]);
    }

    #[tokio::test]
    async fn test_file_database_persists() {
        let dir = std::env::temp_dir().join(format!("cafe-db-{}", uuid::Uuid::new_v4()));
        let path = dir.join("cafes.db");
        let path = path.to_string_lossy().to_string();

        {
            let db = Database::new(&path).await.unwrap();
            db.insert(new_cafe("Persisted")).await.unwrap();
        }

        let db = Database::new(&path).await.unwrap();
        let all = db.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Persisted");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
