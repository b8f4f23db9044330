use crate::db::connection::{init_db, Database};
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns a fresh test database using the production schema. Each test
/// gets its own file under the system temp dir.
pub fn init_test_db(label: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "{label}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));

    let db = Database::new(path);
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}
