//! Shared harness for integration tests against a real SQLite file.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use lavka_storefront::db::{DbConnection, DbPool, establish_connection_pool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// A migrated throwaway storefront database, removed again on drop.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        // A stale file from an aborted run would carry old data.
        std::fs::remove_file(filename).ok();

        let pool = establish_connection_pool(filename).expect("failed to open test database");
        let mut conn = pool.get().expect("failed to check out a connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("storefront migrations failed");

        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn conn(&self) -> DbConnection {
        self.pool.get().expect("failed to check out a connection")
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}
