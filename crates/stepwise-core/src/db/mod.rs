//! SQLite storage for locally imported study plans.
//!
//! Plans imported from markdown files are kept in a single `plans` table.
//! The backend owns the plans it generates; this store only holds what the
//! learner brought in themselves.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens the database file, creating it and its schema when missing.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
