//! # Card Store
//!
//! Read-only access to the card database. The daemon asks one question:
//! "give me a random card whose value is N". The `print-id` utility asks
//! a second: "give me the card with this id". Both are behind the
//! [`CardStore`] trait so the dispatcher can be exercised against an
//! in-memory store in tests.
//!
//! ## Schema
//!
//! The SQLite database is produced and pre-processed by an out-of-band
//! conversion step and consumed read-only here:
//!
//! ```sql
//! CREATE TABLE cards (
//!     id           INTEGER PRIMARY KEY,
//!     name         TEXT NOT NULL,
//!     description  TEXT NOT NULL,
//!     value        INTEGER NOT NULL,
//!     illustration BLOB NOT NULL
//! );
//! ```

use rand::seq::IndexedRandom;
use rusqlite::{Connection, OpenFlags, Row, params};
use std::path::Path;

use crate::card::Card;
use crate::error::TiradaError;

/// Read-only card lookup capability.
pub trait CardStore {
    /// Return one card with the given value, chosen uniformly at random
    /// among matches, or `None` if no card matches.
    fn select_random(&mut self, value: u8) -> Result<Option<Card>, TiradaError>;

    /// Return the card with the given id, if any.
    fn by_id(&mut self, id: i64) -> Result<Option<Card>, TiradaError>;
}

/// # SQLite Card Store
///
/// Selection is done in two steps: fetch the matching ids, pick one
/// uniformly with [`rand`], then fetch that single row. This keeps the
/// random choice out of SQL (testable, seedable) and avoids pulling
/// every matching illustration blob just to throw all but one away.
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    /// Open the database read-only.
    ///
    /// ## Errors
    ///
    /// Returns [`TiradaError::Store`] if the file is missing, not a
    /// database, or unreadable.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TiradaError> {
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { connection })
    }

    fn fetch(&self, id: i64) -> Result<Option<Card>, TiradaError> {
        let mut statement = self.connection.prepare(
            "SELECT id, name, description, value, illustration FROM cards WHERE id = ?1",
        )?;
        let mut rows = statement.query_map(params![id], card_from_row)?;
        match rows.next() {
            Some(card) => Ok(Some(card?)),
            None => Ok(None),
        }
    }
}

impl CardStore for SqliteStore {
    fn select_random(&mut self, value: u8) -> Result<Option<Card>, TiradaError> {
        let mut statement = self
            .connection
            .prepare("SELECT id FROM cards WHERE value = ?1")?;
        let ids = statement
            .query_map(params![value], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        drop(statement);

        match ids.choose(&mut rand::rng()) {
            Some(id) => self.fetch(*id),
            None => Ok(None),
        }
    }

    fn by_id(&mut self, id: i64) -> Result<Option<Card>, TiradaError> {
        self.fetch(id)
    }
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        value: row.get(3)?,
        illustration: row.get(4)?,
    })
}
