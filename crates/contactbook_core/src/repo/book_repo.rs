//! Address book snapshot repository and SQLite implementation.
//!
//! # Responsibility
//! - Persist and restore the whole address book as one snapshot.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Saves replace the previous snapshot atomically.
//! - Loads preserve contact order, phone order (duplicates included) and
//!   birthdays exactly.
//! - Read paths re-validate every field and reject invalid persisted state
//!   instead of masking it.

use crate::db::DbError;
use crate::model::address_book::AddressBook;
use crate::model::fields::{Birthday, FieldError};
use crate::model::record::Record;
use log::{error, info};
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot load/save operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Snapshot persistence contract for the address book.
pub trait AddressBookRepository {
    /// Restores the last saved snapshot, or an empty book when none exists.
    fn load_book(&self) -> RepoResult<AddressBook>;
    /// Replaces the stored snapshot with `book`.
    fn save_book(&self, book: &AddressBook) -> RepoResult<()>;
}

/// SQLite-backed address book repository.
pub struct SqliteAddressBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAddressBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AddressBookRepository for SqliteAddressBookRepository<'_> {
    fn load_book(&self) -> RepoResult<AddressBook> {
        let started_at = Instant::now();
        match load_snapshot(self.conn) {
            Ok(book) => {
                info!(
                    "event=book_load module=repo status=ok contacts={} duration_ms={}",
                    book.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(book)
            }
            Err(err) => {
                error!(
                    "event=book_load module=repo status=error duration_ms={} error_code={}",
                    started_at.elapsed().as_millis(),
                    error_code(&err)
                );
                Err(err)
            }
        }
    }

    fn save_book(&self, book: &AddressBook) -> RepoResult<()> {
        let started_at = Instant::now();
        match save_snapshot(self.conn, book) {
            Ok(()) => {
                info!(
                    "event=book_save module=repo status=ok contacts={} duration_ms={}",
                    book.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=book_save module=repo status=error contacts={} duration_ms={} error_code={}",
                    book.len(),
                    started_at.elapsed().as_millis(),
                    error_code(&err)
                );
                Err(err)
            }
        }
    }
}

fn load_snapshot(conn: &Connection) -> RepoResult<AddressBook> {
    let mut contacts_stmt =
        conn.prepare("SELECT name, birthday FROM contacts ORDER BY position ASC;")?;
    let mut phones_stmt = conn.prepare(
        "SELECT value FROM phones WHERE contact_name = ?1 ORDER BY position ASC;",
    )?;

    let mut book = AddressBook::new();
    let mut rows = contacts_stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get("name")?;
        let mut record = Record::new(&name).map_err(|err| invalid_field("contacts.name", err))?;
        if record.name().as_str() != name {
            return Err(RepoError::InvalidData(format!(
                "untrimmed contact name `{name}` in contacts.name"
            )));
        }

        if let Some(birthday) = row.get::<_, Option<String>>("birthday")? {
            record
                .add_birthday(&birthday)
                .map_err(|err| invalid_field("contacts.birthday", err))?;
        }

        let mut phone_rows = phones_stmt.query([name.as_str()])?;
        while let Some(phone_row) = phone_rows.next()? {
            let value: String = phone_row.get("value")?;
            record
                .add_phone(&value)
                .map_err(|err| invalid_field("phones.value", err))?;
        }

        book.add_record(record);
    }

    Ok(book)
}

fn save_snapshot(conn: &Connection, book: &AddressBook) -> RepoResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM phones;", [])?;
    tx.execute("DELETE FROM contacts;", [])?;

    {
        let mut insert_contact =
            tx.prepare("INSERT INTO contacts (position, name, birthday) VALUES (?1, ?2, ?3);")?;
        let mut insert_phone = tx.prepare(
            "INSERT INTO phones (contact_name, position, value) VALUES (?1, ?2, ?3);",
        )?;

        for (position, record) in book.records().enumerate() {
            insert_contact.execute(params![
                position_to_db(position)?,
                record.name().as_str(),
                record.birthday().map(Birthday::canonical),
            ])?;

            for (phone_position, phone) in record.phones().iter().enumerate() {
                insert_phone.execute(params![
                    record.name().as_str(),
                    position_to_db(phone_position)?,
                    phone.as_str(),
                ])?;
            }
        }
    }

    tx.commit()?;
    Ok(())
}

fn invalid_field(column: &str, err: FieldError) -> RepoError {
    RepoError::InvalidData(format!("{column}: {err}"))
}

fn position_to_db(position: usize) -> RepoResult<i64> {
    i64::try_from(position)
        .map_err(|_| RepoError::InvalidData(format!("position {position} exceeds i64 range")))
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Db(_) => "db_error",
        RepoError::InvalidData(_) => "invalid_data",
    }
}
