//! Address book aggregate.
//!
//! # Responsibility
//! - Map contact names to exclusively owned records.
//! - Expose vetted CRUD and the upcoming-birthday query.
//!
//! # Invariants
//! - Every key equals `record.name().as_str()` of its entry.
//! - Iteration follows first-insertion order; re-adding a name keeps its
//!   original position.

use crate::model::record::Record;
use crate::schedule::upcoming::{upcoming_birthdays, UpcomingBirthday};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name-keyed collection of contact records.
///
/// Serialized as an ordered list of records so the key invariant can be
/// rebuilt on load instead of trusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Record>", into = "Vec<Record>")]
pub struct AddressBook {
    records: IndexMap<String, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record`, fully replacing any record with the same name.
    pub fn add_record(&mut self, record: Record) {
        self.records
            .insert(record.name().as_str().to_string(), record);
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    /// Mutable lookup. `Record` has no name setter, so the key stays valid.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    /// Removes `name` if present. Returns whether a record was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.records.shift_remove(name).is_some()
    }

    /// Records in book order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Contacts whose next observed birthday is within a week of `today`.
    ///
    /// Results follow book order, not date order.
    pub fn get_upcoming_birthdays(&self, today: NaiveDate) -> Vec<UpcomingBirthday> {
        upcoming_birthdays(self.records(), today)
    }
}

impl From<Vec<Record>> for AddressBook {
    fn from(records: Vec<Record>) -> Self {
        let mut book = Self::new();
        for record in records {
            book.add_record(record);
        }
        book
    }
}

impl From<AddressBook> for Vec<Record> {
    fn from(book: AddressBook) -> Self {
        book.records.into_values().collect()
    }
}
