//! Contact use-case service.
//!
//! # Responsibility
//! - Provide the command-level contact operations used by the CLI.
//! - Own the in-memory address book between snapshot load and save.
//!
//! # Invariants
//! - Multi-step commands validate every input before mutating the book.
//! - Names are trimmed before lookup, matching how records store them.
//! - Service APIs never bypass the repository snapshot contract.

use crate::model::address_book::AddressBook;
use crate::model::fields::{Birthday, FieldError, Name, Phone};
use crate::model::record::Record;
use crate::repo::book_repo::{AddressBookRepository, RepoError};
use crate::schedule::upcoming::UpcomingBirthday;
use chrono::NaiveDate;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed field validation.
    Field(FieldError),
    /// Target contact does not exist.
    ContactNotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(err) => write!(f, "{err}"),
            Self::ContactNotFound(name) => write!(f, "contact {name} not found"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::ContactNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<FieldError> for ServiceError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Whether `add_contact` created a record or extended an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Updated,
}

/// Use-case service over one address book snapshot.
pub struct ContactService<R: AddressBookRepository> {
    repo: R,
    book: AddressBook,
}

impl<R: AddressBookRepository> ContactService<R> {
    /// Loads the persisted snapshot through `repo`.
    pub fn open(repo: R) -> ServiceResult<Self> {
        let book = repo.load_book()?;
        Ok(Self { repo, book })
    }

    /// Persists the current book, replacing the stored snapshot.
    pub fn save(&self) -> ServiceResult<()> {
        self.repo.save_book(&self.book)?;
        Ok(())
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    /// Records in book order.
    pub fn contacts(&self) -> impl Iterator<Item = &Record> {
        self.book.records()
    }

    /// Appends `phone` to the contact, creating the contact first if needed.
    ///
    /// # Contract
    /// - Name and phone are validated before any mutation, so a rejected
    ///   phone never leaves an empty new contact behind.
    pub fn add_contact(&mut self, name: &str, phone: &str) -> ServiceResult<AddOutcome> {
        let name = Name::parse(name)?;
        let phone = Phone::parse(phone)?;

        let outcome = match self.book.find_mut(name.as_str()) {
            Some(record) => {
                record.add_phone(phone.as_str())?;
                AddOutcome::Updated
            }
            None => {
                let mut record = Record::new(name.as_str())?;
                record.add_phone(phone.as_str())?;
                self.book.add_record(record);
                AddOutcome::Added
            }
        };

        debug!(
            "event=contact_add module=service status=ok outcome={:?} contacts={}",
            outcome,
            self.book.len()
        );
        Ok(outcome)
    }

    /// Replaces `old_phone` with `new_phone` on the named contact.
    pub fn change_phone(
        &mut self,
        name: &str,
        old_phone: &str,
        new_phone: &str,
    ) -> ServiceResult<()> {
        self.record_mut(name)?.edit_phone(old_phone, new_phone)?;
        debug!("event=phone_change module=service status=ok");
        Ok(())
    }

    /// Removes every copy of `phone` from the named contact.
    ///
    /// Returns whether anything was removed.
    pub fn remove_phone(&mut self, name: &str, phone: &str) -> ServiceResult<bool> {
        let record = self.record_mut(name)?;
        let before = record.phones().len();
        record.remove_phone(phone);
        let removed = record.phones().len() != before;
        debug!("event=phone_remove module=service status=ok removed={removed}");
        Ok(removed)
    }

    pub fn phones(&self, name: &str) -> ServiceResult<&[Phone]> {
        Ok(self.record(name)?.phones())
    }

    /// Sets or replaces the named contact's birthday.
    pub fn add_birthday(&mut self, name: &str, birthday: &str) -> ServiceResult<()> {
        self.record_mut(name)?.add_birthday(birthday)?;
        debug!("event=birthday_set module=service status=ok");
        Ok(())
    }

    pub fn birthday(&self, name: &str) -> ServiceResult<Option<&Birthday>> {
        Ok(self.record(name)?.birthday())
    }

    /// Deletes the named contact.
    ///
    /// # Errors
    /// - `ServiceError::ContactNotFound` when no such contact exists; the
    ///   book is unchanged.
    pub fn delete_contact(&mut self, name: &str) -> ServiceResult<()> {
        let name = name.trim();
        if !self.book.delete(name) {
            return Err(ServiceError::ContactNotFound(name.to_string()));
        }
        debug!(
            "event=contact_delete module=service status=ok contacts={}",
            self.book.len()
        );
        Ok(())
    }

    /// Contacts with an observed birthday in the week starting at `today`.
    pub fn upcoming_birthdays(&self, today: NaiveDate) -> Vec<UpcomingBirthday> {
        self.book.get_upcoming_birthdays(today)
    }

    fn record(&self, name: &str) -> ServiceResult<&Record> {
        let name = name.trim();
        self.book
            .find(name)
            .ok_or_else(|| ServiceError::ContactNotFound(name.to_string()))
    }

    fn record_mut(&mut self, name: &str) -> ServiceResult<&mut Record> {
        let name = name.trim();
        self.book
            .find_mut(name)
            .ok_or_else(|| ServiceError::ContactNotFound(name.to_string()))
    }
}
