//! Core domain logic for the contact book.
//! This crate is the single source of truth for contact invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::address_book::AddressBook;
pub use model::fields::{Birthday, FieldError, FieldResult, Name, Phone, PHONE_DIGITS};
pub use model::record::Record;
pub use repo::book_repo::{
    AddressBookRepository, RepoError, RepoResult, SqliteAddressBookRepository,
};
pub use schedule::upcoming::{
    next_observed_birthday, upcoming_birthdays, UpcomingBirthday, UPCOMING_WINDOW_DAYS,
};
pub use service::contact_service::{AddOutcome, ContactService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
