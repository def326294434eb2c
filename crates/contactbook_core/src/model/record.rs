//! Contact record model.
//!
//! # Responsibility
//! - Own one contact's name, phones and optional birthday.
//! - Route every mutation through field validation.
//!
//! # Invariants
//! - `name` never changes after construction.
//! - Phones keep insertion order; duplicates are allowed.
//! - A failed update leaves the record unchanged.

use crate::model::fields::{Birthday, FieldError, FieldResult, Name, Phone};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One contact in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    #[serde(default)]
    phones: Vec<Phone>,
    #[serde(default)]
    birthday: Option<Birthday>,
}

impl Record {
    /// Creates an empty record for `name`.
    ///
    /// # Errors
    /// - `FieldError::InvalidName` when `name` is blank.
    pub fn new(name: &str) -> FieldResult<Self> {
        Ok(Self {
            name: Name::parse(name)?,
            phones: Vec::new(),
            birthday: None,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Validates and appends a phone. Duplicates are kept.
    pub fn add_phone(&mut self, raw: &str) -> FieldResult<()> {
        self.phones.push(Phone::parse(raw)?);
        Ok(())
    }

    /// Validates and replaces the birthday.
    pub fn add_birthday(&mut self, raw: &str) -> FieldResult<()> {
        self.birthday = Some(Birthday::parse(raw)?);
        Ok(())
    }

    /// Returns the first phone whose stored value equals `value` exactly.
    pub fn find_phone(&self, value: &str) -> Option<&Phone> {
        self.phones.iter().find(|phone| phone.as_str() == value)
    }

    /// Replaces the first phone equal to `old_value` in place.
    ///
    /// # Errors
    /// - `FieldError::PhoneNotFound` when `old_value` is absent.
    /// - `FieldError::InvalidPhone` when `new_value` is not 10 digits; the
    ///   stored phone is left as it was.
    pub fn edit_phone(&mut self, old_value: &str, new_value: &str) -> FieldResult<()> {
        let slot = self
            .phones
            .iter_mut()
            .find(|phone| phone.as_str() == old_value)
            .ok_or_else(|| FieldError::PhoneNotFound(old_value.to_string()))?;
        *slot = Phone::parse(new_value)?;
        Ok(())
    }

    /// Removes every phone equal to `value`. Absent values are a no-op.
    pub fn remove_phone(&mut self, value: &str) {
        self.phones.retain(|phone| phone.as_str() != value);
    }

    /// Human-readable one-line summary.
    pub fn render(&self) -> String {
        let phones = self
            .phones
            .iter()
            .map(Phone::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        match &self.birthday {
            Some(birthday) => format!(
                "Contact name: {}, phones: {}, birthday: {}",
                self.name,
                phones,
                birthday.display_format()
            ),
            None => format!("Contact name: {}, phones: {}", self.name, phones),
        }
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
