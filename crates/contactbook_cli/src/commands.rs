//! Interactive command parsing and dispatch.
//!
//! # Responsibility
//! - Turn one input line into a typed command.
//! - Run commands against the contact service and render replies.
//!
//! # Invariants
//! - Command failures become reply text; they never end the session.
//! - Exit (explicit or end of input) always saves before returning.

use chrono::NaiveDate;
use contactbook_core::{AddOutcome, AddressBookRepository, ContactService, ServiceResult};
use log::{info, warn};
use std::io::{BufRead, Write};

pub const HELP_TEXT: &str = "\
Available commands:
• add [name] [phone] - Add new contact or phone to existing contact
• change [name] [old_phone] [new_phone] - Change phone number
• phone [name] - Show phone numbers for contact
• remove-phone [name] [phone] - Remove phone number from contact
• all - Show all contacts
• delete [name] - Delete contact
• add-birthday [name] [date] - Add birthday (DD.MM.YYYY)
• show-birthday [name] - Show birthday for contact
• birthdays - Show upcoming birthdays
• hello - Get greeting from bot
• help - Show this help message
• close/exit - Close program";

const PROMPT: &str = "\nEnter a command: ";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hello,
    Help,
    Add { name: String, phone: String },
    Change { name: String, old_phone: String, new_phone: String },
    Phone { name: String },
    RemovePhone { name: String, phone: String },
    All,
    Delete { name: String },
    AddBirthday { name: String, birthday: String },
    ShowBirthday { name: String },
    Birthdays,
    Exit,
    /// Known command missing required arguments; holds the usage hint.
    Usage(&'static str),
    Unknown,
}

impl Command {
    /// Parses a whitespace-separated line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next()?.to_lowercase();
        let args = tokens.map(str::to_string).collect::<Vec<_>>();

        let command = match (keyword.as_str(), args.as_slice()) {
            ("hello" | "hi" | "hey" | "start" | "h", _) => Self::Hello,
            ("help", _) => Self::Help,
            ("close" | "exit" | "quit" | "q", _) => Self::Exit,
            ("all" | "show", _) => Self::All,
            ("birthdays", _) => Self::Birthdays,
            ("add", [name, phone, ..]) => Self::Add {
                name: name.clone(),
                phone: phone.clone(),
            },
            ("add", _) => Self::Usage("Please provide name and phone number."),
            ("change", [name, old_phone, new_phone, ..]) => Self::Change {
                name: name.clone(),
                old_phone: old_phone.clone(),
                new_phone: new_phone.clone(),
            },
            ("change", _) => Self::Usage("Please provide name, old phone and new phone."),
            ("phone", [name, ..]) => Self::Phone { name: name.clone() },
            ("phone", _) => Self::Usage("Please provide contact name."),
            ("remove-phone", [name, phone, ..]) => Self::RemovePhone {
                name: name.clone(),
                phone: phone.clone(),
            },
            ("remove-phone", _) => Self::Usage("Please provide name and phone number."),
            ("delete", [name, ..]) => Self::Delete { name: name.clone() },
            ("delete", _) => Self::Usage("Please provide contact name."),
            ("add-birthday", [name, birthday, ..]) => Self::AddBirthday {
                name: name.clone(),
                birthday: birthday.clone(),
            },
            ("add-birthday", _) => Self::Usage("Please provide name and birthday date."),
            ("show-birthday", [name, ..]) => Self::ShowBirthday { name: name.clone() },
            ("show-birthday", _) => Self::Usage("Please provide contact name."),
            _ => Self::Unknown,
        };
        Some(command)
    }
}

/// Runs a non-exit command and renders the reply text.
pub fn execute<R: AddressBookRepository>(
    command: &Command,
    service: &mut ContactService<R>,
    today: NaiveDate,
) -> String {
    match run(command, service, today) {
        Ok(reply) => reply,
        Err(err) => format!("Error: {err}"),
    }
}

fn run<R: AddressBookRepository>(
    command: &Command,
    service: &mut ContactService<R>,
    today: NaiveDate,
) -> ServiceResult<String> {
    let reply = match command {
        Command::Hello => "How can I help you?".to_string(),
        Command::Help => HELP_TEXT.to_string(),
        Command::Add { name, phone } => match service.add_contact(name, phone)? {
            AddOutcome::Added => "Contact added.".to_string(),
            AddOutcome::Updated => "Contact updated.".to_string(),
        },
        Command::Change {
            name,
            old_phone,
            new_phone,
        } => {
            service.change_phone(name, old_phone, new_phone)?;
            format!("Phone number for {name} changed from {old_phone} to {new_phone}.")
        }
        Command::Phone { name } => {
            let phones = service.phones(name)?;
            if phones.is_empty() {
                format!("Contact {name} has no phone numbers.")
            } else {
                let joined = phones
                    .iter()
                    .map(|phone| phone.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                format!("Phone numbers for {name}: {joined}")
            }
        }
        Command::RemovePhone { name, phone } => {
            if service.remove_phone(name, phone)? {
                format!("Phone number {phone} removed from contact {name}.")
            } else {
                format!("Contact {name} has no phone number {phone}.")
            }
        }
        Command::All => {
            if service.book().is_empty() {
                "Address book is empty.".to_string()
            } else {
                let lines = service
                    .contacts()
                    .map(|record| record.render())
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("All contacts:\n{lines}")
            }
        }
        Command::Delete { name } => {
            service.delete_contact(name)?;
            format!("Contact {name} deleted.")
        }
        Command::AddBirthday { name, birthday } => {
            service.add_birthday(name, birthday)?;
            format!("Birthday {birthday} added for contact {name}.")
        }
        Command::ShowBirthday { name } => match service.birthday(name)? {
            Some(birthday) => format!("Birthday for {name}: {}", birthday.display_format()),
            None => format!("Contact {name} has no birthday set."),
        },
        Command::Birthdays => {
            let upcoming = service.upcoming_birthdays(today);
            if upcoming.is_empty() {
                "No birthdays in the next week.".to_string()
            } else {
                let lines = upcoming
                    .iter()
                    .map(|entry| {
                        format!(
                            "• {}: {} (in {} days)",
                            entry.name, entry.birthday, entry.days_until
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("Upcoming birthdays:\n{lines}")
            }
        }
        Command::Usage(hint) => format!("Error: {hint}"),
        Command::Unknown => "Invalid command.".to_string(),
        Command::Exit => String::new(),
    };
    Ok(reply)
}

/// Drives the prompt loop until `exit` or end of input, then saves.
///
/// `today` is queried per command so long sessions see the current date.
pub fn run_session<R: AddressBookRepository>(
    service: &mut ContactService<R>,
    input: impl BufRead,
    mut output: impl Write,
    today: impl Fn() -> NaiveDate,
) -> anyhow::Result<()> {
    writeln!(output, "{HELP_TEXT}")?;

    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            info!("event=session_end module=cli status=ok reason=eof");
            break;
        };
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        if command == Command::Exit {
            info!("event=session_end module=cli status=ok reason=exit");
            break;
        }
        writeln!(output, "{}", execute(&command, service, today()))?;
    }

    if let Err(err) = service.save() {
        warn!("event=session_save module=cli status=error");
        writeln!(output, "Failed to save data: {err}")?;
        return Err(err.into());
    }
    writeln!(output, "Data saved. Good bye!")?;
    Ok(())
}
