use contactbook_core::db::{open_db, open_db_in_memory};
use contactbook_core::{
    AddressBook, AddressBookRepository, Record, RepoError, SqliteAddressBookRepository,
};

fn sample_book() -> AddressBook {
    let mut book = AddressBook::new();

    let mut john = Record::new("John").unwrap();
    john.add_phone("1234567890").unwrap();
    john.add_phone("5555555555").unwrap();
    john.add_phone("1234567890").unwrap();
    john.add_birthday("1990-06-15").unwrap();
    book.add_record(john);

    let mut jane = Record::new("Jane").unwrap();
    jane.add_phone("9876543210").unwrap();
    book.add_record(jane);

    book.add_record(Record::new("Bob").unwrap());
    book
}

fn records(book: &AddressBook) -> Vec<Record> {
    book.records().cloned().collect()
}

#[test]
fn empty_database_loads_empty_book() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAddressBookRepository::new(&conn);

    assert!(repo.load_book().unwrap().is_empty());
}

#[test]
fn save_and_load_round_trip_preserves_everything_in_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAddressBookRepository::new(&conn);
    let book = sample_book();

    repo.save_book(&book).unwrap();
    let loaded = repo.load_book().unwrap();

    assert_eq!(records(&loaded), records(&book));
}

#[test]
fn save_replaces_previous_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAddressBookRepository::new(&conn);

    let mut book = sample_book();
    repo.save_book(&book).unwrap();

    book.delete("John");
    book.add_record(Record::new("Alice").unwrap());
    repo.save_book(&book).unwrap();

    let names = repo
        .load_book()
        .unwrap()
        .records()
        .map(|record| record.name().as_str().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Jane", "Bob", "Alice"]);
}

#[test]
fn snapshot_survives_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.sqlite3");
    let book = sample_book();

    {
        let conn = open_db(&path).unwrap();
        SqliteAddressBookRepository::new(&conn)
            .save_book(&book)
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let loaded = SqliteAddressBookRepository::new(&conn).load_book().unwrap();
    assert_eq!(records(&loaded), records(&book));
}

#[test]
fn load_rejects_invalid_persisted_phone() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO contacts (position, name, birthday) VALUES (0, 'John', NULL);
         INSERT INTO phones (contact_name, position, value) VALUES ('John', 0, '12345');",
    )
    .unwrap();

    let err = SqliteAddressBookRepository::new(&conn)
        .load_book()
        .unwrap_err();
    assert!(
        matches!(&err, RepoError::InvalidData(message) if message.starts_with("phones.value")),
        "unexpected error: {err}"
    );
}

#[test]
fn load_rejects_invalid_persisted_birthday() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO contacts (position, name, birthday) VALUES (0, 'John', '1990-02-30');",
    )
    .unwrap();

    let err = SqliteAddressBookRepository::new(&conn)
        .load_book()
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn load_rejects_untrimmed_persisted_name() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO contacts (position, name, birthday) VALUES (0, ' John ', NULL);",
    )
    .unwrap();

    let err = SqliteAddressBookRepository::new(&conn)
        .load_book()
        .unwrap_err();
    assert!(err.to_string().contains("untrimmed contact name"));
}
