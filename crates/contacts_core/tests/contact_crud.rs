use contacts_core::db::open_db_in_memory;
use contacts_core::{
    ContactDraft, ContactEvent, ContactRepository, ContactValidationError, RepoError,
    SqliteContactRepository, StoreLocation,
};
use std::sync::{Arc, Mutex};

fn ready_repo() -> SqliteContactRepository {
    SqliteContactRepository::from_connection(open_db_in_memory().unwrap())
}

fn row_count(repo: &SqliteContactRepository) -> usize {
    repo.list().unwrap().len()
}

#[test]
fn create_then_list_returns_supplied_fields_and_not_favorite() {
    let repo = ready_repo();
    let draft = ContactDraft::new("Amy", "J", "Lee", "555-0100");

    let id = repo.create(&draft).unwrap();
    let listed = repo.list().unwrap();

    assert_eq!(listed.len(), 1);
    let contact = &listed[0];
    assert_eq!(contact.id, id);
    assert_eq!(contact.draft(), draft);
    assert!(!contact.favorite);
    assert_eq!(contact.display_name(), "Amy J Lee");
}

#[test]
fn created_ids_are_unique_and_increasing() {
    let repo = ready_repo();
    let first = repo.create(&ContactDraft::new("Amy", "", "Lee", "1")).unwrap();
    let second = repo.create(&ContactDraft::new("Bob", "", "Lee", "2")).unwrap();
    assert!(second > first);
}

#[test]
fn create_with_blank_telephone_writes_nothing() {
    let repo = ready_repo();

    let err = repo
        .create(&ContactDraft::new("Amy", "", "Lee", "   "))
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::Validation(ContactValidationError::BlankTelephone)
    ));
    assert_eq!(row_count(&repo), 0);
}

#[test]
fn update_overwrites_only_target_row() {
    let repo = ready_repo();
    let amy = repo.create(&ContactDraft::new("Amy", "", "Lee", "1")).unwrap();
    let bob = repo.create(&ContactDraft::new("Bob", "", "Lee", "2")).unwrap();
    repo.toggle_favorite(amy, true).unwrap();

    let edited = ContactDraft::new("Amelia", "K", "Lee-Park", "555-0199");
    repo.update(amy, &edited).unwrap();

    let listed = repo.list().unwrap();
    let amy_row = listed.iter().find(|c| c.id == amy).unwrap();
    let bob_row = listed.iter().find(|c| c.id == bob).unwrap();
    assert_eq!(amy_row.draft(), edited);
    assert!(amy_row.favorite, "field update must not touch favorite");
    assert_eq!(bob_row.draft(), ContactDraft::new("Bob", "", "Lee", "2"));
}

#[test]
fn update_and_delete_of_unknown_id_are_silent_noops() {
    let repo = ready_repo();
    repo.create(&ContactDraft::new("Amy", "", "Lee", "1")).unwrap();

    repo.update(999, &ContactDraft::new("X", "", "Y", "0")).unwrap();
    repo.delete(999).unwrap();
    repo.toggle_favorite(999, true).unwrap();

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].first_name, "Amy");
}

#[test]
fn delete_removes_row_and_is_repeatable() {
    let repo = ready_repo();
    let id = repo.create(&ContactDraft::new("Amy", "", "Lee", "1")).unwrap();

    repo.delete(id).unwrap();
    repo.delete(id).unwrap();

    assert!(repo.list().unwrap().iter().all(|c| c.id != id));
}

#[test]
fn toggle_favorite_is_idempotent_and_invertible() {
    let repo = ready_repo();
    let id = repo.create(&ContactDraft::new("Amy", "", "Lee", "1")).unwrap();

    repo.toggle_favorite(id, true).unwrap();
    repo.toggle_favorite(id, true).unwrap();
    assert!(repo.list().unwrap()[0].favorite);

    repo.toggle_favorite(id, false).unwrap();
    let contact = &repo.list().unwrap()[0];
    assert!(!contact.favorite);
    assert_eq!(contact.draft(), ContactDraft::new("Amy", "", "Lee", "1"));
}

#[test]
fn operations_before_initialize_fail_not_ready() {
    let repo = SqliteContactRepository::new(StoreLocation::Memory);
    assert!(!repo.is_ready());

    assert!(matches!(repo.list(), Err(RepoError::NotReady)));
    assert!(matches!(
        repo.create(&ContactDraft::new("Amy", "", "Lee", "1")),
        Err(RepoError::NotReady)
    ));
    assert!(matches!(repo.delete(1), Err(RepoError::NotReady)));

    repo.initialize().unwrap();
    repo.initialize().unwrap();
    assert!(repo.is_ready());
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn initialize_on_file_reuses_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Contacts.db");

    {
        let repo = SqliteContactRepository::at_path(&path);
        repo.initialize().unwrap();
        repo.create(&ContactDraft::new("Amy", "", "Lee", "1")).unwrap();
    }

    let reopened = SqliteContactRepository::at_path(&path);
    reopened.initialize().unwrap();
    assert_eq!(row_count(&reopened), 1);
}

#[test]
fn list_reads_unexpected_favorite_values_as_not_favorite() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO contacts (firstName, middleInitial, lastName, telephone, favorite)
         VALUES ('Amy', '', 'Lee', '1', 0);
         INSERT INTO contacts (firstName, middleInitial, lastName, telephone, favorite)
         VALUES ('Bob', '', 'Lee', '2', 2);
         INSERT INTO contacts (firstName, middleInitial, lastName, telephone, favorite)
         VALUES ('Cat', '', 'Lee', '3', 'yes');
         INSERT INTO contacts (firstName, middleInitial, lastName, telephone, favorite)
         VALUES ('Dan', '', 'Lee', '4', 1);",
    )
    .unwrap();
    let repo = SqliteContactRepository::from_connection(conn);

    let listed = repo.list().unwrap();
    let flags: Vec<(String, bool)> = listed
        .iter()
        .map(|contact| (contact.first_name.clone(), contact.favorite))
        .collect();
    assert_eq!(
        flags,
        vec![
            ("Amy".to_string(), false),
            ("Bob".to_string(), false),
            ("Cat".to_string(), false),
            ("Dan".to_string(), true),
        ]
    );
}

#[test]
fn list_tolerates_null_text_and_favorite_columns() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO contacts (firstName, middleInitial, lastName, telephone, favorite)
         VALUES ('Amy', NULL, 'Lee', '1', NULL);",
        [],
    )
    .unwrap();
    let repo = SqliteContactRepository::from_connection(conn);

    let listed = repo.list().unwrap();
    assert_eq!(listed[0].middle_name_or_initial, "");
    assert!(!listed[0].favorite);
    assert_eq!(listed[0].display_name(), "Amy Lee");
}

#[test]
fn names_with_quotes_are_stored_verbatim() {
    let repo = ready_repo();
    let draft = ContactDraft::new("O'Brien", "", "Lee'); DROP TABLE contacts; --", "1");
    repo.create(&draft).unwrap();

    assert_eq!(repo.list().unwrap()[0].draft(), draft);
}

#[test]
fn subscribers_receive_events_for_effective_mutations_only() {
    let repo = ready_repo();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let subscription = repo.subscribe(move |event| sink.lock().unwrap().push(*event));

    let id = repo.create(&ContactDraft::new("Amy", "", "Lee", "1")).unwrap();
    repo.update(id, &ContactDraft::new("Amy", "", "Lee", "2")).unwrap();
    repo.toggle_favorite(id, true).unwrap();
    repo.delete(id).unwrap();
    repo.delete(id).unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            ContactEvent::Created(id),
            ContactEvent::Updated(id),
            ContactEvent::FavoriteChanged { id, favorite: true },
            ContactEvent::Deleted(id),
        ]
    );

    assert!(repo.unsubscribe(subscription));
    assert!(!repo.unsubscribe(subscription));
    repo.create(&ContactDraft::new("Bob", "", "Lee", "3")).unwrap();
    assert_eq!(events.lock().unwrap().len(), 4);
}
