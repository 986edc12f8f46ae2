//! End-to-end catalog flows: list, add, edit, delete and persist.

use bookshelf_catalog::{
    Book, Catalog, DeleteConfirmation, Query, RecordDialog, SaveOutcome, Sorter, Toast, messages,
};
use bookshelf_validator::form::{
    DateSource, FixedClock, FormValidator, MessageProvider, ResourceBundle,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn validator() -> FormValidator<ResourceBundle, FixedClock> {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    FormValidator::new(messages::english(), FixedClock(today))
}

fn names(catalog: &Catalog<Book>, query: &Query) -> Vec<String> {
    catalog
        .view(query)
        .into_iter()
        .map(|(_, b)| b.name.clone())
        .collect()
}

#[test]
fn add_then_find_by_genre() {
    let mut catalog = Catalog::from_items(Book::samples());
    let mut dialog = RecordDialog::<Book>::open_add();
    dialog.set("Name", "Rust in Action");
    dialog.set("Author", "Tim McNamara");
    dialog.set("Genre", "Technology");
    dialog.set("ReleaseDate", "2021-08-10");
    dialog.set("AvailableQuantity", "2");

    assert!(dialog.save(&mut catalog, &validator()).unwrap().is_saved());

    let query = Query::from_list_state("", "Technology").sort_by(Sorter::ascending("Name"));
    assert_eq!(
        names(&catalog, &query),
        ["Code of the North", "Rust in Action", "Tech Patterns"]
    );
}

#[test]
fn rejected_edit_leaves_catalog_untouched() {
    let mut catalog = Catalog::from_items(Book::samples());
    let before = catalog.clone();

    let mut dialog = RecordDialog::open_edit(&catalog, 1).unwrap();
    dialog.set("Name", "   ");
    dialog.set("ReleaseDate", "2030-01-01");

    let SaveOutcome::Rejected(outcome) = dialog.save(&mut catalog, &validator()).unwrap() else {
        panic!("expected rejection");
    };
    let failed: Vec<_> = outcome.failures().map(|f| f.key.as_str()).collect();
    assert_eq!(failed, ["Name", "ReleaseDate"]);
    assert_eq!(catalog, before);

    dialog.close();
    assert!(dialog.controls().invalid_ids().is_empty());
}

#[test]
fn record_date_source_checks_the_draft() {
    let mut catalog = Catalog::from_items(Book::samples());
    let validator = validator().with_date_source(DateSource::Record);

    let mut dialog = RecordDialog::open_edit(&catalog, 0).unwrap();
    dialog.set("ReleaseDate", "2024-03-15");
    assert!(dialog.save(&mut catalog, &validator).unwrap().is_saved());
    assert_eq!(
        catalog.get(0).unwrap().release_date,
        NaiveDate::from_ymd_opt(2024, 3, 15)
    );
}

#[test]
fn delete_persist_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    let texts = messages::english();

    let mut catalog = Catalog::from_items(Book::samples());
    let confirm = DeleteConfirmation::new(&texts);
    assert_eq!(
        confirm.text,
        "Do you really want to delete the selected records?"
    );

    let removed = catalog.delete(&[1, 2]);
    assert_eq!(Toast::deleted(removed, 2, &texts).text, "2 record(s) deleted");
    catalog.save_json(&path).unwrap();

    let reloaded = Catalog::<Book>::load_json(&path).unwrap();
    assert_eq!(reloaded.len(), 5);
    assert_eq!(
        reloaded.genre_options(&texts.text(messages::GENRE_ALL, &[]))[0].text,
        "All"
    );
    assert!(names(&reloaded, &Query::from_list_state("tech", "")).is_empty());
}

#[test]
fn deleting_unknown_rows_reports_the_selection() {
    let texts = messages::english();
    let mut catalog = Catalog::from_items(Book::samples());

    let removed = catalog.delete(&[42, 43]);
    assert_eq!(removed, 0);
    assert_eq!(
        Toast::deleted(removed, 2, &texts).text,
        "2 record(s) could not be deleted"
    );
    assert_eq!(catalog.len(), 7);
}
