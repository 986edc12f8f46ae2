//! Subcommand handlers.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use bookshelf_catalog::{
    Book, Catalog, DeleteConfirmation, Entity, Product, Query, RecordDialog, SaveOutcome, Sorter,
    Toast, messages,
};
use bookshelf_validator::form::{ConfiguredClock, FormValidator, MessageProvider, ResourceBundle};
use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::{Command, ProductCommand};
use crate::config::AppConfig;

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Done.
    Success,
    /// A save was rejected by validation.
    Rejected,
    /// The operation could not be carried out.
    Failed,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => Self::SUCCESS,
            Status::Rejected => Self::from(2_u8),
            Status::Failed => Self::FAILURE,
        }
    }
}

type Validator = FormValidator<Arc<ResourceBundle>, ConfiguredClock>;

/// State shared by every command.
pub struct App {
    config: AppConfig,
    validator: Validator,
    books: Catalog<Book>,
    products: Catalog<Product>,
}

impl App {
    /// Loads texts and the catalogs named by `config`.
    pub fn load(config: AppConfig) -> anyhow::Result<Self> {
        let texts = match &config.messages {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("reading messages from {}", path.display()))?;
                ResourceBundle::from_properties(&source).with_fallback(messages::english())
            }
            None => messages::english(),
        };

        let books = open_catalog(config.data.as_deref(), Book::samples)?;
        let products = open_catalog(config.products_data.as_deref(), Product::samples)?;

        let validator = FormValidator::new(Arc::new(texts), ConfiguredClock(config.today))
            .with_date_source(config.date_source);

        Ok(Self {
            config,
            validator,
            books,
            products,
        })
    }

    fn texts(&self) -> &ResourceBundle {
        self.validator.messages()
    }

    /// Runs one command, writing its output to `out`.
    pub fn run(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<Status> {
        let path = self.config.data.as_deref();
        match command {
            Command::List {
                name,
                genre,
                sort,
                desc,
                json,
            } => {
                let mut query = Query::from_list_state(
                    name.as_deref().unwrap_or_default(),
                    genre.as_deref().unwrap_or_default(),
                );
                if let Some(column) = sort {
                    query = query.sort_by(sorter(column.record_key(), desc));
                }
                self.list_books(&query, json, out)
            }
            Command::Genres => self.genres(out),
            Command::Add(fields) => {
                let dialog = RecordDialog::open_add();
                save(&mut self.books, path, &self.validator, dialog, fields.entries(), out)
            }
            Command::Edit { index, fields } => {
                let dialog = RecordDialog::open_edit(&self.books, index)?;
                save(&mut self.books, path, &self.validator, dialog, fields.entries(), out)
            }
            Command::Delete { indices, yes } => {
                delete(&mut self.books, path, self.validator.messages(), &indices, yes, out)
            }
            Command::Products { command } => self.run_products(command, out),
        }
    }

    fn run_products(&mut self, command: ProductCommand, out: &mut impl Write) -> anyhow::Result<Status> {
        let path = self.config.products_data.as_deref();
        match command {
            ProductCommand::List {
                name,
                sort,
                desc,
                json,
            } => {
                let mut query = Query::from_list_state(name.as_deref().unwrap_or_default(), "");
                if let Some(column) = sort {
                    query = query.sort_by(sorter(column.record_key(), desc));
                }
                self.list_products(&query, json, out)
            }
            ProductCommand::Add(fields) => {
                let dialog = RecordDialog::open_add();
                save(&mut self.products, path, &self.validator, dialog, fields.entries(), out)
            }
            ProductCommand::Edit { index, fields } => {
                let dialog = RecordDialog::open_edit(&self.products, index)?;
                save(&mut self.products, path, &self.validator, dialog, fields.entries(), out)
            }
            ProductCommand::Delete { indices, yes } => {
                delete(&mut self.products, path, self.validator.messages(), &indices, yes, out)
            }
        }
    }

    fn list_books(&self, query: &Query, json: bool, out: &mut impl Write) -> anyhow::Result<Status> {
        let rows = self.books.view(query);
        if json {
            write_json(&rows, out)?;
            return Ok(Status::Success);
        }

        let texts = self.texts();
        write_header(&["Name", "Author", "Genre", "ReleaseDate", "AvailableQuantity"], texts, out)?;
        for (index, book) in rows {
            writeln!(
                out,
                "{index}\t{}\t{}\t{}\t{}\t{}",
                book.name,
                book.author,
                book.genre,
                messages::published_year(book.release_date, texts),
                book.available_quantity
            )?;
        }
        Ok(Status::Success)
    }

    fn list_products(&self, query: &Query, json: bool, out: &mut impl Write) -> anyhow::Result<Status> {
        let rows = self.products.view(query);
        if json {
            write_json(&rows, out)?;
            return Ok(Status::Success);
        }

        let columns = ["Name", "Description", "ReleaseDate", "DiscontinuedDate", "Rating", "Price"];
        write_header(&columns, self.texts(), out)?;
        for (index, product) in rows {
            writeln!(
                out,
                "{index}\t{}\t{}\t{}\t{}\t{}\t{}",
                product.name,
                product.description,
                iso_day(product.release_date),
                iso_day(product.discontinued_date),
                product.rating,
                product.price
            )?;
        }
        Ok(Status::Success)
    }

    fn genres(&self, out: &mut impl Write) -> anyhow::Result<Status> {
        let all = self.texts().text(messages::GENRE_ALL, &[]);
        for option in self.books.genre_options(&all) {
            writeln!(out, "{}", option.text)?;
        }
        Ok(Status::Success)
    }
}

/// Loads the catalog stored at `path`, or the samples when there is no file yet.
fn open_catalog<E: Entity>(path: Option<&Path>, samples: fn() -> Vec<E>) -> anyhow::Result<Catalog<E>> {
    match path {
        Some(path) if path.exists() => Ok(Catalog::load_json(path)?),
        _ => Ok(Catalog::from_items(samples())),
    }
}

fn persist<E: Entity>(catalog: &Catalog<E>, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        catalog.save_json(path)?;
    }
    Ok(())
}

fn save<'f, E: Entity>(
    catalog: &mut Catalog<E>,
    path: Option<&Path>,
    validator: &Validator,
    mut dialog: RecordDialog<E>,
    fields: impl Iterator<Item = (&'static str, &'f str)>,
    out: &mut impl Write,
) -> anyhow::Result<Status> {
    for (key, value) in fields {
        dialog.set(key, value);
    }

    match dialog.save(catalog, validator)? {
        SaveOutcome::Saved { index, toast } => {
            persist(catalog, path)?;
            tracing::info!(kind = E::NAME, index, "record saved");
            writeln!(out, "{}", toast.text)?;
            Ok(Status::Success)
        }
        SaveOutcome::Rejected(outcome) => {
            let texts = validator.messages();
            for failure in outcome.failures() {
                let column = texts.text(&messages::column_key(&failure.key), &[]);
                eprintln!("{column}: {}", failure.message);
            }
            Ok(Status::Rejected)
        }
        SaveOutcome::Failed { toast, error } => {
            eprintln!("{}: {error}", toast.text);
            Ok(Status::Failed)
        }
    }
}

fn delete<E: Entity>(
    catalog: &mut Catalog<E>,
    path: Option<&Path>,
    texts: &ResourceBundle,
    indices: &[usize],
    yes: bool,
    out: &mut impl Write,
) -> anyhow::Result<Status> {
    if !yes {
        let confirm = DeleteConfirmation::new(texts);
        writeln!(out, "{}: {}", confirm.title, confirm.text)?;
        writeln!(out, "{} (--yes) / {}", confirm.yes, confirm.no)?;
        return Ok(Status::Success);
    }

    let mut selected = indices.to_vec();
    selected.sort_unstable();
    selected.dedup();

    let removed = catalog.delete(&selected);
    let toast = Toast::deleted(removed, selected.len(), texts);
    if removed == 0 {
        eprintln!("{}", toast.text);
        return Ok(Status::Failed);
    }
    persist(catalog, path)?;
    tracing::info!(kind = E::NAME, removed, "records deleted");
    writeln!(out, "{}", toast.text)?;
    Ok(Status::Success)
}

fn write_header(record_keys: &[&str], texts: &ResourceBundle, out: &mut impl Write) -> anyhow::Result<()> {
    let header: Vec<_> = record_keys
        .iter()
        .map(|key| texts.text(&messages::column_key(key), &[]))
        .collect();
    writeln!(out, "#\t{}", header.join("\t"))?;
    Ok(())
}

fn write_json<E: Serialize>(rows: &[(usize, &E)], out: &mut impl Write) -> anyhow::Result<()> {
    #[derive(Serialize)]
    struct Listed<'a, E> {
        index: usize,
        #[serde(flatten)]
        item: &'a E,
    }
    let listed: Vec<_> = rows
        .iter()
        .map(|&(index, item)| Listed { index, item })
        .collect();
    writeln!(out, "{}", serde_json::to_string_pretty(&listed)?)?;
    Ok(())
}

fn iso_day(day: Option<NaiveDate>) -> String {
    day.map(|day| day.to_string()).unwrap_or_default()
}

fn sorter(record_key: &str, descending: bool) -> Sorter {
    if descending {
        Sorter::descending(record_key)
    } else {
        Sorter::ascending(record_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{BookFields, ProductFields, ProductSortColumn};

    fn app() -> App {
        App::load(AppConfig {
            today: NaiveDate::from_ymd_opt(2024, 3, 15),
            ..AppConfig::default()
        })
        .unwrap()
    }

    fn run(app: &mut App, command: Command) -> (Status, String) {
        let mut out = Vec::new();
        let code = app.run(command, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn list_prints_header_and_filtered_rows() {
        let (code, out) = run(
            &mut app(),
            Command::List {
                name: Some("patterns".into()),
                genre: None,
                sort: None,
                desc: false,
                json: false,
            },
        );
        assert_eq!(code, Status::Success);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "#\tName\tAuthor\tGenre\tRelease date\tAvailable quantity");
        assert_eq!(lines[1], "2\tTech Patterns\tNina Petrova\tTechnology\tPublished in 2020\t7");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn rejected_add_changes_nothing() {
        let mut app = app();
        let fields = BookFields {
            name: Some("Only a name".into()),
            ..BookFields::default()
        };
        let (code, out) = run(&mut app, Command::Add(fields));
        assert_eq!(code, Status::Rejected);
        assert!(out.is_empty());
        assert_eq!(app.books.len(), 7);
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut app = app();
        let (_, out) = run(
            &mut app,
            Command::Delete {
                indices: vec![0],
                yes: false,
            },
        );
        assert!(out.starts_with("Delete records: Do you really want"));
        assert_eq!(app.books.len(), 7);

        let (code, out) = run(
            &mut app,
            Command::Delete {
                indices: vec![0, 1],
                yes: true,
            },
        );
        assert_eq!(code, Status::Success);
        assert_eq!(out.trim(), "2 record(s) deleted");
        assert_eq!(app.books.len(), 5);
    }

    #[test]
    fn deleting_unknown_rows_fails() {
        let mut app = app();
        let (code, out) = run(
            &mut app,
            Command::Delete {
                indices: vec![42, 43, 42],
                yes: true,
            },
        );
        assert_eq!(code, Status::Failed);
        assert!(out.is_empty());
        assert_eq!(app.books.len(), 7);
    }

    #[test]
    fn products_list_sorts_by_price() {
        let (code, out) = run(
            &mut app(),
            Command::Products {
                command: ProductCommand::List {
                    name: None,
                    sort: Some(ProductSortColumn::Price),
                    desc: true,
                    json: false,
                },
            },
        );
        assert_eq!(code, Status::Success);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines[0],
            "#\tName\tDescription\tRelease date\tDiscontinued date\tRating\tPrice"
        );
        assert!(lines[1].starts_with("8\tLCD HDTV\t"));
        assert!(lines[2].starts_with("7\tDVD Player\t"));
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn discontinued_day_is_printed_when_present() {
        let (_, out) = run(
            &mut app(),
            Command::Products {
                command: ProductCommand::List {
                    name: Some("cola".into()),
                    sort: None,
                    desc: false,
                    json: false,
                },
            },
        );
        assert_eq!(
            out.lines().nth(1),
            Some("3\tHavina Cola\tThe Original Key Lime Cola\t2005-10-01\t2006-10-01\t3\t19.9")
        );
    }

    #[test]
    fn product_add_is_validated_then_stored() {
        let mut app = app();
        let rejected = ProductFields {
            name: Some("Tea".into()),
            ..ProductFields::default()
        };
        let (code, _) = run(&mut app, Command::Products { command: ProductCommand::Add(rejected) });
        assert_eq!(code, Status::Rejected);
        assert_eq!(app.products.len(), 9);

        let fields = ProductFields {
            name: Some("Tea".into()),
            description: Some("Green tea, 20 bags".into()),
            release_date: Some("2020-01-01".into()),
            rating: Some("4".into()),
            price: Some("3.2".into()),
            ..ProductFields::default()
        };
        let (code, out) = run(&mut app, Command::Products { command: ProductCommand::Add(fields) });
        assert_eq!(code, Status::Success);
        assert_eq!(out.trim(), "Record created");
        assert_eq!(app.products.len(), 10);
        assert_eq!(app.products.get(9).map(|p| p.price), Some(3.2));
        assert_eq!(app.books.len(), 7);
    }

    #[test]
    fn product_rating_out_of_range_fails_the_save() {
        let mut app = app();
        let fields = ProductFields {
            rating: Some("7".into()),
            ..ProductFields::default()
        };
        let (code, out) = run(
            &mut app,
            Command::Products {
                command: ProductCommand::Edit { index: 0, fields },
            },
        );
        assert_eq!(code, Status::Failed);
        assert!(out.is_empty());
        assert_eq!(app.products.get(0).map(|p| p.rating), Some(4));
    }

    #[test]
    fn product_delete_leaves_books_alone() {
        let mut app = app();
        let (code, out) = run(
            &mut app,
            Command::Products {
                command: ProductCommand::Delete {
                    indices: vec![3],
                    yes: true,
                },
            },
        );
        assert_eq!(code, Status::Success);
        assert_eq!(out.trim(), "1 record(s) deleted");
        assert_eq!(app.products.len(), 8);
        assert_eq!(app.books.len(), 7);
    }
}
