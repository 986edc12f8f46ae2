//! Command-line arguments.

use std::path::PathBuf;

use bookshelf_validator::form::DateSource;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Browse and edit the Bookshelf catalog.
#[derive(Parser, Debug)]
#[command(name = "bookshelf", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog JSON file; changes are written back to it
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Product catalog JSON file; changes are written back to it
    #[arg(long, global = true, value_name = "PATH")]
    pub products_data: Option<PathBuf>,

    /// Day used as "today" by the release date check
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Where release dates are read from when validating
    #[arg(long, global = true, value_enum)]
    pub date_source: Option<DateSourceArg>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands; the bare ones act on books.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List books
    List {
        /// Only books whose name contains this text
        #[arg(long)]
        name: Option<String>,

        /// Only books of this genre
        #[arg(long)]
        genre: Option<String>,

        /// Sort column
        #[arg(long, value_enum)]
        sort: Option<SortColumn>,

        /// Sort largest first
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List genre filter options
    Genres,

    /// Add a book
    Add(BookFields),

    /// Edit the book at a row index
    Edit {
        /// Row index as shown by `list`
        index: usize,

        #[command(flatten)]
        fields: BookFields,
    },

    /// Delete books at row indices
    Delete {
        /// Row indices as shown by `list`
        #[arg(required = true)]
        indices: Vec<usize>,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        command: ProductCommand,
    },
}

/// Subcommands of `products`.
#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// List products
    List {
        /// Only products whose name contains this text
        #[arg(long)]
        name: Option<String>,

        /// Sort column
        #[arg(long, value_enum)]
        sort: Option<ProductSortColumn>,

        /// Sort largest first
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a product
    Add(ProductFields),

    /// Edit the product at a row index
    Edit {
        /// Row index as shown by `products list`
        index: usize,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Delete products at row indices
    Delete {
        /// Row indices as shown by `products list`
        #[arg(required = true)]
        indices: Vec<usize>,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Book fields settable from the command line.
#[derive(Args, Debug, Default)]
pub struct BookFields {
    /// Title
    #[arg(long)]
    pub name: Option<String>,

    /// Author
    #[arg(long)]
    pub author: Option<String>,

    /// Genre
    #[arg(long)]
    pub genre: Option<String>,

    /// First publication day
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub release_date: Option<String>,

    /// Copies in stock
    #[arg(long)]
    pub quantity: Option<String>,
}

impl BookFields {
    /// Set fields as `(record key, value)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Name", &self.name),
            ("Author", &self.author),
            ("Genre", &self.genre),
            ("ReleaseDate", &self.release_date),
            ("AvailableQuantity", &self.quantity),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }
}

/// Product fields settable from the command line.
#[derive(Args, Debug, Default)]
pub struct ProductFields {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,

    /// First day on sale
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub release_date: Option<String>,

    /// Last day on sale
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub discontinued_date: Option<String>,

    /// Rating from 0 to 5
    #[arg(long)]
    pub rating: Option<String>,

    /// Unit price
    #[arg(long)]
    pub price: Option<String>,
}

impl ProductFields {
    /// Set fields as `(record key, value)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Name", &self.name),
            ("Description", &self.description),
            ("ReleaseDate", &self.release_date),
            ("DiscontinuedDate", &self.discontinued_date),
            ("Rating", &self.rating),
            ("Price", &self.price),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }
}

/// Book list column accepted by `list --sort`.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SortColumn {
    Name,
    Author,
    Genre,
    ReleaseDate,
    Quantity,
}

impl SortColumn {
    /// Record key sorted on.
    pub fn record_key(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Author => "Author",
            Self::Genre => "Genre",
            Self::ReleaseDate => "ReleaseDate",
            Self::Quantity => "AvailableQuantity",
        }
    }
}

/// Product list column accepted by `products list --sort`.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ProductSortColumn {
    Name,
    Description,
    ReleaseDate,
    DiscontinuedDate,
    Rating,
    Price,
}

impl ProductSortColumn {
    /// Record key sorted on.
    pub fn record_key(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::ReleaseDate => "ReleaseDate",
            Self::DiscontinuedDate => "DiscontinuedDate",
            Self::Rating => "Rating",
            Self::Price => "Price",
        }
    }
}

/// Value of `--date-source`, mirroring [`DateSource`].
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum DateSourceArg {
    /// The picker's selection
    Control,
    /// The record value
    Record,
}

impl From<DateSourceArg> for DateSource {
    fn from(arg: DateSourceArg) -> Self {
        match arg {
            DateSourceArg::Control => Self::Control,
            DateSourceArg::Record => Self::Record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["bookshelf", "list", "--today", "2024-03-15", "--sort", "release-date"]);
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(matches!(
            cli.command,
            Command::List { sort: Some(SortColumn::ReleaseDate), desc: false, .. }
        ));
    }

    #[test]
    fn edit_collects_only_given_fields() {
        let cli = Cli::parse_from(["bookshelf", "edit", "2", "--quantity", "9"]);
        let Command::Edit { index, fields } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(index, 2);
        assert_eq!(fields.entries().collect::<Vec<_>>(), [("AvailableQuantity", "9")]);
    }

    #[test]
    fn products_group_parses_its_own_sort_columns() {
        let cli = Cli::parse_from(["bookshelf", "products", "list", "--sort", "price", "--desc"]);
        assert!(matches!(
            cli.command,
            Command::Products {
                command: ProductCommand::List { sort: Some(ProductSortColumn::Price), desc: true, .. }
            }
        ));
        assert!(Cli::try_parse_from(["bookshelf", "products", "list", "--sort", "quantity"]).is_err());
    }

    #[test]
    fn product_edit_collects_only_given_fields() {
        let cli = Cli::parse_from([
            "bookshelf",
            "products",
            "edit",
            "3",
            "--discontinued-date",
            "2007-01-01",
            "--price",
            "9.5",
        ]);
        let Command::Products { command: ProductCommand::Edit { index, fields } } = cli.command else {
            panic!("expected products edit");
        };
        assert_eq!(index, 3);
        assert_eq!(
            fields.entries().collect::<Vec<_>>(),
            [("DiscontinuedDate", "2007-01-01"), ("Price", "9.5")]
        );
    }
}
