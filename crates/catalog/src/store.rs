//! In-memory catalog of entities.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{CatalogError, CatalogResult};
use crate::query::Query;

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row<E> {
    /// Stored item.
    pub item: E,
    /// Row is in inline edit mode.
    #[serde(default)]
    pub edit_mode: bool,
}

impl<E> Row<E> {
    fn new(item: E) -> Self {
        Self {
            item,
            edit_mode: false,
        }
    }
}

/// Ordered list of entities, addressed by row index.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<E> {
    rows: Vec<Row<E>>,
}

impl<E> Default for Catalog<E> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<E: Entity> Catalog<E> {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `items` in order.
    pub fn from_items(items: impl IntoIterator<Item = E>) -> Self {
        Self {
            rows: items.into_iter().map(Row::new).collect(),
        }
    }

    /// Reads a JSON array of items from `path`.
    pub fn load_json(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let items: Vec<E> = serde_json::from_str(&text)?;
        tracing::debug!(kind = E::NAME, path = %path.display(), rows = items.len(), "catalog loaded");
        Ok(Self::from_items(items))
    }

    /// Writes the items to `path` as a pretty JSON array.
    pub fn save_json(&self, path: impl AsRef<Path>) -> CatalogResult<()> {
        let path = path.as_ref();
        let items: Vec<&E> = self.items().collect();
        let text = serde_json::to_string_pretty(&items)?;
        std::fs::write(path, text + "\n").map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(kind = E::NAME, path = %path.display(), rows = items.len(), "catalog saved");
        Ok(())
    }

    /// Items in row order.
    pub fn items(&self) -> impl Iterator<Item = &E> {
        self.rows.iter().map(|row| &row.item)
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Row<E>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the catalog has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&E> {
        self.rows.get(index).map(|row| &row.item)
    }

    /// Appends `item` and returns its row index.
    pub fn add(&mut self, item: E) -> usize {
        self.rows.push(Row::new(item));
        let index = self.rows.len() - 1;
        tracing::info!(kind = E::NAME, index, "row added");
        index
    }

    /// Replaces the item at `index`, keeping its edit mode.
    pub fn update(&mut self, index: usize, item: E) -> CatalogResult<()> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(CatalogError::RowOutOfRange { index, len })?;
        row.item = item;
        tracing::info!(kind = E::NAME, index, "row updated");
        Ok(())
    }

    /// Flips inline edit mode of the row at `index` and returns the new mode.
    pub fn toggle_edit(&mut self, index: usize) -> CatalogResult<bool> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(CatalogError::RowOutOfRange { index, len })?;
        row.edit_mode = !row.edit_mode;
        Ok(row.edit_mode)
    }

    /// Removes every row whose index is in `indices` and returns how many
    /// were removed. Unknown and repeated indices are ignored.
    pub fn delete(&mut self, indices: &[usize]) -> usize {
        let before = self.rows.len();
        let mut index = 0;
        self.rows.retain(|_| {
            let keep = !indices.contains(&index);
            index += 1;
            keep
        });
        let removed = before - self.rows.len();
        tracing::info!(kind = E::NAME, removed, "rows deleted");
        removed
    }

    /// Rows matching `query`, in query order, with their row indices.
    pub fn view(&self, query: &Query) -> Vec<(usize, &E)> {
        let records = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| (index, row.item.to_record()));
        query
            .apply(records)
            .into_iter()
            .filter_map(|(index, _)| self.get(index).map(|item| (index, item)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Book;
    use crate::query::Sorter;
    use pretty_assertions::assert_eq;

    fn names(catalog: &Catalog<Book>) -> Vec<&str> {
        catalog.items().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn add_returns_new_index() {
        let mut catalog = Catalog::from_items(Book::samples());
        let index = catalog.add(Book::new("New", "Someone", "Drama", None, 1));
        assert_eq!(index, 7);
        assert_eq!(catalog.get(7).map(|b| b.name.as_str()), Some("New"));
    }

    #[test]
    fn update_out_of_range_is_an_error() {
        let mut catalog = Catalog::<Book>::new();
        let err = catalog
            .update(3, Book::new("X", "Y", "Z", None, 0))
            .unwrap_err();
        assert!(matches!(err, CatalogError::RowOutOfRange { index: 3, len: 0 }));
    }

    #[test]
    fn toggle_edit_flips_mode() {
        let mut catalog = Catalog::from_items(Book::samples());
        assert!(catalog.toggle_edit(1).unwrap());
        assert!(catalog.rows()[1].edit_mode);
        assert!(!catalog.toggle_edit(1).unwrap());
    }

    #[test]
    fn delete_removes_selection_in_one_pass() {
        let mut catalog = Catalog::from_items(Book::samples());
        assert_eq!(catalog.delete(&[4, 0, 4, 99]), 2);
        assert_eq!(
            names(&catalog),
            [
                "Code of the North",
                "Tech Patterns",
                "Midnight Letters",
                "Ashes of Empire",
                "Thinking in Systems"
            ]
        );
        assert_eq!(catalog.delete(&[]), 0);
    }

    #[test]
    fn view_keeps_row_indices() {
        let catalog = Catalog::from_items(Book::samples());
        let query = Query::from_list_state("", "Technology").sort_by(Sorter::descending("Name"));
        let view: Vec<_> = catalog
            .view(&query)
            .into_iter()
            .map(|(i, b)| (i, b.name.as_str()))
            .collect();
        assert_eq!(view, [(2, "Tech Patterns"), (1, "Code of the North")]);
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        let catalog = Catalog::from_items(Book::samples());
        catalog.save_json(&path).unwrap();
        assert_eq!(Catalog::<Book>::load_json(&path).unwrap(), catalog);
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let err = Catalog::<Book>::load_json("/nonexistent/books.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/books.json"));
    }
}
