//! Row records for the vault list models.

use std::fmt;

/// Whether a row represents a database group or a password entry.
///
/// Groups always sort before entries inside a list model, regardless of
/// insertion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A group (folder) in the database tree.
    Group,
    /// A password entry.
    Entry,
}

/// Logical columns a view can read from a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemColumn {
    /// Display title; the primary (case-insensitive) sort key.
    Name,
    /// Secondary display text, e.g. child counts or a username preview.
    Subtitle,
    /// Hex-encoded database identifier.
    Id,
    /// Group or entry.
    Kind,
    /// Nesting depth; compared only against rows at the same depth.
    Level,
}

/// A value read from a row column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    /// Text columns (name, subtitle, id).
    Text(String),
    /// The kind column.
    Kind(ItemKind),
    /// The level column.
    Level(i32),
}

impl ColumnValue {
    /// Returns the text content, if this is a text column.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Kind(ItemKind::Group) => f.write_str("group"),
            Self::Kind(ItemKind::Entry) => f.write_str("entry"),
            Self::Level(level) => write!(f, "{level}"),
        }
    }
}

/// A single row of a vault list model.
///
/// Items are immutable by convention; the list model replaces display
/// fields wholesale when the backend reports a change. The `id` is unique
/// within a registered model scope (duplicates are tolerated defensively,
/// see [`ItemList::delete`](super::ItemList::delete)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultItem {
    /// Hex-encoded database identifier.
    pub id: String,
    /// Display title.
    pub name: String,
    /// Secondary display text.
    pub subtitle: String,
    /// Group or entry.
    pub kind: ItemKind,
    /// Nesting depth, used only to scope alphabetical comparisons.
    pub level: i32,
}

impl VaultItem {
    /// Creates a new row record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subtitle: impl Into<String>,
        kind: ItemKind,
        level: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subtitle: subtitle.into(),
            kind,
            level,
        }
    }

    /// Reads one logical column of this row.
    pub fn column(&self, column: ItemColumn) -> ColumnValue {
        match column {
            ItemColumn::Name => ColumnValue::Text(self.name.clone()),
            ItemColumn::Subtitle => ColumnValue::Text(self.subtitle.clone()),
            ItemColumn::Id => ColumnValue::Text(self.id.clone()),
            ItemColumn::Kind => ColumnValue::Kind(self.kind),
            ItemColumn::Level => ColumnValue::Level(self.level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_access() {
        let item = VaultItem::new("aa", "Mail", "user | pass", ItemKind::Entry, 1);

        assert_eq!(item.column(ItemColumn::Name).as_text(), Some("Mail"));
        assert_eq!(
            item.column(ItemColumn::Subtitle).as_text(),
            Some("user | pass")
        );
        assert_eq!(item.column(ItemColumn::Id).as_text(), Some("aa"));
        assert_eq!(item.column(ItemColumn::Kind), ColumnValue::Kind(ItemKind::Entry));
        assert_eq!(item.column(ItemColumn::Level), ColumnValue::Level(1));
    }

    #[test]
    fn test_column_value_display() {
        assert_eq!(ColumnValue::Kind(ItemKind::Group).to_string(), "group");
        assert_eq!(ColumnValue::Level(2).to_string(), "2");
        assert_eq!(ColumnValue::Text("x".into()).to_string(), "x");
    }
}
