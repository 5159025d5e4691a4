//! Incrementally-updated list models over vault contents.
//!
//! The data flow mirrors a classic model/view split: a flat [`ItemList`]
//! holds the rows and emits change signals, and [`VaultListModel`] keeps
//! that list synchronized with the database client's event stream.
//!
//! # Core Types
//!
//! - [`VaultItem`]: one row (group or entry) with display fields
//! - [`ItemColumn`] / [`ColumnValue`]: per-row field access by logical
//!   column
//! - [`ItemList`] / [`ListSignals`]: the dual-mode list (insertion order
//!   or alphabetical) with change notifications
//! - [`VaultListModel`]: the client-facing controller

mod item;
mod item_list;
mod vault_list_model;

pub use item::{ColumnValue, ItemColumn, ItemKind, VaultItem};
pub use item_list::{ItemList, ListSignals};
pub use vault_list_model::VaultListModel;
