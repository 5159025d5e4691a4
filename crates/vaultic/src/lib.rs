//! Vaultic: UI adapter layer for an encrypted password database.
//!
//! This crate sits between a graphical application and the database
//! engine. The engine itself (decryption, key derivation, storage
//! format) is out of scope and lives behind the [`client::DatabaseClient`]
//! trait; what this crate provides is the glue that makes engine
//! contents usable by a UI:
//!
//! - [`model::VaultListModel`]: incrementally-updated, scope-filtered
//!   list models over one directory level of the vault (or a search
//!   result set)
//! - [`model::ItemList`]: the underlying dual-mode list (insertion
//!   order or alphabetical) with change signals
//! - [`group::GroupHandle`]: command/result adapter for single-group
//!   operations
//! - [`settings::ViewSettings`]: persisted presentation options
//!
//! # Event flow
//!
//! Commands go down through [`client::DatabaseClient`] methods and
//! return immediately; results come back through the client's published
//! [`client::ClientEvents`] signals. Item events are broadcast to every
//! connected model; each model filters by its scope identity
//! (`model_id`), claimed lazily from the first event of a load or
//! eagerly under a reserved sentinel for dialog and search sessions.
//!
//! ```ignore
//! use std::sync::Arc;
//! use vaultic::model::VaultListModel;
//!
//! let model = VaultListModel::new(Some(client));
//! model.master_groups_loaded.connect(|rc| {
//!     println!("load finished: {rc:?}");
//! });
//! model.load_master_groups(true);
//! ```

pub mod client;
pub mod group;
pub mod model;
pub mod settings;

pub use client::{ClientEvents, DatabaseClient, ItemEvent, ItemUpdateEvent, ResultCode};
pub use group::GroupHandle;
pub use model::{ItemKind, ItemList, VaultItem, VaultListModel};
pub use settings::{SettingsError, ViewSettings};
