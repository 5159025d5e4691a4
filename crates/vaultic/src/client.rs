//! The database client boundary.
//!
//! Everything that actually touches the encrypted database (decryption,
//! key derivation, KDBX parsing, persistence) lives behind the
//! [`DatabaseClient`] trait. The adapter layer sends commands through the
//! trait's methods and reacts to the client's published event stream
//! ([`ClientEvents`]).
//!
//! # Contract
//!
//! For every load or search command, the client emits zero or more item
//! events tagged with the request's scope identity, followed by exactly
//! one completion event carrying a [`ResultCode`]. Delivery is sequential
//! and FIFO; a model knows a load is finished only via the completion
//! event, never by counting items. Item events are broadcast: every
//! connected model sees every event and filters by scope id itself.

use vaultic_core::Signal;

use crate::model::ItemKind;

/// Outcome of a database request, delivered through completion events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    /// The request completed.
    Ok,
    /// The database is not opened or the engine is not initialized. The
    /// only recoverable request failure; no retry is attempted
    /// automatically.
    DbNotOpened,
}

/// Payload of an item append / sorted-insert event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEvent {
    /// Display title.
    pub name: String,
    /// Secondary display text (child counts or username preview).
    pub subtitle: String,
    /// Hex-encoded id of the group or entry.
    pub item_id: String,
    /// Group or entry.
    pub kind: ItemKind,
    /// Nesting depth.
    pub level: i32,
    /// Scope identity of the list model this event is addressed to.
    pub model_id: String,
}

/// Payload of an item update event (display fields only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUpdateEvent {
    /// New display title.
    pub name: String,
    /// New secondary display text.
    pub subtitle: String,
    /// Hex-encoded id of the group or entry.
    pub item_id: String,
    /// Scope identity of the list model this event is addressed to.
    pub model_id: String,
}

/// The event stream a database client publishes.
///
/// Any number of models may subscribe; scope filtering happens on the
/// subscriber side. Structured as a struct of signals so a client
/// implementation simply owns one and emits on it.
pub struct ClientEvents {
    /// An item should be appended in insertion-order mode.
    pub item_appended: Signal<ItemEvent>,

    /// An item should be inserted in alphabetical-sort mode.
    pub item_inserted_sorted: Signal<ItemEvent>,

    /// An item's display fields changed; position is kept.
    pub item_updated: Signal<ItemUpdateEvent>,

    /// An item's display fields changed in a sorted list; the item may
    /// need to move.
    pub item_updated_sorted: Signal<ItemUpdateEvent>,

    /// An item was removed from the database. Carries the item id. Not
    /// scope-filtered; every model drops matching rows.
    pub item_deleted: Signal<String>,

    /// Completion of a [`DatabaseClient::load_master_groups`] request.
    pub master_groups_loaded: Signal<ResultCode>,

    /// Completion of a [`DatabaseClient::load_groups_and_entries`]
    /// request.
    pub groups_and_entries_loaded: Signal<ResultCode>,

    /// Completion of a [`DatabaseClient::search_entries`] request.
    pub search_entries_completed: Signal<ResultCode>,

    /// A single group's data finished loading; carries its title.
    pub group_loaded: Signal<String>,

    /// Completion of a group save.
    pub group_saved: Signal<ResultCode>,

    /// Completion of a group creation; carries the new group's id.
    pub group_created: Signal<(ResultCode, String)>,

    /// Completion of a group deletion.
    pub group_deleted: Signal<ResultCode>,

    /// A caller-supplied identifier string failed to decode to the
    /// fixed-length database id format; carries the offending string.
    pub id_conversion_failed: Signal<String>,

    /// Backend-wide reset: every connected model must drop its wiring and
    /// registration state.
    pub all_clients_disconnected: Signal<()>,
}

impl Default for ClientEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientEvents {
    /// Creates a new, unconnected event stream.
    pub fn new() -> Self {
        Self {
            item_appended: Signal::new(),
            item_inserted_sorted: Signal::new(),
            item_updated: Signal::new(),
            item_updated_sorted: Signal::new(),
            item_deleted: Signal::new(),
            master_groups_loaded: Signal::new(),
            groups_and_entries_loaded: Signal::new(),
            search_entries_completed: Signal::new(),
            group_loaded: Signal::new(),
            group_saved: Signal::new(),
            group_created: Signal::new(),
            group_deleted: Signal::new(),
            id_conversion_failed: Signal::new(),
            all_clients_disconnected: Signal::new(),
        }
    }
}

/// Capability set consumed from the database engine.
///
/// Commands return immediately; results arrive later through
/// [`ClientEvents`]. Implementations decide whether to emit item events in
/// append or sorted mode (typically from a sort-alphabetically setting).
pub trait DatabaseClient: Send + Sync {
    /// Loads the master groups (children of the database root).
    ///
    /// Emits item events scoped to the root identity, then
    /// `master_groups_loaded`. When `register_list_models` is false the
    /// client skips the id-to-scope bookkeeping used to route later
    /// update/delete events (dialog sessions).
    fn load_master_groups(&self, register_list_models: bool);

    /// Loads the direct children (subgroups and entries) of `group_id`.
    ///
    /// Emits item events scoped to `group_id`, then
    /// `groups_and_entries_loaded`.
    fn load_groups_and_entries(&self, group_id: &str);

    /// Searches entries below `root_group_id` for `query`.
    ///
    /// Emits item events scoped to the search sentinel, then
    /// `search_entries_completed`.
    fn search_entries(&self, query: &str, root_group_id: &str);

    /// Drops the client's per-scope bookkeeping for `model_id`.
    /// Fire-and-forget; no reply.
    fn unregister_list_model(&self, model_id: &str);

    /// Loads a single group's data; answered by `group_loaded`.
    fn load_group(&self, group_id: &str);

    /// Saves a group's title; answered by `group_saved`.
    fn save_group(&self, group_id: &str, title: &str);

    /// Creates a group under `parent_group_id`; answered by
    /// `group_created`.
    fn create_group(&self, title: &str, icon_id: u32, parent_group_id: &str);

    /// Deletes a group; answered by `group_deleted`.
    fn delete_group(&self, group_id: &str);

    /// Moves an entry into another group. Resulting list changes arrive
    /// as item delete/insert events.
    fn move_entry(&self, entry_id: &str, new_group_id: &str);

    /// Moves a group under another parent. Resulting list changes arrive
    /// as item delete/insert events.
    fn move_group(&self, group_id: &str, new_parent_group_id: &str);

    /// The event stream this client publishes.
    fn events(&self) -> &ClientEvents;
}
