//! The UI-facing list model for vault contents.
//!
//! `VaultListModel` owns an [`ItemList`] and keeps it synchronized with
//! the database client: it issues load and search commands, claims a
//! scope identity (`model_id`) for the session, applies the item events
//! addressed to that scope, and ignores everything else. Several live
//! models share the client's one broadcast event stream; the scope check
//! is what keeps them from cross-talking.
//!
//! A model is created unregistered and disconnected. It wires itself to
//! the client's event stream on the first command, and claims its scope
//! id either lazily (from the first item event that arrives while
//! unregistered) or eagerly under one of the reserved sentinels for
//! dialog and search sessions.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use vaultic_core::logging::targets;
use vaultic_core::{DIALOG_MODEL_ID, SEARCH_MODEL_ID, Signal};

use crate::client::{DatabaseClient, ItemEvent, ItemUpdateEvent, ResultCode};

use super::item::VaultItem;
use super::item_list::ItemList;

/// Mutable lifecycle state, guarded as one unit.
struct ModelState {
    /// Scope identity; empty while unregistered.
    model_id: String,
    /// Whether a scope has been claimed for the current session.
    registered: bool,
    /// Whether the event wiring to the client is up.
    connected: bool,
    /// Group subtree that scopes search requests.
    search_root_group_id: String,
}

/// An incrementally-updated list model bound to a database client.
///
/// Constructed with (or later bound to) a [`DatabaseClient`] capability;
/// there is no global backend lookup. The model is `Arc`-owned because
/// the client's event stream holds weak references back into it.
pub struct VaultListModel {
    list: ItemList,
    client: RwLock<Option<Arc<dyn DatabaseClient>>>,
    state: Mutex<ModelState>,
    /// Teardown closures for the event-stream connections made by
    /// `connect_to_client`.
    disconnectors: Mutex<Vec<Box<dyn FnOnce() + Send>>>,

    /// Result of the last master-groups load request.
    pub master_groups_loaded: Signal<ResultCode>,
    /// Result of the last children load request.
    pub groups_and_entries_loaded: Signal<ResultCode>,
    /// Result of the last search request.
    pub search_entries_completed: Signal<ResultCode>,
}

impl VaultListModel {
    /// Creates a new, disconnected and unregistered model.
    pub fn new(client: Option<Arc<dyn DatabaseClient>>) -> Arc<Self> {
        Arc::new(Self {
            list: ItemList::new(),
            client: RwLock::new(client),
            state: Mutex::new(ModelState {
                model_id: String::new(),
                registered: false,
                connected: false,
                search_root_group_id: String::new(),
            }),
            disconnectors: Mutex::new(Vec::new()),
            master_groups_loaded: Signal::new(),
            groups_and_entries_loaded: Signal::new(),
            search_entries_completed: Signal::new(),
        })
    }

    /// Binds a client capability after construction.
    ///
    /// Takes effect on the next command; rebinding while connected is a
    /// caller error (the existing wiring stays with the old client until
    /// [`Self::disconnect_from_client`]).
    pub fn bind_client(&self, client: Arc<dyn DatabaseClient>) {
        *self.client.write() = Some(client);
    }

    /// The list this model projects into.
    pub fn list(&self) -> &ItemList {
        &self.list
    }

    /// Whether the event wiring to the client is up.
    pub fn is_connected(&self) -> bool {
        self.state.lock().connected
    }

    /// Whether a scope identity has been claimed for this session.
    pub fn is_registered(&self) -> bool {
        self.state.lock().registered
    }

    /// The current scope identity; empty while unregistered.
    pub fn model_id(&self) -> String {
        self.state.lock().model_id.clone()
    }

    /// Sets the group subtree that scopes subsequent searches.
    pub fn set_search_root_group_id(&self, group_id: impl Into<String>) {
        self.state.lock().search_root_group_id = group_id.into();
    }

    /// The group subtree that scopes searches.
    pub fn search_root_group_id(&self) -> String {
        self.state.lock().search_root_group_id.clone()
    }

    /// Wires this model to the bound client's event stream.
    ///
    /// Returns `false` if no client is bound (the only recoverable
    /// connection failure). Already-connected models return `true` without
    /// wiring again, so double-wiring cannot happen by construction.
    pub fn connect_to_client(self: &Arc<Self>) -> bool {
        if self.state.lock().connected {
            return true;
        }
        let Some(client) = self.client.read().clone() else {
            return false;
        };

        // Connect the client's event stream to this model. Each closure
        // holds a weak reference; a dropped model turns them into no-ops.
        let mut disconnectors = self.disconnectors.lock();

        let weak: Weak<Self> = Arc::downgrade(self);
        let id = client.events().item_appended.connect(move |ev: &ItemEvent| {
            if let Some(model) = weak.upgrade() {
                model.on_item_appended(ev);
            }
        });
        disconnectors.push(Self::disconnector(&client, move |c| {
            c.events().item_appended.disconnect(id);
        }));

        let weak = Arc::downgrade(self);
        let id = client
            .events()
            .item_inserted_sorted
            .connect(move |ev: &ItemEvent| {
                if let Some(model) = weak.upgrade() {
                    model.on_item_inserted_sorted(ev);
                }
            });
        disconnectors.push(Self::disconnector(&client, move |c| {
            c.events().item_inserted_sorted.disconnect(id);
        }));

        let weak = Arc::downgrade(self);
        let id = client
            .events()
            .item_updated
            .connect(move |ev: &ItemUpdateEvent| {
                if let Some(model) = weak.upgrade() {
                    model.on_item_updated(ev);
                }
            });
        disconnectors.push(Self::disconnector(&client, move |c| {
            c.events().item_updated.disconnect(id);
        }));

        let weak = Arc::downgrade(self);
        let id = client
            .events()
            .item_updated_sorted
            .connect(move |ev: &ItemUpdateEvent| {
                if let Some(model) = weak.upgrade() {
                    model.on_item_updated_sorted(ev);
                }
            });
        disconnectors.push(Self::disconnector(&client, move |c| {
            c.events().item_updated_sorted.disconnect(id);
        }));

        let weak = Arc::downgrade(self);
        let id = client.events().item_deleted.connect(move |item_id: &String| {
            if let Some(model) = weak.upgrade() {
                model.on_item_deleted(item_id);
            }
        });
        disconnectors.push(Self::disconnector(&client, move |c| {
            c.events().item_deleted.disconnect(id);
        }));

        let weak = Arc::downgrade(self);
        let id = client
            .events()
            .master_groups_loaded
            .connect(move |&rc: &ResultCode| {
                if let Some(model) = weak.upgrade() {
                    model.master_groups_loaded.emit(rc);
                }
            });
        disconnectors.push(Self::disconnector(&client, move |c| {
            c.events().master_groups_loaded.disconnect(id);
        }));

        let weak = Arc::downgrade(self);
        let id = client
            .events()
            .groups_and_entries_loaded
            .connect(move |&rc: &ResultCode| {
                if let Some(model) = weak.upgrade() {
                    model.groups_and_entries_loaded.emit(rc);
                }
            });
        disconnectors.push(Self::disconnector(&client, move |c| {
            c.events().groups_and_entries_loaded.disconnect(id);
        }));

        let weak = Arc::downgrade(self);
        let id = client
            .events()
            .search_entries_completed
            .connect(move |&rc: &ResultCode| {
                if let Some(model) = weak.upgrade() {
                    model.search_entries_completed.emit(rc);
                }
            });
        disconnectors.push(Self::disconnector(&client, move |c| {
            c.events().search_entries_completed.disconnect(id);
        }));

        let weak = Arc::downgrade(self);
        let id = client.events().all_clients_disconnected.connect(move |_| {
            if let Some(model) = weak.upgrade() {
                if model.is_connected() {
                    model.disconnect_from_client();
                }
            }
        });
        disconnectors.push(Self::disconnector(&client, move |c| {
            c.events().all_clients_disconnected.disconnect(id);
        }));

        drop(disconnectors);

        self.state.lock().connected = true;
        tracing::debug!(target: targets::CLIENT, "list model connected");
        true
    }

    /// Tears down the event wiring and resets registration state.
    ///
    /// Also driven by the client's `all_clients_disconnected` broadcast.
    pub fn disconnect_from_client(&self) {
        let disconnectors = std::mem::take(&mut *self.disconnectors.lock());
        for disconnect in disconnectors {
            disconnect();
        }
        let mut state = self.state.lock();
        state.connected = false;
        state.registered = false;
        state.model_id.clear();
        tracing::debug!(target: targets::CLIENT, "list model disconnected");
    }

    /// Releases this model's scope bookkeeping on the client side.
    pub fn unregister(&self) {
        let previous = {
            let mut state = self.state.lock();
            if state.registered {
                state.registered = false;
                Some(state.model_id.clone())
            } else {
                None
            }
        };
        if let Some(model_id) = previous {
            if let Some(client) = self.client.read().clone() {
                client.unregister_list_model(&model_id);
            }
        }
    }

    /// Requests the master groups (children of the database root).
    ///
    /// With `register_for_updates` the model claims its scope lazily from
    /// the first event the client sends back. Without it (dialog use) the
    /// model registers up front under the reserved dialog sentinel so the
    /// client skips live-update bookkeeping for the session.
    ///
    /// Clears the list, supersedes any previous session, and reports
    /// [`ResultCode::DbNotOpened`] through [`Self::master_groups_loaded`]
    /// if no client is available.
    pub fn load_master_groups(self: &Arc<Self>, register_for_updates: bool) {
        let Some(client) = self.prepare_request() else {
            self.master_groups_loaded.emit(ResultCode::DbNotOpened);
            return;
        };
        if !register_for_updates {
            let mut state = self.state.lock();
            state.model_id = DIALOG_MODEL_ID.to_string();
            state.registered = true;
        }
        client.load_master_groups(register_for_updates);
    }

    /// Requests the direct children of `group_id`, which becomes the new
    /// registration scope for subsequent events.
    pub fn load_groups_and_entries(self: &Arc<Self>, group_id: &str) {
        let Some(client) = self.prepare_request() else {
            self.groups_and_entries_loaded.emit(ResultCode::DbNotOpened);
            return;
        };
        client.load_groups_and_entries(group_id);
    }

    /// Searches entries below the configured search root.
    ///
    /// Search results never receive incremental edit updates, so the
    /// model registers immediately under the reserved search sentinel.
    pub fn search_entries(self: &Arc<Self>, query: &str) {
        let Some(client) = self.prepare_request() else {
            self.search_entries_completed.emit(ResultCode::DbNotOpened);
            return;
        };
        let root_group_id = {
            let mut state = self.state.lock();
            state.model_id = SEARCH_MODEL_ID.to_string();
            state.registered = true;
            state.search_root_group_id.clone()
        };
        client.search_entries(query, &root_group_id);
    }

    /// Common preamble of every load/search command: empty the list,
    /// bring the wiring up, and supersede the previous session's scope.
    ///
    /// Returns the client to send the request to, or `None` when no
    /// client is available.
    fn prepare_request(self: &Arc<Self>) -> Option<Arc<dyn DatabaseClient>> {
        if !self.list.is_empty() {
            self.list.clear();
        }
        let connected = self.state.lock().connected;
        if !connected && !self.connect_to_client() {
            return None;
        }
        let client = self.client.read().clone()?;
        let previous = {
            let mut state = self.state.lock();
            if state.registered {
                state.registered = false;
                Some(state.model_id.clone())
            } else {
                None
            }
        };
        if let Some(model_id) = previous {
            client.unregister_list_model(&model_id);
        }
        Some(client)
    }

    fn disconnector(
        client: &Arc<dyn DatabaseClient>,
        f: impl FnOnce(&Arc<dyn DatabaseClient>) + Send + 'static,
    ) -> Box<dyn FnOnce() + Send> {
        let client = client.clone();
        Box::new(move || f(&client))
    }

    fn on_item_appended(&self, event: &ItemEvent) {
        if self.claim_or_match_scope(&event.model_id) {
            self.list.append(VaultItem::new(
                event.item_id.clone(),
                event.name.clone(),
                event.subtitle.clone(),
                event.kind,
                event.level,
            ));
        }
    }

    fn on_item_inserted_sorted(&self, event: &ItemEvent) {
        if self.claim_or_match_scope(&event.model_id) {
            self.list.insert_sorted(VaultItem::new(
                event.item_id.clone(),
                event.name.clone(),
                event.subtitle.clone(),
                event.kind,
                event.level,
            ));
        }
    }

    fn on_item_updated(&self, event: &ItemUpdateEvent) {
        // Updates never claim a scope; only an already-owned one applies.
        if self.state.lock().model_id == event.model_id {
            self.list.update(&event.item_id, &event.name, &event.subtitle);
        }
    }

    fn on_item_updated_sorted(&self, event: &ItemUpdateEvent) {
        if self.state.lock().model_id == event.model_id {
            self.list
                .update_sorted(&event.item_id, &event.name, &event.subtitle);
        }
    }

    fn on_item_deleted(&self, item_id: &str) {
        // Deletions are broadcast to every live model; a removed item is
        // gone no matter which scope currently shows it.
        self.list.delete(item_id);
    }

    /// Lazy-registration rule: an unregistered model claims the scope of
    /// the first append/insert event it sees. Returns whether the event's
    /// scope matches this model.
    fn claim_or_match_scope(&self, event_model_id: &str) -> bool {
        let mut state = self.state.lock();
        if !state.registered {
            state.model_id = event_model_id.to_string();
            state.registered = true;
            tracing::debug!(
                target: targets::LIST_MODEL,
                model_id = %state.model_id,
                "claimed scope from first event"
            );
        }
        state.model_id == event_model_id
    }
}

impl Drop for VaultListModel {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if state.registered {
            let model_id = std::mem::take(&mut state.model_id);
            if let Some(client) = self.client.get_mut() {
                client.unregister_list_model(&model_id);
            }
        }
        for disconnect in std::mem::take(self.disconnectors.get_mut()) {
            disconnect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_client_reports_db_not_opened() {
        let model = VaultListModel::new(None);
        let results = Arc::new(Mutex::new(Vec::new()));

        let captured = results.clone();
        model.master_groups_loaded.connect(move |&rc| {
            captured.lock().push(rc);
        });

        model.load_master_groups(true);

        assert_eq!(*results.lock(), vec![ResultCode::DbNotOpened]);
        assert!(!model.is_connected());
        assert!(!model.is_registered());
    }

    #[test]
    fn test_children_load_without_client_reports_on_its_own_channel() {
        let model = VaultListModel::new(None);
        let results = Arc::new(Mutex::new(Vec::new()));

        let captured = results.clone();
        model.groups_and_entries_loaded.connect(move |&rc| {
            captured.lock().push(rc);
        });

        model.load_groups_and_entries("00112233445566778899aabbccddeeff");

        assert_eq!(*results.lock(), vec![ResultCode::DbNotOpened]);
    }

    #[test]
    fn test_search_root_group_id_round_trip() {
        let model = VaultListModel::new(None);
        assert_eq!(model.search_root_group_id(), "");
        model.set_search_root_group_id("aabb");
        assert_eq!(model.search_root_group_id(), "aabb");
    }

    #[test]
    fn test_unregister_without_client_is_noop() {
        let model = VaultListModel::new(None);
        model.unregister();
        assert!(!model.is_registered());
    }
}
