//! Single-group command adapter.
//!
//! Where the list models project whole directory levels, [`GroupHandle`]
//! drives the lifecycle of one group: load its data for an edit dialog,
//! save a new title, create it under a parent, or delete it. Results
//! arrive on the handle's own signals, forwarded from the client's
//! event stream.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use vaultic_core::Signal;
use vaultic_core::logging::targets;

use crate::client::{DatabaseClient, ResultCode};

/// Adapter for operations on a single group.
///
/// `Arc`-owned like the list models; the client's event stream holds
/// weak references back into the handle, so dropping it silences the
/// forwarding.
pub struct GroupHandle {
    client: Arc<dyn DatabaseClient>,
    /// Id of the group this handle addresses; empty until created or
    /// explicitly targeted.
    group_id: Mutex<String>,
    disconnectors: Mutex<Vec<Box<dyn FnOnce() + Send>>>,

    /// The group's data finished loading; carries its title.
    pub loaded: Signal<String>,
    /// Result of the last save.
    pub saved: Signal<ResultCode>,
    /// Result of the last create; on success the handle has already
    /// adopted the new group's id.
    pub created: Signal<(ResultCode, String)>,
    /// Result of the last delete.
    pub deleted: Signal<ResultCode>,
}

impl GroupHandle {
    /// Creates a handle bound to `client`, initially addressing no group.
    pub fn new(client: Arc<dyn DatabaseClient>) -> Arc<Self> {
        let handle = Arc::new(Self {
            client: client.clone(),
            group_id: Mutex::new(String::new()),
            disconnectors: Mutex::new(Vec::new()),
            loaded: Signal::new(),
            saved: Signal::new(),
            created: Signal::new(),
            deleted: Signal::new(),
        });

        let mut disconnectors = handle.disconnectors.lock();

        let weak: Weak<Self> = Arc::downgrade(&handle);
        let id = client.events().group_loaded.connect(move |title: &String| {
            if let Some(handle) = weak.upgrade() {
                handle.loaded.emit(title.clone());
            }
        });
        let c = client.clone();
        disconnectors.push(Box::new(move || { c.events().group_loaded.disconnect(id); }));

        let weak = Arc::downgrade(&handle);
        let id = client.events().group_saved.connect(move |&rc: &ResultCode| {
            if let Some(handle) = weak.upgrade() {
                handle.saved.emit(rc);
            }
        });
        let c = client.clone();
        disconnectors.push(Box::new(move || { c.events().group_saved.disconnect(id); }));

        let weak = Arc::downgrade(&handle);
        let id = client
            .events()
            .group_created
            .connect(move |(rc, new_group_id): &(ResultCode, String)| {
                if let Some(handle) = weak.upgrade() {
                    if *rc == ResultCode::Ok {
                        *handle.group_id.lock() = new_group_id.clone();
                    }
                    handle.created.emit((*rc, new_group_id.clone()));
                }
            });
        let c = client.clone();
        disconnectors.push(Box::new(move || { c.events().group_created.disconnect(id); }));

        let weak = Arc::downgrade(&handle);
        let id = client
            .events()
            .group_deleted
            .connect(move |&rc: &ResultCode| {
                if let Some(handle) = weak.upgrade() {
                    handle.deleted.emit(rc);
                }
            });
        let c = client.clone();
        disconnectors.push(Box::new(move || { c.events().group_deleted.disconnect(id); }));

        drop(disconnectors);
        handle
    }

    /// The id of the group this handle addresses; empty if none yet.
    pub fn group_id(&self) -> String {
        self.group_id.lock().clone()
    }

    /// Points the handle at an existing group.
    pub fn set_group_id(&self, group_id: impl Into<String>) {
        *self.group_id.lock() = group_id.into();
    }

    /// Requests the group's data; answered by [`Self::loaded`].
    pub fn load(&self) {
        let group_id = self.group_id.lock().clone();
        tracing::debug!(target: targets::CLIENT, group_id = %group_id, "loading group");
        self.client.load_group(&group_id);
    }

    /// Saves a new title for the group; answered by [`Self::saved`].
    pub fn save(&self, title: &str) {
        let group_id = self.group_id.lock().clone();
        self.client.save_group(&group_id, title);
    }

    /// Creates a new group under `parent_group_id`; answered by
    /// [`Self::created`]. On success the handle adopts the new id.
    pub fn create(&self, title: &str, icon_id: u32, parent_group_id: &str) {
        self.client.create_group(title, icon_id, parent_group_id);
    }

    /// Deletes the group; answered by [`Self::deleted`].
    pub fn delete(&self) {
        let group_id = self.group_id.lock().clone();
        self.client.delete_group(&group_id);
    }

    /// Moves the group under another parent. Affected list models pick up
    /// the change through item delete/insert events.
    pub fn move_to(&self, new_parent_group_id: &str) {
        let group_id = self.group_id.lock().clone();
        self.client.move_group(&group_id, new_parent_group_id);
    }
}

impl Drop for GroupHandle {
    fn drop(&mut self) {
        for disconnect in std::mem::take(self.disconnectors.get_mut()) {
            disconnect();
        }
    }
}
