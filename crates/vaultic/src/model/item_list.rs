//! Incremental, dual-mode item list.
//!
//! `ItemList` is the ordered projection a view renders: a flat sequence of
//! [`VaultItem`] rows fed one event at a time by the database client. It
//! supports two insertion modes, chosen per event by the backend:
//!
//! - **append**: entries go to the end, groups go after the last group at
//!   the head of the sequence (insertion order within each partition);
//! - **sorted insert**: case-insensitive alphabetical order by name within
//!   each partition, scoped by nesting level.
//!
//! Both modes preserve the partition invariant that all groups precede all
//! entries, and the group/entry counters always sum to the sequence length.

use parking_lot::RwLock;

use vaultic_core::Signal;
use vaultic_core::logging::targets;

use super::item::{ColumnValue, ItemColumn, ItemKind, VaultItem};

/// Signals emitted by an [`ItemList`].
///
/// Views connect to these to stay synchronized with the list.
pub struct ListSignals {
    /// Emitted after any mutation of the sequence contents. Coarse; a
    /// consumer watching the whole collection re-reads on this.
    pub data_changed: Signal<()>,

    /// Emitted when a single row's display fields changed in place,
    /// carrying the row index. Fired in addition to `data_changed` so
    /// views that can repaint one row cheaply may do so.
    pub item_changed: Signal<usize>,

    /// Emitted exactly when the sequence transitions between zero and one
    /// element, in either direction.
    pub empty_changed: Signal<()>,
}

impl Default for ListSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ListSignals {
    /// Creates a new set of list signals.
    pub fn new() -> Self {
        Self {
            data_changed: Signal::new(),
            item_changed: Signal::new(),
            empty_changed: Signal::new(),
        }
    }
}

/// Sequence state guarded by one lock so rows and counters never drift.
struct ListInner {
    items: Vec<VaultItem>,
    group_count: usize,
    entry_count: usize,
}

/// An ordered collection of [`VaultItem`] rows with incremental
/// insertion, update and removal.
///
/// All mutation happens on the single event-processing path; the internal
/// lock exists so shared references can mutate, not for concurrent
/// writers. Signals are emitted after the lock is released.
pub struct ItemList {
    inner: RwLock<ListInner>,
    signals: ListSignals,
}

impl Default for ItemList {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ListInner {
                items: Vec::new(),
                group_count: 0,
                entry_count: 0,
            }),
            signals: ListSignals::new(),
        }
    }

    /// Returns the signals for this list.
    pub fn signals(&self) -> &ListSignals {
        &self.signals
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    /// Returns `true` if the list has no rows.
    pub fn is_empty(&self) -> bool {
        self.inner.read().items.is_empty()
    }

    /// Number of group rows.
    pub fn group_count(&self) -> usize {
        self.inner.read().group_count
    }

    /// Number of entry rows.
    pub fn entry_count(&self) -> usize {
        self.inner.read().entry_count
    }

    /// Returns a clone of the row at `row`, if it exists.
    pub fn item(&self, row: usize) -> Option<VaultItem> {
        self.inner.read().items.get(row).cloned()
    }

    /// Reads one logical column of the row at `row`.
    pub fn column(&self, row: usize, column: ItemColumn) -> Option<ColumnValue> {
        self.inner.read().items.get(row).map(|item| item.column(column))
    }

    /// Runs `f` with read access to the row sequence.
    pub fn with_items<R>(&self, f: impl FnOnce(&[VaultItem]) -> R) -> R {
        f(&self.inner.read().items)
    }

    /// Resets the sequence to empty and both counters to zero.
    ///
    /// Emits `data_changed`; emits `empty_changed` only if the list held
    /// rows before. Idempotent.
    pub fn clear(&self) {
        let was_empty = {
            let mut inner = self.inner.write();
            let was_empty = inner.items.is_empty();
            inner.items.clear();
            inner.group_count = 0;
            inner.entry_count = 0;
            was_empty
        };
        self.signals.data_changed.emit(());
        if !was_empty {
            self.signals.empty_changed.emit(());
        }
    }

    /// Appends a row in insertion-order mode.
    ///
    /// Entries go to the end of the sequence. Groups are inserted right
    /// after the last group of the contiguous group run at the head, so
    /// the groups-before-entries partition holds by construction.
    pub fn append(&self, item: VaultItem) {
        let became_single = {
            let mut inner = self.inner.write();
            match item.kind {
                ItemKind::Entry => {
                    inner.items.push(item);
                    inner.entry_count += 1;
                }
                ItemKind::Group => {
                    let pos = inner
                        .items
                        .iter()
                        .position(|existing| existing.kind != ItemKind::Group)
                        .unwrap_or(inner.items.len());
                    inner.items.insert(pos, item);
                    inner.group_count += 1;
                }
            }
            inner.items.len() == 1
        };
        if became_single {
            self.signals.empty_changed.emit(());
        }
        self.signals.data_changed.emit(());
    }

    /// Inserts a row in sorted mode: case-insensitive alphabetical order
    /// by name within the row's type partition, scoped by nesting level.
    ///
    /// A group insertion scans `[0, group count)`, an entry insertion
    /// scans `[group count, length)`; the window bounds are taken before
    /// the matching counter is incremented, which keeps the window inside
    /// the row's own partition. Rows at a different nesting level are
    /// never compared; the scan skips past them as if they sorted first,
    /// so a level change resets the effective sort run.
    pub fn insert_sorted(&self, item: VaultItem) {
        let became_single = {
            let mut inner = self.inner.write();
            let (mut i, max) = match item.kind {
                ItemKind::Entry => {
                    let window = (inner.group_count, inner.items.len());
                    inner.entry_count += 1;
                    window
                }
                ItemKind::Group => {
                    let window = (0, inner.group_count);
                    inner.group_count += 1;
                    window
                }
            };
            let name_lower = item.name.to_lowercase();
            while i < max
                && (inner.items[i].level != item.level
                    || inner.items[i].name.to_lowercase() < name_lower)
            {
                i += 1;
            }
            tracing::trace!(
                target: targets::LIST_MODEL,
                name = %item.name,
                position = i,
                "sorted insert"
            );
            inner.items.insert(i, item);
            inner.items.len() == 1
        };
        if became_single {
            self.signals.empty_changed.emit(());
        }
        self.signals.data_changed.emit(());
    }

    /// Replaces the display fields of every row with the given id,
    /// keeping positions (insertion-order mode).
    ///
    /// Emits `item_changed` per touched row plus the coarse
    /// `data_changed`.
    pub fn update(&self, item_id: &str, name: &str, subtitle: &str) {
        let touched: Vec<usize> = {
            let mut inner = self.inner.write();
            let mut touched = Vec::new();
            for (row, item) in inner.items.iter_mut().enumerate() {
                if item.id == item_id {
                    item.name = name.to_string();
                    item.subtitle = subtitle.to_string();
                    touched.push(row);
                }
            }
            touched
        };
        for row in touched {
            self.signals.item_changed.emit(row);
        }
        self.signals.data_changed.emit(());
    }

    /// Renames a row in sorted mode.
    ///
    /// A new name can change the row's alphabetical position, so the row
    /// is removed and re-inserted via [`Self::insert_sorted`] with its
    /// original kind and level. No-op if the id is not present.
    pub fn update_sorted(&self, item_id: &str, name: &str, subtitle: &str) {
        let found = {
            let inner = self.inner.read();
            inner
                .items
                .iter()
                .find(|item| item.id == item_id)
                .map(|item| (item.kind, item.level))
        };
        if let Some((kind, level)) = found {
            self.delete(item_id);
            self.insert_sorted(VaultItem::new(item_id, name, subtitle, kind, level));
        }
    }

    /// Removes every row whose id matches, adjusting the matching
    /// counters.
    ///
    /// The scan covers the whole sequence rather than stopping at the
    /// first match; duplicate ids are a caller error but are cleaned up
    /// rather than crashed on. Returns `true` if anything was removed;
    /// when nothing matched, no signals fire.
    pub fn delete(&self, item_id: &str) -> bool {
        let (removed, now_empty) = {
            let mut inner = self.inner.write();
            let mut removed = false;
            let mut i = 0;
            while i < inner.items.len() {
                if inner.items[i].id == item_id {
                    match inner.items[i].kind {
                        ItemKind::Entry => inner.entry_count -= 1,
                        ItemKind::Group => inner.group_count -= 1,
                    }
                    inner.items.remove(i);
                    removed = true;
                } else {
                    i += 1;
                }
            }
            (removed, inner.items.is_empty())
        };
        if removed {
            self.signals.data_changed.emit(());
            if now_empty {
                self.signals.empty_changed.emit(());
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    fn group(name: &str, level: i32) -> VaultItem {
        VaultItem::new(format!("id-{name}"), name, "", ItemKind::Group, level)
    }

    fn entry(name: &str, level: i32) -> VaultItem {
        VaultItem::new(format!("id-{name}"), name, "", ItemKind::Entry, level)
    }

    fn names(list: &ItemList) -> Vec<String> {
        list.with_items(|items| items.iter().map(|i| i.name.clone()).collect())
    }

    #[test]
    fn test_append_keeps_groups_before_entries() {
        let list = ItemList::new();
        list.append(entry("Gmail", 0));
        list.append(group("Work", 0));
        list.append(entry("Bank", 0));
        list.append(group("Home", 0));

        list.with_items(|items| {
            let first_entry = items
                .iter()
                .position(|i| i.kind == ItemKind::Entry)
                .unwrap();
            assert!(
                items[first_entry..].iter().all(|i| i.kind == ItemKind::Entry),
                "groups must precede entries"
            );
        });
        assert_eq!(names(&list), vec!["Work", "Home", "Gmail", "Bank"]);
    }

    #[test]
    fn test_append_scenario_counts() {
        let list = ItemList::new();
        list.append(group("Work", 0));
        list.append(group("Home", 0));
        list.append(entry("Gmail", 0));

        assert_eq!(names(&list), vec!["Work", "Home", "Gmail"]);
        assert_eq!(list.group_count(), 2);
        assert_eq!(list.entry_count(), 1);
        assert_eq!(list.group_count() + list.entry_count(), list.len());
    }

    #[test]
    fn test_sorted_insert_alphabetical_case_insensitive() {
        let list = ItemList::new();
        list.insert_sorted(group("Zeta", 0));
        list.insert_sorted(group("Alpha", 0));
        list.insert_sorted(group("mango", 0));

        assert_eq!(names(&list), vec!["Alpha", "mango", "Zeta"]);
    }

    #[test]
    fn test_sorted_insert_entries_stay_after_groups() {
        let list = ItemList::new();
        list.insert_sorted(entry("Aardvark", 0));
        list.insert_sorted(group("Zoo", 0));
        list.insert_sorted(entry("Mail", 0));
        list.insert_sorted(group("Bank", 0));

        assert_eq!(names(&list), vec!["Bank", "Zoo", "Aardvark", "Mail"]);
        assert_eq!(list.group_count(), 2);
        assert_eq!(list.entry_count(), 2);
    }

    #[test]
    fn test_sorted_insert_level_scopes_comparison() {
        // Rows at a different level are skipped without comparison, so a
        // level change resets the effective sort run.
        let list = ItemList::new();
        list.insert_sorted(group("Banking", 0));
        list.insert_sorted(group("Internet", 0));
        list.insert_sorted(group("Aaa", 1));

        // "Aaa" (level 1) skips past both level-0 groups.
        assert_eq!(names(&list), vec!["Banking", "Internet", "Aaa"]);
    }

    #[test]
    fn test_counts_match_length_after_mixed_mutations() {
        let list = ItemList::new();
        list.append(group("G1", 0));
        list.insert_sorted(entry("E1", 0));
        list.insert_sorted(group("G2", 0));
        list.append(entry("E2", 0));
        list.delete("id-G1");

        assert_eq!(list.group_count() + list.entry_count(), list.len());
        assert_eq!(list.group_count(), 1);
        assert_eq!(list.entry_count(), 2);
    }

    #[test]
    fn test_empty_changed_fires_only_on_transitions() {
        let list = ItemList::new();
        let transitions = Arc::new(Mutex::new(0));

        let counter = transitions.clone();
        list.signals().empty_changed.connect(move |_| {
            *counter.lock() += 1;
        });

        list.append(group("A", 0)); // 0 -> 1: fires
        list.append(group("B", 0)); // 1 -> 2: silent
        assert_eq!(*transitions.lock(), 1);

        list.delete("id-B"); // 2 -> 1: silent
        list.delete("id-A"); // 1 -> 0: fires
        assert_eq!(*transitions.lock(), 2);

        list.clear(); // already empty: silent
        assert_eq!(*transitions.lock(), 2);
    }

    #[test]
    fn test_delete_missing_id_is_silent_noop() {
        let list = ItemList::new();
        list.append(entry("Mail", 0));

        let notified = Arc::new(Mutex::new(false));
        let flag = notified.clone();
        list.signals().data_changed.connect(move |_| {
            *flag.lock() = true;
        });

        assert!(!list.delete("no-such-id"));
        assert!(!*notified.lock());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_delete_removes_every_id_match() {
        let list = ItemList::new();
        list.append(VaultItem::new("dup", "First", "", ItemKind::Entry, 0));
        list.append(VaultItem::new("dup", "Second", "", ItemKind::Entry, 0));
        list.append(VaultItem::new("other", "Keep", "", ItemKind::Entry, 0));

        assert!(list.delete("dup"));
        assert_eq!(names(&list), vec!["Keep"]);
        assert_eq!(list.entry_count(), 1);
    }

    #[test]
    fn test_delete_last_item_signals_both() {
        let list = ItemList::new();
        list.append(entry("Mail", 0));

        let events = Arc::new(Mutex::new(Vec::new()));
        let data = events.clone();
        list.signals().data_changed.connect(move |_| {
            data.lock().push("data");
        });
        let empty = events.clone();
        list.signals().empty_changed.connect(move |_| {
            empty.lock().push("empty");
        });

        assert!(list.delete("id-Mail"));
        assert!(list.is_empty());
        assert_eq!(*events.lock(), vec!["data", "empty"]);
    }

    #[test]
    fn test_clear_resets_counts_and_is_idempotent() {
        let list = ItemList::new();
        list.append(group("G", 0));
        list.append(entry("E", 0));

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.group_count(), 0);
        assert_eq!(list.entry_count(), 0);

        // A second clear must not claim an emptiness transition.
        let transitions = Arc::new(Mutex::new(0));
        let counter = transitions.clone();
        list.signals().empty_changed.connect(move |_| {
            *counter.lock() += 1;
        });
        list.clear();
        assert_eq!(*transitions.lock(), 0);
    }

    #[test]
    fn test_update_in_place_keeps_position() {
        let list = ItemList::new();
        list.append(group("Work", 0));
        list.append(group("Home", 0));

        let changed_rows = Arc::new(Mutex::new(Vec::new()));
        let rows = changed_rows.clone();
        list.signals().item_changed.connect(move |&row| {
            rows.lock().push(row);
        });

        list.update("id-Home", "Apartment", "Subgroups: 0 | Entries: 3");

        assert_eq!(names(&list), vec!["Work", "Apartment"]);
        assert_eq!(list.item(1).unwrap().subtitle, "Subgroups: 0 | Entries: 3");
        assert_eq!(*changed_rows.lock(), vec![1]);
    }

    #[test]
    fn test_update_sorted_repositions_renamed_item() {
        let list = ItemList::new();
        list.insert_sorted(group("Alpha", 0));
        list.insert_sorted(group("Mango", 0));
        list.insert_sorted(group("Zeta", 0));

        list.update_sorted("id-Mango", "Aardvark", "");

        assert_eq!(names(&list), vec!["Aardvark", "Alpha", "Zeta"]);
        assert_eq!(list.group_count(), 3);
        // Kind and level survive the reinsert.
        let item = list.item(0).unwrap();
        assert_eq!(item.kind, ItemKind::Group);
        assert_eq!(item.id, "id-Mango");
    }

    #[test]
    fn test_update_sorted_missing_id_is_noop() {
        let list = ItemList::new();
        list.insert_sorted(group("Alpha", 0));
        list.update_sorted("nope", "Renamed", "");
        assert_eq!(names(&list), vec!["Alpha"]);
    }

    #[test]
    fn test_column_access_through_list() {
        let list = ItemList::new();
        list.append(VaultItem::new("aa", "Mail", "sub", ItemKind::Entry, 0));

        assert_eq!(
            list.column(0, ItemColumn::Name).unwrap().as_text(),
            Some("Mail")
        );
        assert!(list.column(5, ItemColumn::Name).is_none());
    }
}
