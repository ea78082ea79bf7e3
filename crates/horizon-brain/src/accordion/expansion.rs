//! Open-set bookkeeping for accordions.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use horizon_brain_core::{Property, Signal};
use parking_lot::{Mutex, RwLock};

use super::{ExpansionMode, ItemState};
use crate::logging::targets;

/// Process-wide item counter; trigger and content ids derived from it must
/// be unique across every accordion on the page.
static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of an accordion item.
///
/// Ids are allocated once per item from a monotonically increasing counter
/// and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw id, e.g. one read back from a rendered attribute.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric id.
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracks which items of one accordion are open.
///
/// The open set is ordered by when each item was opened. In
/// [`ExpansionMode::Single`] it holds at most one id; in
/// [`ExpansionMode::Multiple`] it never holds duplicates.
///
/// # Signals
///
/// - `open_items_changed(Vec<ItemId>)`: Emitted after every mutation that
///   changed the open set, with the new set
/// - `state_changed(ItemState)`: Emitted when the aggregate state flips
///   between open (at least one item open) and closed
///
/// Slots run after the new set is committed. A slot must not mutate the
/// same controller through `open_item`, `close_item` or `toggle_item`; such
/// calls are rejected and logged. Item bindings go through
/// [`sync_item`](Self::sync_item), which queues the change until the
/// notification finishes instead.
pub struct ExpansionController {
    mode: Property<ExpansionMode>,
    open_ids: RwLock<Vec<ItemId>>,
    notifying: AtomicBool,
    deferred: Mutex<Vec<(ItemId, bool)>>,

    /// Signal emitted when the open set changes.
    pub open_items_changed: Signal<Vec<ItemId>>,

    /// Signal emitted when the aggregate open/closed state changes.
    pub state_changed: Signal<ItemState>,
}

/// Clears the notifying flag even if a slot panics.
struct NotifyingGuard<'a>(&'a AtomicBool);

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ExpansionController {
    /// Create a controller with nothing open.
    pub fn new(mode: ExpansionMode) -> Self {
        Self {
            mode: Property::new(mode),
            open_ids: RwLock::new(Vec::new()),
            notifying: AtomicBool::new(false),
            deferred: Mutex::new(Vec::new()),
            open_items_changed: Signal::new(),
            state_changed: Signal::new(),
        }
    }

    /// Get the expansion mode.
    pub fn mode(&self) -> ExpansionMode {
        self.mode.get()
    }

    /// Change the expansion mode for subsequent operations.
    ///
    /// The current open set is left as is. Switching to single mode while
    /// several items are open leaves them open until the next open or close;
    /// callers that need a single open item must close the others first.
    ///
    /// Returns `true` if the mode changed.
    pub fn set_mode(&self, mode: ExpansionMode) -> bool {
        if !self.mode.set(mode) {
            return false;
        }
        let open_count = self.open_ids.read().len();
        if mode == ExpansionMode::Single && open_count > 1 {
            tracing::warn!(
                target: targets::EXPANSION,
                open_count,
                "switched to single expansion with several items open"
            );
        }
        true
    }

    /// Check if an item is open.
    pub fn is_open(&self, id: ItemId) -> bool {
        self.open_ids.read().contains(&id)
    }

    /// The open items, in the order they were opened.
    pub fn open_items(&self) -> Vec<ItemId> {
        self.open_ids.read().clone()
    }

    /// Number of open items.
    pub fn open_count(&self) -> usize {
        self.open_ids.read().len()
    }

    /// Aggregate state: open if at least one item is open.
    pub fn state(&self) -> ItemState {
        ItemState::from_open(!self.open_ids.read().is_empty())
    }

    /// Open an item.
    ///
    /// In single mode the open set becomes exactly `[id]`; in multiple mode
    /// `id` is appended unless already present.
    ///
    /// Returns `true` if the open set changed.
    pub fn open_item(&self, id: ItemId) -> bool {
        self.mutate("open", id, |ids, mode| open_into(ids, mode, id))
    }

    /// Close an item. Closing an item that is not open does nothing.
    ///
    /// Returns `true` if the open set changed.
    pub fn close_item(&self, id: ItemId) -> bool {
        self.mutate("close", id, |ids, _| ids.retain(|&open| open != id))
    }

    /// Close the item if it is open, open it otherwise.
    ///
    /// The check and the update happen under one lock, so observers see a
    /// single transition per call. Reopening appends the id to the end of
    /// the open set, so toggling twice in multiple mode moves it last.
    ///
    /// Returns `true` if the open set changed.
    pub fn toggle_item(&self, id: ItemId) -> bool {
        self.mutate("toggle", id, |ids, mode| {
            if let Some(pos) = ids.iter().position(|&open| open == id) {
                ids.remove(pos);
            } else {
                open_into(ids, mode, id);
            }
        })
    }

    /// Open or close an item on behalf of its binding.
    ///
    /// Called from inside one of this controller's change notifications, the
    /// request is queued and applied once the notification finishes, so an
    /// item's externally driven state is never lost.
    ///
    /// Returns `true` if the open set changed immediately.
    pub fn sync_item(&self, id: ItemId, open: bool) -> bool {
        if self.notifying.load(Ordering::SeqCst) {
            tracing::trace!(
                target: targets::EXPANSION,
                item = %id,
                open,
                "deferring item sync until notification finishes"
            );
            self.deferred.lock().push((id, open));
            return false;
        }
        if open {
            self.open_item(id)
        } else {
            self.close_item(id)
        }
    }

    fn mutate<F>(&self, op: &'static str, id: ItemId, apply: F) -> bool
    where
        F: FnOnce(&mut Vec<ItemId>, ExpansionMode),
    {
        if self.notifying.load(Ordering::SeqCst) {
            tracing::warn!(
                target: targets::EXPANSION,
                op,
                item = %id,
                "ignoring open-set change requested from a change notification"
            );
            return false;
        }

        let mode = self.mode.get();
        let (snapshot, was_open) = {
            let mut ids = self.open_ids.write();
            let before = ids.clone();
            apply(&mut *ids, mode);
            if *ids == before {
                return false;
            }
            (ids.clone(), !before.is_empty())
        };

        tracing::debug!(
            target: targets::EXPANSION,
            op,
            item = %id,
            open = ?snapshot,
            "open set changed"
        );

        let is_open = !snapshot.is_empty();
        self.notifying.store(true, Ordering::SeqCst);
        let guard = NotifyingGuard(&self.notifying);
        self.open_items_changed.emit(snapshot);
        if was_open != is_open {
            self.state_changed.emit(ItemState::from_open(is_open));
        }
        drop(guard);

        let deferred = std::mem::take(&mut *self.deferred.lock());
        for (id, open) in deferred {
            self.sync_item(id, open);
        }
        true
    }
}

impl Default for ExpansionController {
    fn default() -> Self {
        Self::new(ExpansionMode::default())
    }
}

impl fmt::Debug for ExpansionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionController")
            .field("mode", &self.mode())
            .field("open_ids", &self.open_items())
            .finish()
    }
}

fn open_into(ids: &mut Vec<ItemId>, mode: ExpansionMode, id: ItemId) {
    match mode {
        ExpansionMode::Single => {
            ids.clear();
            ids.push(id);
        }
        ExpansionMode::Multiple => {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
}

static_assertions::assert_impl_all!(ExpansionController: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ids(raw: &[u64]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId::from_raw).collect()
    }

    #[test]
    fn test_item_ids_are_never_reused() {
        let a = ItemId::next();
        let b = ItemId::next();
        assert!(b > a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_single_mode_scenario() {
        let controller = ExpansionController::new(ExpansionMode::Single);
        let item1 = ItemId::from_raw(1);

        controller.open_item(ItemId::from_raw(0));
        assert_eq!(controller.open_items(), ids(&[0]));

        controller.open_item(item1);
        assert_eq!(controller.open_items(), ids(&[1]));

        controller.toggle_item(item1);
        assert!(controller.open_items().is_empty());

        controller.toggle_item(item1);
        assert_eq!(controller.open_items(), ids(&[1]));
    }

    #[test]
    fn test_multiple_mode_scenario() {
        let controller = ExpansionController::new(ExpansionMode::Multiple);

        controller.open_item(ItemId::from_raw(0));
        controller.open_item(ItemId::from_raw(2));
        assert_eq!(controller.open_items(), ids(&[0, 2]));

        controller.close_item(ItemId::from_raw(0));
        assert_eq!(controller.open_items(), ids(&[2]));
    }

    #[test]
    fn test_open_is_idempotent_in_multiple_mode() {
        let controller = ExpansionController::new(ExpansionMode::Multiple);
        let id = ItemId::from_raw(4);

        assert!(controller.open_item(id));
        assert!(!controller.open_item(id));
        assert_eq!(controller.open_items(), vec![id]);
    }

    #[test]
    fn test_single_mode_never_exceeds_one() {
        let controller = ExpansionController::new(ExpansionMode::Single);
        let sequence = [(true, 0), (true, 1), (false, 1), (true, 2), (true, 2), (false, 7), (true, 0)];

        for (open, raw) in sequence {
            let id = ItemId::from_raw(raw);
            if open {
                controller.open_item(id);
            } else {
                controller.close_item(id);
            }
            assert!(controller.open_count() <= 1);
        }
    }

    #[test]
    fn test_toggle_twice_restores_open_set() {
        let controller = ExpansionController::new(ExpansionMode::Multiple);
        controller.open_item(ItemId::from_raw(3));
        controller.open_item(ItemId::from_raw(8));
        let before = controller.open_items();

        for raw in [3, 5, 8] {
            let id = ItemId::from_raw(raw);
            controller.toggle_item(id);
            controller.toggle_item(id);
            assert_eq!(controller.open_items().len(), before.len());
            assert!(before.iter().all(|&open| controller.is_open(open)));
        }

        let single = ExpansionController::new(ExpansionMode::Single);
        let id = ItemId::from_raw(1);
        single.toggle_item(id);
        single.toggle_item(id);
        assert!(single.open_items().is_empty());
    }

    #[test]
    fn test_close_missing_item_is_noop() {
        let controller = ExpansionController::default();
        let received = Arc::new(Mutex::new(0));

        let received_clone = received.clone();
        controller.open_items_changed.connect(move |_| {
            *received_clone.lock() += 1;
        });

        assert!(!controller.close_item(ItemId::from_raw(9)));
        assert_eq!(*received.lock(), 0);
    }

    #[test]
    fn test_signals_report_committed_state() {
        let controller = ExpansionController::new(ExpansionMode::Multiple);
        let sets = Arc::new(Mutex::new(Vec::new()));
        let states = Arc::new(Mutex::new(Vec::new()));

        let sets_clone = sets.clone();
        controller.open_items_changed.connect(move |open| {
            sets_clone.lock().push(open.clone());
        });
        let states_clone = states.clone();
        controller.state_changed.connect(move |&state| {
            states_clone.lock().push(state);
        });

        controller.open_item(ItemId::from_raw(0));
        controller.open_item(ItemId::from_raw(1));
        controller.close_item(ItemId::from_raw(0));
        controller.close_item(ItemId::from_raw(1));

        assert_eq!(
            *sets.lock(),
            vec![ids(&[0]), ids(&[0, 1]), ids(&[1]), ids(&[])]
        );
        assert_eq!(*states.lock(), vec![ItemState::Open, ItemState::Closed]);
    }

    #[test]
    fn test_mutation_from_notification_is_rejected() {
        let controller = Arc::new(ExpansionController::new(ExpansionMode::Multiple));
        let nested_result = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&controller);
        let nested_clone = nested_result.clone();
        controller.open_items_changed.connect(move |_| {
            if let Some(controller) = weak.upgrade() {
                *nested_clone.lock() = Some(controller.toggle_item(ItemId::from_raw(1)));
            }
        });

        assert!(controller.open_item(ItemId::from_raw(0)));
        assert_eq!(*nested_result.lock(), Some(false));
        assert_eq!(controller.open_items(), ids(&[0]));

        // The guard is released once notification finishes.
        assert!(controller.open_item(ItemId::from_raw(2)));
    }

    #[test]
    fn test_sync_from_notification_is_deferred() {
        let controller = Arc::new(ExpansionController::new(ExpansionMode::Multiple));
        let nested_result = Arc::new(Mutex::new(None));
        let sets = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&controller);
        let nested_clone = nested_result.clone();
        let sets_clone = sets.clone();
        controller.open_items_changed.connect(move |open| {
            sets_clone.lock().push(open.clone());
            if let Some(controller) = weak.upgrade() {
                if controller.is_open(ItemId::from_raw(0)) && !controller.is_open(ItemId::from_raw(1)) {
                    *nested_clone.lock() = Some(controller.sync_item(ItemId::from_raw(1), true));
                }
            }
        });

        assert!(controller.open_item(ItemId::from_raw(0)));
        assert_eq!(*nested_result.lock(), Some(false));
        assert_eq!(controller.open_items(), ids(&[0, 1]));
        assert_eq!(*sets.lock(), vec![ids(&[0]), ids(&[0, 1])]);
    }

    #[test]
    fn test_sync_outside_notification_applies_immediately() {
        let controller = ExpansionController::new(ExpansionMode::Single);
        assert!(controller.sync_item(ItemId::from_raw(4), true));
        assert!(!controller.sync_item(ItemId::from_raw(4), true));
        assert!(controller.sync_item(ItemId::from_raw(4), false));
        assert!(controller.open_items().is_empty());
    }

    #[test]
    fn test_toggle_twice_moves_item_last() {
        let controller = ExpansionController::new(ExpansionMode::Multiple);
        controller.open_item(ItemId::from_raw(1));
        controller.open_item(ItemId::from_raw(3));

        controller.toggle_item(ItemId::from_raw(1));
        controller.toggle_item(ItemId::from_raw(1));
        assert_eq!(controller.open_items(), ids(&[3, 1]));
    }

    #[test]
    fn test_set_mode_does_not_reconcile() {
        let controller = ExpansionController::new(ExpansionMode::Multiple);
        controller.open_item(ItemId::from_raw(0));
        controller.open_item(ItemId::from_raw(1));

        assert!(controller.set_mode(ExpansionMode::Single));
        assert!(!controller.set_mode(ExpansionMode::Single));
        assert_eq!(controller.open_items(), ids(&[0, 1]));

        controller.open_item(ItemId::from_raw(2));
        assert_eq!(controller.open_items(), ids(&[2]));
    }

    #[test]
    fn test_aggregate_state() {
        let controller = ExpansionController::default();
        assert_eq!(controller.state(), ItemState::Closed);
        controller.open_item(ItemId::from_raw(0));
        assert_eq!(controller.state(), ItemState::Open);
        assert!(controller.is_open(ItemId::from_raw(0)));
    }
}
