//! Per-item binding.

use std::fmt;
use std::sync::Arc;

use horizon_brain_core::Property;

use super::{Accordion, AncestorContext, ItemId, ItemState};
use crate::error::Result;
use crate::logging::targets;

/// One item of an [`Accordion`].
///
/// Each item gets a fresh [`ItemId`] and reads its open state from the
/// accordion's open set. The optional initially-open input opens or closes
/// the item when it is set, and again whenever it changes; between changes
/// the open set is the only source of truth.
///
/// Dropping an item removes its id from the open set.
///
/// Both the initially-open sync and the removal on drop are applied even
/// when they happen inside an open-set change notification; the
/// controller runs them once the notification finishes.
pub struct AccordionItem {
    id: ItemId,
    accordion: Arc<Accordion>,
    initially_open: Property<bool>,
}

impl AccordionItem {
    /// Create a closed item.
    pub fn new(accordion: &Arc<Accordion>) -> Arc<Self> {
        Self::with_initially_open(accordion, false)
    }

    /// Create an item, opening it if `initially_open` is set.
    pub fn with_initially_open(accordion: &Arc<Accordion>, initially_open: bool) -> Arc<Self> {
        let item = Arc::new(Self {
            id: ItemId::next(),
            accordion: accordion.clone(),
            initially_open: Property::new(initially_open),
        });
        tracing::trace!(target: targets::ACCORDION, id = %item.id, initially_open, "item created");
        if initially_open {
            item.sync_open(true);
        }
        item
    }

    /// Create an item inside the accordion found in `context`.
    ///
    /// Fails with [`MissingAncestor`](crate::AccordionError::MissingAncestor)
    /// when there is no enclosing accordion.
    pub fn from_context(context: &AncestorContext, initially_open: bool) -> Result<Arc<Self>> {
        let accordion = context.require_accordion("AccordionItem")?;
        Ok(Self::with_initially_open(accordion, initially_open))
    }

    /// The item's id.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The accordion this item belongs to.
    pub fn accordion(&self) -> &Arc<Accordion> {
        &self.accordion
    }

    /// Current open/closed state.
    pub fn state(&self) -> ItemState {
        ItemState::from_open(self.is_open())
    }

    /// Check if the item is open.
    pub fn is_open(&self) -> bool {
        self.accordion.is_open(self.id)
    }

    /// The last value of the initially-open input.
    pub fn initially_open(&self) -> bool {
        self.initially_open.get()
    }

    /// Update the initially-open input.
    ///
    /// A change opens or closes the item; setting the same value again does
    /// nothing, even if the item was toggled in between.
    ///
    /// Returns `true` if the input changed.
    pub fn set_initially_open(&self, open: bool) -> bool {
        if !self.initially_open.set(open) {
            return false;
        }
        self.sync_open(open);
        true
    }

    fn sync_open(&self, open: bool) {
        self.accordion.expansion().sync_item(self.id, open);
    }
}

impl Drop for AccordionItem {
    fn drop(&mut self) {
        self.accordion.expansion().sync_item(self.id, false);
    }
}

impl fmt::Debug for AccordionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccordionItem")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("initially_open", &self.initially_open())
            .finish()
    }
}

static_assertions::assert_impl_all!(AccordionItem: Send, Sync);
