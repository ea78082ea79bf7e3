//! Ancestor lookup for accordion bindings.

use std::sync::Arc;

use super::{Accordion, AccordionItem};
use crate::error::{AccordionError, Result};

/// The accordion ancestors visible at the point where a binding is created.
///
/// Rendering layers build one of these while walking their tree and hand it
/// to [`AccordionItem::from_context`] and
/// [`AccordionTrigger::from_context`](super::AccordionTrigger::from_context),
/// which fail with [`AccordionError::MissingAncestor`] when the ancestor they
/// need is absent.
#[derive(Debug, Clone, Default)]
pub struct AncestorContext {
    accordion: Option<Arc<Accordion>>,
    item: Option<Arc<AccordionItem>>,
}

impl AncestorContext {
    /// An empty context, as seen outside any accordion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enclosing accordion using builder pattern.
    pub fn with_accordion(mut self, accordion: Arc<Accordion>) -> Self {
        self.accordion = Some(accordion);
        self
    }

    /// Add an enclosing item using builder pattern.
    ///
    /// The item's accordion becomes the enclosing accordion as well.
    pub fn with_item(mut self, item: Arc<AccordionItem>) -> Self {
        self.accordion = Some(item.accordion().clone());
        self.item = Some(item);
        self
    }

    /// The nearest enclosing accordion.
    pub fn accordion(&self) -> Option<&Arc<Accordion>> {
        self.accordion.as_ref()
    }

    /// The nearest enclosing item.
    pub fn item(&self) -> Option<&Arc<AccordionItem>> {
        self.item.as_ref()
    }

    /// The enclosing accordion, or a [`MissingAncestor`](AccordionError::MissingAncestor)
    /// error naming `binding`.
    pub fn require_accordion(&self, binding: &'static str) -> Result<&Arc<Accordion>> {
        self.accordion.as_ref().ok_or(AccordionError::MissingAncestor {
            binding,
            ancestor: "Accordion",
        })
    }

    /// The enclosing item, or a [`MissingAncestor`](AccordionError::MissingAncestor)
    /// error naming `binding`.
    pub fn require_item(&self, binding: &'static str) -> Result<&Arc<AccordionItem>> {
        self.item.as_ref().ok_or(AccordionError::MissingAncestor {
            binding,
            ancestor: "AccordionItem",
        })
    }
}
