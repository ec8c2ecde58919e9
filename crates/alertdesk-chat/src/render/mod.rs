//! Render target abstraction.
//!
//! The controller never touches a concrete display. It appends bubbles,
//! clears the view, and shows or removes loading indicators through
//! [`RenderTarget`]. All methods take `&self` so that concurrently running
//! operations can share one target.

mod memory;

use std::fmt;
use std::sync::Arc;

pub use memory::{Entry, MemoryTarget};

use crate::Bubble;

/// Handle for one loading indicator shown by a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndicatorId(pub u64);

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "indicator-{}", self.0)
    }
}

/// Display surface driven by the chat controller.
pub trait RenderTarget: Send + Sync {
    /// Appends a bubble at the end of the conversation.
    fn append(&self, bubble: Bubble);

    /// Removes every bubble and indicator.
    fn clear(&self);

    /// Shows a loading indicator at the end of the conversation.
    fn show_indicator(&self) -> IndicatorId;

    /// Removes a loading indicator. Removing an unknown or already removed
    /// indicator is a no-op.
    fn remove_indicator(&self, indicator: IndicatorId);

    /// Brings the newest entry into view.
    fn scroll_to_end(&self) {}
}

impl<T> RenderTarget for Arc<T>
where
    T: RenderTarget + ?Sized,
{
    fn append(&self, bubble: Bubble) {
        (**self).append(bubble);
    }

    fn clear(&self) {
        (**self).clear();
    }

    fn show_indicator(&self) -> IndicatorId {
        (**self).show_indicator()
    }

    fn remove_indicator(&self, indicator: IndicatorId) {
        (**self).remove_indicator(indicator);
    }

    fn scroll_to_end(&self) {
        (**self).scroll_to_end();
    }
}
