//! In-memory render target.

use std::sync::{Mutex, MutexGuard};

use super::{IndicatorId, RenderTarget};
use crate::Bubble;

/// One slot in the rendered conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Bubble(Bubble),
    Indicator(IndicatorId),
}

#[derive(Debug, Default)]
struct Transcript {
    entries: Vec<Entry>,
    next_indicator: u64,
    scrolls: usize,
}

/// Render target that keeps the conversation in memory.
///
/// Useful for headless front-ends and for asserting on what the controller
/// rendered.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    transcript: Mutex<Transcript>,
}

impl MemoryTarget {
    /// Creates an empty target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every entry in display order.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().entries.clone()
    }

    /// Returns the bubbles in display order, skipping indicators.
    pub fn bubbles(&self) -> Vec<Bubble> {
        self.lock()
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Bubble(bubble) => Some(bubble.clone()),
                Entry::Indicator(_) => None,
            })
            .collect()
    }

    /// Returns the text of every bubble in display order.
    pub fn contents(&self) -> Vec<String> {
        self.bubbles()
            .into_iter()
            .map(|bubble| bubble.content)
            .collect()
    }

    /// Returns the number of indicators currently shown.
    pub fn indicator_count(&self) -> usize {
        self.lock()
            .entries
            .iter()
            .filter(|entry| matches!(entry, Entry::Indicator(_)))
            .count()
    }

    /// Returns how often the view was scrolled to the end.
    pub fn scroll_count(&self) -> usize {
        self.lock().scrolls
    }

    fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RenderTarget for MemoryTarget {
    fn append(&self, bubble: Bubble) {
        self.lock().entries.push(Entry::Bubble(bubble));
    }

    fn clear(&self) {
        self.lock().entries.clear();
    }

    fn show_indicator(&self) -> IndicatorId {
        let mut transcript = self.lock();
        transcript.next_indicator += 1;
        let indicator = IndicatorId(transcript.next_indicator);
        transcript.entries.push(Entry::Indicator(indicator));
        indicator
    }

    fn remove_indicator(&self, indicator: IndicatorId) {
        self.lock()
            .entries
            .retain(|entry| *entry != Entry::Indicator(indicator));
    }

    fn scroll_to_end(&self) {
        self.lock().scrolls += 1;
    }
}
