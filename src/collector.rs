//! Item collection over a decoded rule list.

use ahash::{AHashMap, AHashSet};

use crate::classifier::{classify, Classification};
use crate::error::LineError;
use crate::{Item, ItemType};

/// Receiver for lines that produce no item.
///
/// Line numbers are 1-based and count the `[AutoProxy]` header line.
pub trait LineSink {
    /// A line failed to classify.
    fn rejected(&mut self, line_no: usize, line: &str, error: &LineError);

    /// A whitelist or comment line was skipped.
    fn skipped(&mut self, _line_no: usize, _line: &str) {}
}

/// Sink that forwards to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LineSink for LogSink {
    fn rejected(&mut self, line_no: usize, _line: &str, error: &LineError) {
        log::info!("line {}: {}", line_no, error);
    }

    fn skipped(&mut self, line_no: usize, line: &str) {
        log::trace!("line {}: ignore line: {}", line_no, line);
    }
}

/// A line that failed classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub line_no: usize,
    pub line: String,
    pub error: LineError,
}

/// Collects rejections instead of logging them.
impl LineSink for Vec<Rejection> {
    fn rejected(&mut self, line_no: usize, line: &str, error: &LineError) {
        self.push(Rejection {
            line_no,
            line: line.to_string(),
            error: error.clone(),
        });
    }
}

/// Ordered, value-deduplicated item accumulator.
///
/// Two items with the same value are duplicates even when their types
/// differ; the first one pushed is kept.
#[derive(Debug, Default)]
pub struct ItemCollector {
    items: Vec<Item>,
    seen: AHashSet<String>,
}

impl ItemCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns `false` if its value was already collected.
    pub fn push(&mut self, item: Item) -> bool {
        if self.seen.contains(&item.value) {
            return false;
        }
        self.seen.insert(item.value.clone());
        self.items.push(item);
        true
    }

    /// Number of collected items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Collected items in first-seen order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consume into the collected items.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Number of collected items per type.
    pub fn counts(&self) -> AHashMap<ItemType, usize> {
        count_by_type(&self.items)
    }
}

/// Tally items per type.
pub fn count_by_type(items: &[Item]) -> AHashMap<ItemType, usize> {
    let mut counts = AHashMap::new();
    for item in items {
        *counts.entry(item.item_type).or_insert(0) += 1;
    }
    counts
}

/// Classify every line of a decoded list, logging lines that yield nothing.
pub fn collect(text: &[u8]) -> Vec<Item> {
    collect_with_sink(text, &mut LogSink)
}

/// Classify every line of a decoded list, reporting lines that yield nothing to `sink`.
pub fn collect_with_sink(text: &[u8], sink: &mut dyn LineSink) -> Vec<Item> {
    let text = String::from_utf8_lossy(text);
    let mut collector = ItemCollector::new();
    let mut duplicates = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        match classify(line) {
            Ok(Classification::Item(item)) => {
                if !collector.push(item) {
                    duplicates += 1;
                }
            }
            Ok(Classification::Skip) => sink.skipped(line_no, line),
            Err(e) => sink.rejected(line_no, line, &e),
        }
    }

    log::debug!(
        "Collected {} items ({} duplicates dropped)",
        collector.len(),
        duplicates
    );
    collector.into_items()
}
