//! Per-item outcomes of a batch run and their rendering.

use serde::Serialize;
use webfit_core::OptimizationResult;

/// What happened to one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// The image was optimized and written to the archive.
    Optimized {
        source: String,
        /// Name of the archive entry (may carry a dedup suffix).
        entry: String,
        size_bytes: usize,
        quality: u8,
        final_width: u32,
        final_height: u32,
        budget_met: bool,
    },
    /// The image could not be read, decoded or encoded.
    Failed { source: String, error: String },
}

impl ItemOutcome {
    /// Build the success outcome for `result` stored as `entry`.
    pub fn optimized(source: String, entry: String, result: &OptimizationResult) -> Self {
        ItemOutcome::Optimized {
            source,
            entry,
            size_bytes: result.size_bytes,
            quality: result.quality,
            final_width: result.final_width,
            final_height: result.final_height,
            budget_met: result.budget_met,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            ItemOutcome::Optimized { source, .. } | ItemOutcome::Failed { source, .. } => source,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Optimized { .. })
    }

    /// One-line summary, e.g. `photo.webp | 93.1 KB | Q: 85`.
    pub fn summary(&self) -> String {
        match self {
            ItemOutcome::Optimized {
                entry,
                size_bytes,
                quality,
                final_width,
                ..
            } => format!(
                "{entry} | {} | Q: {quality} | {final_width}px",
                format_kb(*size_bytes)
            ),
            ItemOutcome::Failed { source, error } => format!("{source} | {error}"),
        }
    }
}

/// All outcomes of a batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub budget_bytes: usize,
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn new(budget_bytes: usize) -> Self {
        Self {
            budget_bytes,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: ItemOutcome) {
        self.items.push(outcome);
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    /// Optimized items whose size still exceeds the budget.
    pub fn over_budget(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, ItemOutcome::Optimized { budget_met: false, .. }))
            .count()
    }

    /// Sum of the output sizes of all optimized items.
    pub fn total_bytes(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                ItemOutcome::Optimized { size_bytes, .. } => *size_bytes,
                ItemOutcome::Failed { .. } => 0,
            })
            .sum()
    }
}

/// Format a byte count in KiB with one decimal, e.g. `93.1 KB`.
pub fn format_kb(bytes: usize) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
