//! Per-category completion

use crate::percentage;
use oblig_model::{Category, TaskInstance};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completion figures for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Category
    pub category: Category,
    /// Tasks in this category
    pub total: usize,
    /// Completed tasks in this category (on time or late)
    pub completed: usize,
    /// `completed / total * 100`
    pub completion_rate: f64,
}

impl CategoryBreakdown {
    /// One entry per category that has at least one task, in category order
    #[must_use]
    pub fn collect<'a>(tasks: impl IntoIterator<Item = &'a TaskInstance>) -> Vec<Self> {
        let mut counts: BTreeMap<Category, (usize, usize)> = BTreeMap::new();

        for task in tasks {
            let entry = counts.entry(task.category).or_default();
            entry.0 += 1;
            if task.is_completed() {
                entry.1 += 1;
            }
        }

        counts
            .into_iter()
            .map(|(category, (total, completed))| Self {
                category,
                total,
                completed,
                completion_rate: percentage(completed, total).unwrap_or(0.0),
            })
            .collect()
    }
}
