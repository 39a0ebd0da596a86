use std::collections::HashSet;

use tracing::{debug, info};

use crate::models::Task;
use crate::text::TextNormalization;

/// Configuration for title deduplication
#[derive(Debug, Clone, Default)]
pub struct DedupConfig {
    /// Canonicalization producing the dedup key from a title
    pub key_normalization: TextNormalization,
}

/// Stage 2: drop tasks whose normalized title was already seen
///
/// Single pass in input order. The first occurrence is kept as-is and later
/// duplicates are discarded entirely; no metadata is merged.
pub fn deduplicate_tasks(tasks: &[Task], config: &DedupConfig) -> Vec<Task> {
    let mut seen_titles = HashSet::new();
    let mut unique = Vec::with_capacity(tasks.len());

    for task in tasks {
        let key = config.key_normalization.apply(&task.title);
        if seen_titles.insert(key) {
            unique.push(task.clone());
        } else {
            debug!("Dropping duplicate task {:?}", task.title);
        }
    }

    info!(
        "Stage 2: {} unique tasks ({} duplicates removed)",
        unique.len(),
        tasks.len() - unique.len()
    );

    unique
}
