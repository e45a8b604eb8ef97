//! Bounded workflow cache keyed by normalized instruction text
//!
//! Eviction is FIFO: the oldest *inserted* key goes first, reads do not
//! refresh an entry.

use super::types::Workflow;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Lowercased, trimmed instruction
pub fn normalize_instruction(instruction: &str) -> String {
    instruction.trim().to_lowercase()
}

#[derive(Debug)]
pub struct WorkflowCache {
    entries: HashMap<String, Workflow>,
    order: VecDeque<String>,
    capacity: usize,
}

impl WorkflowCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, instruction: &str) -> Option<&Workflow> {
        self.entries.get(&normalize_instruction(instruction))
    }

    /// Insert or replace. Replacing keeps the original insertion slot.
    pub fn insert(&mut self, instruction: &str, workflow: Workflow) {
        let key = normalize_instruction(instruction);
        if self.entries.insert(key.clone(), workflow).is_some() {
            return;
        }
        self.order.push_back(key);

        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                debug!("Evicting cached workflow for '{}'", oldest);
                self.entries.remove(&oldest);
            }
        }
    }

    pub fn contains(&self, instruction: &str) -> bool {
        self.entries.contains_key(&normalize_instruction(instruction))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl Default for WorkflowCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
