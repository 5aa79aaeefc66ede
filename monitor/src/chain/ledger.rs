//! Sliding-window liveness ledger
//!
//! `LivenessWindow` is a fixed ring buffer read most-recent-first. The
//! missed counter on `ValidatorInfo` only ever grows and is clamped to the
//! signing window; a signed block does not pay it back.

use super::signing::BlockOutcome;

/// Observed state of the monitored validator
#[derive(Debug, Clone)]
pub struct ValidatorInfo {
    pub moniker: String,
    pub bonded: bool,
    pub jailed: bool,
    pub tombstoned: bool,
    pub missed: i64,
    pub window: i64,
    pub conspub: Vec<u8>,
}

/// Fixed-capacity history of block outcomes
#[derive(Debug, Clone)]
pub struct LivenessWindow {
    slots: Vec<BlockOutcome>,
    // Index of the most recent entry
    head: usize,
}

impl LivenessWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "liveness window needs at least one slot");
        Self {
            slots: vec![BlockOutcome::Unknown; capacity],
            head: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Prepend `outcome`, overwriting the oldest entry
    pub fn push(&mut self, outcome: BlockOutcome) {
        self.head = (self.head + self.slots.len() - 1) % self.slots.len();
        self.slots[self.head] = outcome;
    }

    /// Entry `index` blocks ago, 0 being the latest
    pub fn get(&self, index: usize) -> Option<BlockOutcome> {
        if index >= self.slots.len() {
            return None;
        }
        Some(self.slots[(self.head + index) % self.slots.len()])
    }

    pub fn iter(&self) -> impl Iterator<Item = BlockOutcome> + '_ {
        (0..self.slots.len()).map(move |i| self.slots[(self.head + i) % self.slots.len()])
    }

    pub fn to_vec(&self) -> Vec<BlockOutcome> {
        self.iter().collect()
    }
}

/// Validator counters plus the outcome history they are derived from
#[derive(Debug, Clone)]
pub struct LivenessLedger {
    validator: ValidatorInfo,
    window: LivenessWindow,
}

impl LivenessLedger {
    pub fn new(validator: ValidatorInfo, slots: usize) -> Self {
        Self {
            validator,
            window: LivenessWindow::new(slots),
        }
    }

    pub fn validator(&self) -> &ValidatorInfo {
        &self.validator
    }

    pub fn window(&self) -> &LivenessWindow {
        &self.window
    }

    pub fn record_outcome(&mut self, outcome: BlockOutcome) {
        self.window.push(outcome);

        if outcome == BlockOutcome::Missed {
            self.validator.missed = (self.validator.missed + 1).min(self.validator.window);
        }
    }
}
