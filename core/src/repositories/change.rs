//! Change tracking for the unit of work.

use crate::domain::entity::{EntityKind, Record};

/// A queued mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Insert(Record),
    Update(Record),
    Delete { kind: EntityKind, id: i64 },
}

/// Handle to a queued insert, redeemed for the generated key after save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InsertTicket(usize);

/// Ordered list of mutations waiting for `save()`
#[derive(Debug, Default)]
pub struct ChangeSet {
    changes: Vec<Change>,
    inserts: usize,
}

impl ChangeSet {
    pub fn insert(&mut self, record: Record) -> InsertTicket {
        let ticket = InsertTicket(self.inserts);
        self.inserts += 1;
        self.changes.push(Change::Insert(record));
        ticket
    }

    pub fn update(&mut self, record: Record) {
        self.changes.push(Change::Update(record));
    }

    pub fn delete(&mut self, kind: EntityKind, id: i64) {
        self.changes.push(Change::Delete { kind, id });
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Empties the set, returning its changes in queue order
    pub fn drain(&mut self) -> Vec<Change> {
        self.inserts = 0;
        std::mem::take(&mut self.changes)
    }
}

/// Outcome of a successful save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReceipt {
    inserted_ids: Vec<i64>,
    applied: usize,
}

impl SaveReceipt {
    pub fn new(inserted_ids: Vec<i64>, applied: usize) -> Self {
        Self { inserted_ids, applied }
    }

    /// Key generated for a queued insert
    pub fn id_of(&self, ticket: InsertTicket) -> Option<i64> {
        self.inserted_ids.get(ticket.0).copied()
    }

    pub fn inserted_ids(&self) -> &[i64] {
        &self.inserted_ids
    }

    /// Number of changes committed
    pub fn applied(&self) -> usize {
        self.applied
    }
}
