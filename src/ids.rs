//! Element id generation for rendered documents.
//!
//! Ids only need to be unique within one document. Production output uses
//! random ids; tests substitute [`SequentialIds`] for stable output.

use uuid::Uuid;

/// Source of element ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// `id_` followed by the first ten hex digits of a v4 UUID.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("id_{}", &hex[..10])
    }
}

/// `id_1`, `id_2`, ... in call order.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("id_{}", self.next)
    }
}
