//! UUID-backed id generation for conversations and messages.

use bridge_core::IdGenerator;
use uuid::Uuid;

/// Generates v4 UUID strings.
#[derive(Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
