//! Row models for the `conversations` and `messages` tables.

mod conversation_record;
mod message_record;

pub use conversation_record::ConversationRecord;
pub use message_record::MessageRecord;
