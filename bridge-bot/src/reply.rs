//! Auto-reply provider: random phrase from a configured list.

use async_trait::async_trait;
use bridge_core::ReplyProvider;
use rand::Rng;

/// Fallback used when the configured phrase list is empty.
const DEFAULT_REPLY: &str = "Gracias por tu mensaje.";

/// Picks a random phrase per reply.
pub struct RandomReplyProvider {
    phrases: Vec<String>,
}

impl RandomReplyProvider {
    pub fn new(phrases: Vec<String>) -> Self {
        let phrases = if phrases.is_empty() {
            vec![DEFAULT_REPLY.to_string()]
        } else {
            phrases
        };
        Self { phrases }
    }
}

#[async_trait]
impl ReplyProvider for RandomReplyProvider {
    async fn get_reply(&self) -> String {
        let index = rand::thread_rng().gen_range(0..self.phrases.len());
        self.phrases[index].clone()
    }
}
