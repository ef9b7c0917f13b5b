use crate::Database;
use crate::models::NewMessage;
use anyhow::{Result, anyhow};
use parley_types::models::{Conversation, Message, Timestamp, User};
use uuid::Uuid;

impl Database {
    // -- Users --

    pub fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.with_data(|doc| Ok(doc.user(id).cloned()))
    }

    // -- Conversations --

    pub fn get_conversation(&self, id: &str) -> Result<Option<Conversation>> {
        self.with_data(|doc| Ok(doc.conversation(id).cloned()))
    }

    // -- Messages --

    pub fn get_message(&self, id: &str) -> Result<Option<Message>> {
        self.with_data(|doc| Ok(doc.message(id).cloned()))
    }

    /// All messages of a conversation, in store order.
    pub fn get_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        self.with_data(|doc| Ok(doc.messages_in(conversation_id).cloned().collect()))
    }

    pub fn message_count(&self) -> Result<usize> {
        self.with_data(|doc| Ok(doc.messages.len()))
    }

    /// Append a message with a fresh id. The timestamp is clamped so it is
    /// never older than the newest message already stored.
    pub(crate) fn insert_message(&self, new: NewMessage) -> Result<Message> {
        self.with_data_mut(|data| {
            let doc = data
                .as_mut()
                .ok_or_else(|| anyhow!("Store is not initialized"))?;

            let newest = doc.messages.iter().map(|m| m.created_at).max();
            let created_at = match newest {
                Some(newest) => Timestamp::now().max(newest),
                None => Timestamp::now(),
            };

            let message = Message {
                id: Uuid::new_v4().to_string(),
                text: new.text,
                sent_by_id: new.sent_by_id,
                conversation_id: new.conversation_id,
                created_at,
            };
            doc.messages.push(message.clone());
            Ok(message)
        })
    }

    /// Undo an `insert_message` whose persist failed.
    pub(crate) fn remove_message(&self, id: &str) -> Result<()> {
        self.with_data_mut(|data| {
            if let Some(doc) = data.as_mut() {
                doc.messages.retain(|m| m.id != id);
            }
            Ok(())
        })
    }
}
