use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Anything stored in a collection with a unique string id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Milliseconds since the Unix epoch.
///
/// Stored as a decimal string (`"1609459200000"`) so existing store files
/// keep their format, but compared numerically. Plain JSON numbers are
/// accepted when reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl Visitor<'_> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("epoch milliseconds as a string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
                v.trim()
                    .parse::<i64>()
                    .map(Timestamp)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
                Ok(Timestamp(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
                i64::try_from(v)
                    .map(Timestamp)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }
        }

        deserializer.deserialize_any(TimestampVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Remaining profile fields, kept as-is.
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sent_by_id: String,
    pub conversation_id: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub participant_ids: Vec<String>,
    /// Conversations without a creation time sort as the oldest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Conversation {
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participant_ids.iter().any(|id| id == user_id)
    }
}

/// The whole document held by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Document {
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Users whose id appears in `ids`, in store order.
    pub fn users_in<'a>(&'a self, ids: &'a [String]) -> impl Iterator<Item = &'a User> + 'a {
        self.users.iter().filter(move |u| ids.contains(&u.id))
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Conversations the account participates in, in store order.
    pub fn conversations_for<'a>(&'a self, account_id: &'a str) -> impl Iterator<Item = &'a Conversation> + 'a {
        self.conversations.iter().filter(move |c| c.has_participant(account_id))
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Messages of a conversation, in store order.
    pub fn messages_in<'a>(&'a self, conversation_id: &'a str) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages
            .iter()
            .filter(move |m| m.conversation_id == conversation_id)
    }

    /// Newest message of a conversation. On equal timestamps the one
    /// appended last wins.
    pub fn latest_message<'a>(&'a self, conversation_id: &'a str) -> Option<&'a Message> {
        self.messages_in(conversation_id).max_by_key(|m| m.created_at)
    }
}

impl<T: Identified + ?Sized> Identified for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Message {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Conversation {
    fn id(&self) -> &str {
        &self.id
    }
}
