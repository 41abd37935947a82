//! Chat buffers: ordered message and chat-list containers.
//!
//! Message bodies are kept opaque (`serde_json::Value`) until the backend
//! schema is confirmed; the buffers only promise insertion order, with the
//! most recent prepend first. No deduplication.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

macro_rules! typed_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            #[must_use]
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id!(MessageId);
typed_id!(ChatId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub payload: Value,
}

impl ChatMessage {
    #[must_use]
    pub fn new(id: impl Into<String>, payload: Value) -> Self {
        Self {
            id: MessageId::new(id),
            payload,
        }
    }

    /// Mints a message created on this device, before the server has
    /// assigned an id.
    #[must_use]
    pub fn local(payload: Value) -> Self {
        Self {
            id: MessageId::new(Uuid::new_v4().to_string()),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: ChatId,
    pub payload: Value,
}

impl ChatSummary {
    #[must_use]
    pub fn new(id: impl Into<String>, payload: Value) -> Self {
        Self {
            id: ChatId::new(id),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBuffer<T> {
    entries: VecDeque<T>,
}

impl<T> Default for ChatBuffer<T> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<T> ChatBuffer<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current contents in favor of a caller-computed
    /// sequence.
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = T>) {
        self.entries = entries.into_iter().collect();
    }

    pub fn prepend(&mut self, entry: T) {
        self.entries.push_front(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.entries.front()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entries.iter().cloned().collect()
    }
}
