//! Topic name to payload type lookup.

use std::collections::BTreeMap;

use tracing::warn;

/// Maps each observed topic name to its declared payload type.
///
/// The first declaration wins. Later declarations with a different type are
/// dropped and counted so callers can tell the table hides disagreements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTypeRegistry {
    types: BTreeMap<String, String>,
    conflicts: usize,
}

impl TopicTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a type declaration for `topic`.
    ///
    /// Returns true if the topic was not known before.
    pub fn observe(&mut self, topic: &str, type_name: &str) -> bool {
        match self.types.get(topic) {
            None => {
                self.types.insert(topic.to_string(), type_name.to_string());
                true
            }
            Some(known) => {
                if known != type_name {
                    warn!(
                        "Topic {} declared as {} but first seen as {}; keeping {}",
                        topic, type_name, known, known
                    );
                    self.conflicts += 1;
                }
                false
            }
        }
    }

    pub fn get(&self, topic: &str) -> Option<&str> {
        self.types.get(topic).map(String::as_str)
    }

    /// Iterate `(topic, type)` pairs in lexicographic topic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(t, ty)| (t.as_str(), ty.as_str()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of declarations dropped because they disagreed with the first one.
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }
}
