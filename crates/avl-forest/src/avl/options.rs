use serde::{Deserialize, Serialize};

/// What [`AvlTree::insert`](super::AvlTree::insert) does with a key that
/// compares equal to one already stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the stored key and drop the new one.
    #[default]
    Ignore,
    /// Overwrite the stored key in place. Only observable when the
    /// comparator looks at part of the key.
    Replace,
}

/// Construction-time settings of an [`AvlTree`](super::AvlTree).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    pub duplicates: DuplicatePolicy,
}

impl TreeOptions {
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}
