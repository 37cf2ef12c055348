//! Username → integer label mappings.
//!
//! Training builds a [`LabelMap`] in first-seen order while walking a session
//! directory. Verification uses the fixed letter map from
//! [`LabelMap::inference_letters`]. The two are independent and nothing makes
//! them agree; a model trained on a directory whose users were not first seen
//! in `A, B, C, ...` order will be checked against the wrong expectations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Class label of one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, append-only username → label mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelMap {
    labels: Vec<(String, Label)>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed single-letter usernames `A` through `U` mapped to 0 through 20.
    pub fn inference_letters() -> Self {
        let labels = ('A'..='U')
            .enumerate()
            .map(|(i, c)| (c.to_string(), Label(i as u32)))
            .collect();
        Self { labels }
    }

    pub fn get(&self, username: &str) -> Option<Label> {
        self.labels
            .iter()
            .find(|(name, _)| name == username)
            .map(|(_, label)| *label)
    }

    /// Label for `username`, assigning the next integer on first sight.
    pub fn get_or_assign(&mut self, username: &str) -> Label {
        if let Some(label) = self.get(username) {
            return label;
        }
        let label = Label(self.labels.len() as u32);
        self.labels.push((username.to_string(), label));
        label
    }

    /// Username that owns `label`, if any.
    pub fn username(&self, label: Label) -> Option<&str> {
        self.labels
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Label)> {
        self.labels.iter().map(|(name, label)| (name.as_str(), *label))
    }

    pub fn save(&self, path: &Path) -> Result<(), crate::error::DatasetError> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, crate::error::DatasetError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
