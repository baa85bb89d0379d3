//! In-memory scenario lookup, built once from the loaded dataset and then
//! only read.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("record {index} has no usable id")]
    MissingId { index: usize },
    #[error("duplicate scenario id {id:?} (records {first} and {second})")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },
}

#[derive(Debug, Default)]
pub struct ScenarioIndex<'a> {
    by_key: HashMap<String, (usize, &'a Value)>,
}

impl<'a> ScenarioIndex<'a> {
    /// Keys are normalized the same way router keys are (trimmed, uppercased).
    pub fn build(records: &'a [Value]) -> Result<Self, IndexError> {
        let mut by_key = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let id = record
                .get("id")
                .and_then(Value::as_str)
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .ok_or(IndexError::MissingId { index })?;
            if let Some((first, _)) = by_key.get(&id) {
                return Err(IndexError::DuplicateId {
                    id,
                    first: *first,
                    second: index,
                });
            }
            by_key.insert(id, (index, record));
        }
        Ok(Self { by_key })
    }

    pub fn resolve(&self, key: &str) -> Option<&'a Value> {
        self.by_key
            .get(&key.trim().to_uppercase())
            .map(|(_, record)| *record)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
