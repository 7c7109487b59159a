use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::pattern::ParamKey;

/// Decoded value of one parameter. Repeatable parameters produce `Multiple`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multiple(_) => None,
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

pub type ParamEntry = (ParamKey, Option<ParamValue>);

/// Parameters of one match in pattern order. A parameter that took no part in
/// the match is present with no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchParams {
    entries: SmallVec<[ParamEntry; 4]>,
}

impl MatchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SmallVec::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, key: ParamKey, value: Option<ParamValue>) {
        self.entries.push((key, value));
    }

    pub fn value(&self, key: &ParamKey) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Single value of a named parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named(name).and_then(ParamValue::as_str)
    }

    /// All values of a named parameter; a single value is a one-element slice.
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.named(name).map(ParamValue::as_slice)
    }

    /// Value of the unnamed parameter at `index`.
    pub fn positional(&self, index: usize) -> Option<&ParamValue> {
        self.value(&ParamKey::Index(index))
    }

    /// Unnamed parameter values ordered by index.
    pub fn positional_values(&self) -> Vec<Option<&ParamValue>> {
        let mut indexed: Vec<(usize, Option<&ParamValue>)> = self
            .entries
            .iter()
            .filter_map(|(key, value)| key.as_index().map(|idx| (idx, value.as_ref())))
            .collect();
        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, value)| value).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, Option<&ParamValue>)> {
        self.entries.iter().map(|(key, value)| (key, value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn named(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_name() == Some(name))
            .and_then(|(_, value)| value.as_ref())
    }
}
