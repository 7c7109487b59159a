use hashbrown::HashMap;

use crate::matcher::{MatchParams, ParamValue};
use crate::pattern::ParamKey;

/// Values supplied to a [`PathBuilder`](super::PathBuilder), keyed by name or
/// positional index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildParams {
    values: HashMap<ParamKey, ParamValue>,
}

impl BuildParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K: Into<ParamKey>, V: Into<ParamValue>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: Into<ParamKey>, V: Into<ParamValue>>(
        &mut self,
        key: K,
        value: V,
    ) -> Option<ParamValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &ParamKey) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<&MatchParams> for BuildParams {
    fn from(params: &MatchParams) -> Self {
        params
            .iter()
            .filter_map(|(key, value)| value.map(|value| (key.clone(), value.clone())))
            .collect()
    }
}

impl<K: Into<ParamKey>, V: Into<ParamValue>> FromIterator<(K, V)> for BuildParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
