//! Per-element attribute dictionaries kept parallel to a group's geometry.
//!
//! An [`AttributeStore`] maps an element index to a key → value dictionary.
//! A missing entry simply means "no attributes". Stores are immutable values;
//! every operation returns a new store and shares untouched dictionaries with
//! the one it came from. Batches of edits go through an
//! [`AttributeStoreBuilder`], which is frozen once the batch is done.

use crate::errors::GroupError;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

/// The attributes of a single element, e.g. `{"fill": "red"}`.
pub type Attributes<V> = BTreeMap<String, V>;

type Entries<V> = BTreeMap<usize, Arc<Attributes<V>>>;

/// Immutable sparse map from element index to [`Attributes`].
#[derive(Clone, Debug)]
pub struct AttributeStore<V: Clone + Debug + Send + Sync> {
    entries: Arc<Entries<V>>,
}

impl<V: Clone + Debug + Send + Sync> Default for AttributeStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Debug + Send + Sync + PartialEq> PartialEq for AttributeStore<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Clone + Debug + Send + Sync> AttributeStore<V> {
    /// A store without any attributes.
    pub fn new() -> Self {
        AttributeStore {
            entries: Arc::new(BTreeMap::new()),
        }
    }

    /// Number of indices that carry a dictionary.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy of the attributes of `index`; empty if it has none.
    pub fn get(&self, index: usize) -> Attributes<V> {
        self.lookup(index).cloned().unwrap_or_default()
    }

    /// Borrow the attributes of `index`, if it has any.
    pub fn lookup(&self, index: usize) -> Option<&Attributes<V>> {
        self.entries.get(&index).map(|a| a.as_ref())
    }

    pub(crate) fn shared(&self, index: usize) -> Option<Arc<Attributes<V>>> {
        self.entries.get(&index).cloned()
    }

    /// Iterate `(index, attributes)` in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Attributes<V>)> {
        self.entries.iter().map(|(i, a)| (*i, a.as_ref()))
    }

    /// Largest index carrying a dictionary.
    pub fn max_index(&self) -> Option<usize> {
        self.entries.keys().next_back().copied()
    }

    /// Returns a store where `key` of `index` is `value`. An existing value is overwritten.
    pub fn set(&self, index: usize, key: impl Into<String>, value: V) -> Self {
        let mut builder = self.to_builder();
        builder.set(index, key, value);
        builder.build()
    }

    /// Returns a store without any attributes for `index`.
    pub fn remove(&self, index: usize) -> Self {
        if !self.entries.contains_key(&index) {
            return self.clone();
        }
        let mut builder = self.to_builder();
        builder.remove(index);
        builder.build()
    }

    /// Moves the dictionary at `from` to `to`.
    ///
    /// Nothing happens when `from` has no attributes. Fails if both indices carry one.
    pub fn move_index(&self, from: usize, to: usize) -> Result<Self, GroupError> {
        if !self.entries.contains_key(&from) || from == to {
            return Ok(self.clone());
        }
        let mut builder = self.to_builder();
        builder.move_index(from, to)?;
        Ok(builder.build())
    }

    /// Returns a store with every index shifted up by `offset`.
    pub fn offset(&self, offset: usize) -> Self {
        if offset == 0 {
            return self.clone();
        }
        AttributeStore {
            entries: Arc::new(
                self.entries
                    .iter()
                    .map(|(i, a)| (i + offset, a.clone()))
                    .collect(),
            ),
        }
    }

    /// Combines `self` with `other`, whose indices are shifted by `offset` first.
    ///
    /// Fails with [`GroupError::IndexCollision`] if a shifted index of `other`
    /// is already present in `self`.
    pub fn merge_disjoint(&self, other: &Self, offset: usize) -> Result<Self, GroupError> {
        if other.is_empty() {
            return Ok(self.clone());
        }
        let mut builder = self.to_builder();
        builder.merge_disjoint(other, offset)?;
        Ok(builder.build())
    }

    /// Merges every dictionary into one, visiting indices in ascending order;
    /// on a key collision the higher index wins.
    pub fn fold_all(&self) -> Attributes<V> {
        let mut merged = Attributes::new();
        for attributes in self.entries.values() {
            merged.extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// A store holding only the attributes of `index`, renumbered to 0.
    pub fn extract(&self, index: usize) -> Self {
        let mut builder = AttributeStoreBuilder::new();
        if let Some(attributes) = self.shared(index) {
            builder.insert_shared(0, attributes);
        }
        builder.build()
    }

    /// Starts a batch of edits on top of this store.
    pub fn to_builder(&self) -> AttributeStoreBuilder<V> {
        AttributeStoreBuilder {
            entries: Entries::clone(&self.entries),
        }
    }
}

/// Mutable companion of [`AttributeStore`] used while one structural operation runs.
///
/// Dictionaries are shared with the store the builder started from and only
/// copied when one of them is written to.
#[derive(Clone, Debug)]
pub struct AttributeStoreBuilder<V: Clone + Debug + Send + Sync> {
    entries: Entries<V>,
}

impl<V: Clone + Debug + Send + Sync> Default for AttributeStoreBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Debug + Send + Sync> AttributeStoreBuilder<V> {
    pub fn new() -> Self {
        AttributeStoreBuilder {
            entries: BTreeMap::new(),
        }
    }

    /// Sets a single key of `index`, overwriting any previous value.
    pub fn set(&mut self, index: usize, key: impl Into<String>, value: V) -> &mut Self {
        let attributes = self.entries.entry(index).or_default();
        Arc::make_mut(attributes).insert(key.into(), value);
        self
    }

    /// Merges `attributes` into those of `index`; incoming keys win.
    pub fn extend(&mut self, index: usize, attributes: &Attributes<V>) -> &mut Self {
        if attributes.is_empty() {
            return self;
        }
        let entry = self.entries.entry(index).or_default();
        Arc::make_mut(entry).extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Replaces the dictionary of `index` with a shared one.
    pub(crate) fn insert_shared(&mut self, index: usize, attributes: Arc<Attributes<V>>) -> &mut Self {
        if attributes.is_empty() {
            self.entries.remove(&index);
        } else {
            self.entries.insert(index, attributes);
        }
        self
    }

    pub fn remove(&mut self, index: usize) -> &mut Self {
        self.entries.remove(&index);
        self
    }

    pub fn move_index(&mut self, from: usize, to: usize) -> Result<&mut Self, GroupError> {
        if from == to || !self.entries.contains_key(&from) {
            return Ok(self);
        }
        if self.entries.contains_key(&to) {
            return Err(GroupError::IndexCollision { index: to });
        }
        if let Some(attributes) = self.entries.remove(&from) {
            self.entries.insert(to, attributes);
        }
        Ok(self)
    }

    pub fn merge_disjoint(
        &mut self,
        other: &AttributeStore<V>,
        offset: usize,
    ) -> Result<&mut Self, GroupError> {
        for (index, attributes) in other.entries.iter() {
            let target = index + offset;
            if self.entries.contains_key(&target) {
                return Err(GroupError::IndexCollision { index: target });
            }
            self.entries.insert(target, attributes.clone());
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the batch into an immutable store.
    pub fn build(self) -> AttributeStore<V> {
        AttributeStore {
            entries: Arc::new(self.entries),
        }
    }
}
