use std::fmt::Debug;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::app::infrastructure::error::CollectionError;

/// An element with a stable identity that does not depend on its position.
pub trait Identified {
    type Id: PartialEq + Clone + Debug;

    fn id(&self) -> &Self::Id;
}

/// An element whose payload can be partially replaced.
/// Patches never carry the id, so applying one keeps ids unique.
pub trait Patchable {
    type Patch;

    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Ordered sequence of uniquely identified items. Position is the only
/// ranking signal.
///
/// Every mutation returns a new collection and leaves `self` untouched, so
/// callers can compare old and new values to decide whether anything changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> OrderedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn check_index(&self, index: usize) -> Result<(), CollectionError> {
        let len = self.items.len();
        if index < len {
            Ok(())
        } else {
            Err(CollectionError::IndexOutOfBounds { index, len })
        }
    }
}

impl<T: Identified> OrderedCollection<T> {
    /// Build a collection from an initial sequence, rejecting duplicate ids.
    pub fn from_items(items: Vec<T>) -> Result<Self, CollectionError> {
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.id() == item.id()) {
                return Err(CollectionError::DuplicateId(format!("{:?}", item.id())));
            }
        }
        Ok(Self { items })
    }

    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &T::Id> {
        self.items.iter().map(|item| item.id())
    }

    fn require_position(&self, id: &T::Id) -> Result<usize, CollectionError> {
        self.position(id)
            .ok_or_else(|| CollectionError::NotFound(format!("{id:?}")))
    }
}

impl<T: Identified + Clone> OrderedCollection<T> {
    /// Add `item` at the end.
    pub fn append(&self, item: T) -> Result<Self, CollectionError> {
        if self.contains(item.id()) {
            return Err(CollectionError::DuplicateId(format!("{:?}", item.id())));
        }
        let mut items = self.items.clone();
        items.push(item);
        Ok(Self { items })
    }

    /// Remove the item at `source` and reinsert it at `destination` in the
    /// shortened sequence. Items in between shift by one; nothing is swapped.
    ///
    /// `destination == None` is a cancelled drag and returns an unchanged copy.
    /// Index 0 is a valid destination. Both indices must be in `0..=len-1`.
    pub fn move_item(&self, source: usize, destination: Option<usize>) -> Result<Self, CollectionError> {
        let Some(destination) = destination else {
            return Ok(self.clone());
        };

        self.check_index(source)?;
        // After removal the shortened sequence has `len - 1` items, so its last
        // insertion point is `len - 1`, the same bound as the source.
        self.check_index(destination)?;

        let mut items = self.items.clone();
        let moved = items.remove(source);
        items.insert(destination, moved);
        Ok(Self { items })
    }

    /// Apply `patch` to the item with `id`. Position and other items are unchanged.
    pub fn update_by_id(&self, id: &T::Id, patch: T::Patch) -> Result<Self, CollectionError>
    where
        T: Patchable,
    {
        let idx = self.require_position(id)?;
        let mut items = self.items.clone();
        items[idx].apply_patch(patch);
        debug_assert!(items[idx].id() == id, "patch must not change item identity");
        Ok(Self { items })
    }

    /// Remove the item with `id`; later items shift left. Unknown ids fail.
    pub fn remove_by_id(&self, id: &T::Id) -> Result<Self, CollectionError> {
        let idx = self.require_position(id)?;
        let mut items = self.items.clone();
        items.remove(idx);
        Ok(Self { items })
    }
}

impl<'a, T> IntoIterator for &'a OrderedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for OrderedCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for OrderedCollection<T>
where
    T: Deserialize<'de> + Identified,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::from_items(items).map_err(serde::de::Error::custom)
    }
}
