//! Arena storage for items with per-filter buckets

use std::collections::HashMap;

use log::trace;
use slotmap::{new_key_type, SlotMap};

use crate::scene::{Item, ItemFilter, SceneError};

new_key_type! {
    /// Stable identity of an item within a [`Scene`]
    pub struct ItemId;
}

/// Item arena plus the master bucket map
///
/// The store owns classification: an item lands in every bucket whose
/// filter accepts its key at insertion time.
#[derive(Debug)]
pub struct Scene {
    items: SlotMap<ItemId, Item>,
    master_bucket: HashMap<ItemFilter, Vec<ItemId>>,
}

impl Scene {
    /// Create a scene with the opaque, transparent and light buckets registered
    pub fn new() -> Self {
        let mut scene = Self::empty();
        scene.register_bucket(ItemFilter::opaque_shape());
        scene.register_bucket(ItemFilter::transparent_shape());
        scene.register_bucket(ItemFilter::light());
        scene
    }

    /// Create a scene with no buckets at all
    pub fn empty() -> Self {
        Self {
            items: SlotMap::with_key(),
            master_bucket: HashMap::new(),
        }
    }

    /// Register a bucket and classify the items already present
    pub fn register_bucket(&mut self, filter: ItemFilter) {
        if self.master_bucket.contains_key(&filter) {
            return;
        }

        let ids: Vec<ItemId> = self
            .items
            .iter()
            .filter(|(_, item)| filter.test(item.key()))
            .map(|(id, _)| id)
            .collect();
        trace!("Registered bucket {:?} with {} items", filter, ids.len());
        self.master_bucket.insert(filter, ids);
    }

    /// Add an item and classify it into every matching bucket
    pub fn insert(&mut self, item: Item) -> ItemId {
        let key = item.key();
        let id = self.items.insert(item);

        for (filter, ids) in &mut self.master_bucket {
            if filter.test(key) {
                ids.push(id);
            }
        }
        id
    }

    /// Remove an item from the arena and all buckets
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let item = self.items.remove(id)?;
        for ids in self.master_bucket.values_mut() {
            ids.retain(|other| *other != id);
        }
        Some(item)
    }

    /// Ids classified under a filter, in insertion order
    pub fn bucket(&self, filter: ItemFilter) -> Result<&[ItemId], SceneError> {
        self.master_bucket
            .get(&filter)
            .map(Vec::as_slice)
            .ok_or(SceneError::BucketNotFound(filter))
    }

    /// Look up a live item
    pub fn item(&self, id: ItemId) -> Result<&Item, SceneError> {
        self.items.get(id).ok_or(SceneError::ItemNotFound(id))
    }

    /// Number of live items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the scene holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::{ItemKey, LightItem, MeshHandle, MeshItem};
    use crate::spatial::AABox;

    fn mesh(key: ItemKey) -> Item {
        Item::new(key, MeshItem::new(MeshHandle(0), AABox::null()))
    }

    #[test]
    fn test_insert_classifies_into_buckets() {
        let mut scene = Scene::new();
        let wall = scene.insert(mesh(ItemKey::empty()));
        let glass = scene.insert(mesh(ItemKey::TRANSLUCENT));
        let lamp = scene.insert(Item::new(ItemKey::LIGHT, LightItem::new(Vec3::zeros(), 1.0, Vec3::repeat(1.0))));
        scene.insert(mesh(ItemKey::INVISIBLE));

        assert_eq!(scene.len(), 4);
        assert_eq!(scene.bucket(ItemFilter::opaque_shape()).unwrap(), &[wall]);
        assert_eq!(scene.bucket(ItemFilter::transparent_shape()).unwrap(), &[glass]);
        assert_eq!(scene.bucket(ItemFilter::light()).unwrap(), &[lamp]);
    }

    #[test]
    fn test_unknown_bucket_is_lookup_error() {
        let scene = Scene::new();
        let err = scene.bucket(ItemFilter::everything()).unwrap_err();
        assert_eq!(err, SceneError::BucketNotFound(ItemFilter::everything()));
    }

    #[test]
    fn test_register_bucket_backfills() {
        let mut scene = Scene::empty();
        scene.insert(mesh(ItemKey::empty()));
        scene.insert(mesh(ItemKey::INVISIBLE));

        scene.register_bucket(ItemFilter::everything());
        assert_eq!(scene.bucket(ItemFilter::everything()).unwrap().len(), 2);
    }

    #[test]
    fn test_remove_clears_buckets() {
        let mut scene = Scene::new();
        let id = scene.insert(mesh(ItemKey::empty()));

        assert!(scene.remove(id).is_some());
        assert!(scene.bucket(ItemFilter::opaque_shape()).unwrap().is_empty());
        assert_eq!(scene.item(id).unwrap_err(), SceneError::ItemNotFound(id));
        assert!(scene.remove(id).is_none());
        assert!(scene.is_empty());
    }
}
