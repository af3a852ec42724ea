//! Item classification keys and bucket filters

use bitflags::bitflags;

bitflags! {
    /// Classification bits carried by every item
    ///
    /// An empty key is a visible, opaque shape.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ItemKey: u32 {
        /// Needs blending; drawn back-to-front
        const TRANSLUCENT = 1 << 0;
        /// Light volume rather than a shape
        const LIGHT = 1 << 1;
        /// Hidden; matched by no draw bucket
        const INVISIBLE = 1 << 2;
        /// Contributes to shadow maps
        const SHADOW_CASTER = 1 << 3;
    }
}

/// Selects the items whose key bits under `mask` equal `value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemFilter {
    /// Required bit values
    pub value: ItemKey,
    /// Bits that take part in the test
    pub mask: ItemKey,
}

impl ItemFilter {
    /// Create a filter from explicit value and mask
    pub const fn new(value: ItemKey, mask: ItemKey) -> Self {
        Self { value, mask }
    }

    /// Visible opaque shapes
    pub const fn opaque_shape() -> Self {
        Self::new(
            ItemKey::empty(),
            ItemKey::TRANSLUCENT.union(ItemKey::LIGHT).union(ItemKey::INVISIBLE),
        )
    }

    /// Visible translucent shapes
    pub const fn transparent_shape() -> Self {
        Self::new(
            ItemKey::TRANSLUCENT,
            ItemKey::TRANSLUCENT.union(ItemKey::LIGHT).union(ItemKey::INVISIBLE),
        )
    }

    /// Visible lights
    pub const fn light() -> Self {
        Self::new(ItemKey::LIGHT, ItemKey::LIGHT.union(ItemKey::INVISIBLE))
    }

    /// Every item, visible or not
    pub const fn everything() -> Self {
        Self::new(ItemKey::empty(), ItemKey::empty())
    }

    /// Does an item with this key belong in the bucket?
    pub fn test(&self, key: ItemKey) -> bool {
        (key & self.mask) == self.value
    }
}
