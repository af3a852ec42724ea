//! Per-frame render statistics

/// Counters for one item category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemDetails {
    /// Items that entered a cull stage
    pub considered: usize,
    /// Items rejected by the frustum test
    pub out_of_view: usize,
    /// Items rejected by the level-of-detail predicate
    pub too_small: usize,
    /// Items that survived culling (not the number actually drawn)
    pub rendered: usize,
}

impl ItemDetails {
    /// Add another set of counters to this one
    pub fn accumulate(&mut self, other: &Self) {
        self.considered += other.considered;
        self.out_of_view += other.out_of_view;
        self.too_small += other.too_small;
        self.rendered += other.rendered;
    }
}

/// Statistics bucket selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailsCategory {
    /// Opaque shapes
    Opaque,
    /// Translucent shapes
    Translucent,
    /// Lights culled outside the light path (the light path itself reports to `Other`)
    Light,
    /// Everything else
    Other,
}

impl DetailsCategory {
    /// All categories in display order
    pub const ALL: [Self; 4] = [Self::Opaque, Self::Translucent, Self::Light, Self::Other];
}

/// Statistics for a whole frame, one bucket per category
///
/// Counters only grow during a frame. The frame owner calls [`reset`](Self::reset)
/// between frames; pipeline stages never do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderDetails {
    opaque: ItemDetails,
    translucent: ItemDetails,
    light: ItemDetails,
    other: ItemDetails,
}

impl RenderDetails {
    /// Read one category
    pub const fn bucket(&self, category: DetailsCategory) -> &ItemDetails {
        match category {
            DetailsCategory::Opaque => &self.opaque,
            DetailsCategory::Translucent => &self.translucent,
            DetailsCategory::Light => &self.light,
            DetailsCategory::Other => &self.other,
        }
    }

    /// Mutable access to one category, handed to the cull stage
    pub fn bucket_mut(&mut self, category: DetailsCategory) -> &mut ItemDetails {
        match category {
            DetailsCategory::Opaque => &mut self.opaque,
            DetailsCategory::Translucent => &mut self.translucent,
            DetailsCategory::Light => &mut self.light,
            DetailsCategory::Other => &mut self.other,
        }
    }

    /// Sum over all categories
    pub fn total(&self) -> ItemDetails {
        let mut total = ItemDetails::default();
        for category in DetailsCategory::ALL {
            total.accumulate(self.bucket(category));
        }
        total
    }

    /// Zero every counter
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
