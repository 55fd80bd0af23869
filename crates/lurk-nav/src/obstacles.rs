//! Spatial obstacle index and category filtering.
//!
//! # Data layout
//!
//! Obstacles are static descriptors (center, full extents, category bits)
//! bulk-loaded into an R-tree (via `rstar`).  Queries intersect the R-tree
//! with the axis-aligned bounds of the search sphere; the `queryNearby`
//! contract promises "nearby, unordered, at most `cap`" and nothing more, so
//! the box approximation is acceptable and cheap.
//!
//! The index also answers segment occlusion tests (slab test against each
//! obstacle's bounds), used by sight sensors for line-of-sight checks.

use rstar::{RTree, RTreeObject, AABB};

use lurk_core::Vec3;

// ── Category mask ─────────────────────────────────────────────────────────────

/// Bit set of obstacle categories (layer mask).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryMask(pub u32);

impl CategoryMask {
    pub const NONE: CategoryMask = CategoryMask(0);
    pub const ALL:  CategoryMask = CategoryMask(u32::MAX);

    /// Mask with only bit `n` set.
    pub const fn bit(n: u32) -> CategoryMask {
        CategoryMask(1 << n)
    }

    /// `true` if the two masks share any category.
    #[inline]
    pub fn intersects(self, other: CategoryMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for CategoryMask {
    type Output = CategoryMask;
    fn bitor(self, rhs: CategoryMask) -> CategoryMask {
        CategoryMask(self.0 | rhs.0)
    }
}

// ── Query trait ───────────────────────────────────────────────────────────────

/// An obstacle descriptor returned by [`ObstacleQuery::query_nearby`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObstacleHit {
    /// Center of the obstacle's bounds.
    pub position: Vec3,
    /// Full bounding extents (width, height, depth).
    pub size:     Vec3,
    /// Category bits the obstacle belongs to.
    pub category: CategoryMask,
}

/// Read-only spatial obstacle queries.
///
/// Implementations must be safe for concurrent reads from multiple agents.
pub trait ObstacleQuery: Send + Sync {
    /// Up to `cap` obstacles near `center` (within `radius`, box-approximate)
    /// whose category intersects `mask`.  No ordering guarantee.
    fn query_nearby(
        &self,
        center: Vec3,
        radius: f32,
        mask:   CategoryMask,
        cap:    usize,
    ) -> Vec<ObstacleHit>;
}

/// Segment occlusion tests, used by sight sensors for line-of-sight checks.
///
/// Split from [`ObstacleQuery`] so sensors can be tested against a scripted
/// occluder without a full obstacle index.
pub trait Occluder: Send + Sync {
    /// `true` if the segment `a → b` passes through blocking geometry whose
    /// category intersects `mask`.
    fn segment_blocked(&self, a: Vec3, b: Vec3, mask: CategoryMask) -> bool;
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

struct ObstacleEntry {
    min: [f32; 3],
    max: [f32; 3],
    hit: ObstacleHit,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

// ── ObstacleIndex ─────────────────────────────────────────────────────────────

/// Static R-tree over obstacle bounds.
///
/// Do not construct directly; use [`ObstacleIndexBuilder`].
pub struct ObstacleIndex {
    tree:  RTree<ObstacleEntry>,
    count: usize,
}

impl ObstacleIndex {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

}

impl Occluder for ObstacleIndex {
    fn segment_blocked(&self, a: Vec3, b: Vec3, mask: CategoryMask) -> bool {
        let lo = a.min(b).to_array();
        let hi = a.max(b).to_array();
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_corners(lo, hi))
            .any(|e| {
                e.hit.category.intersects(mask)
                    && segment_hits_aabb(a, b, Vec3::from(e.min), Vec3::from(e.max))
            })
    }
}

impl ObstacleQuery for ObstacleIndex {
    fn query_nearby(
        &self,
        center: Vec3,
        radius: f32,
        mask:   CategoryMask,
        cap:    usize,
    ) -> Vec<ObstacleHit> {
        let lo = (center - Vec3::splat(radius)).to_array();
        let hi = (center + Vec3::splat(radius)).to_array();
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_corners(lo, hi))
            .filter(|e| e.hit.category.intersects(mask))
            .take(cap)
            .map(|e| e.hit)
            .collect()
    }
}

/// Slab test: does the segment `a → b` intersect the box `[min, max]`?
fn segment_hits_aabb(a: Vec3, b: Vec3, min: Vec3, max: Vec3) -> bool {
    let a = a.to_array();
    let d = (b - Vec3::from_array(a)).to_array();
    let min = min.to_array();
    let max = max.to_array();

    let mut t_min = 0.0_f32;
    let mut t_max = 1.0_f32;

    for axis in 0..3 {
        if d[axis].abs() < f32::EPSILON {
            if a[axis] < min[axis] || a[axis] > max[axis] {
                return false;
            }
        } else {
            let inv = 1.0 / d[axis];
            let mut t1 = (min[axis] - a[axis]) * inv;
            let mut t2 = (max[axis] - a[axis]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return false;
            }
        }
    }
    true
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Collect obstacles, then bulk-load the R-tree with [`build`](Self::build).
///
/// # Example
///
/// ```
/// use lurk_core::Vec3;
/// use lurk_nav::{CategoryMask, ObstacleIndexBuilder, ObstacleQuery};
///
/// const HIDABLE: CategoryMask = CategoryMask::bit(0);
///
/// let mut b = ObstacleIndexBuilder::new();
/// b.add_obstacle(Vec3::new(5.0, 1.0, 5.0), Vec3::new(2.0, 2.0, 2.0), HIDABLE);
/// let index = b.build();
/// let hits = index.query_nearby(Vec3::ZERO, 10.0, HIDABLE, 10);
/// assert_eq!(hits.len(), 1);
/// ```
#[derive(Default)]
pub struct ObstacleIndexBuilder {
    entries: Vec<ObstacleEntry>,
}

impl ObstacleIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an obstacle centered at `position` with full extents `size`.
    pub fn add_obstacle(&mut self, position: Vec3, size: Vec3, category: CategoryMask) -> &mut Self {
        let half = size * 0.5;
        self.entries.push(ObstacleEntry {
            min: (position - half).to_array(),
            max: (position + half).to_array(),
            hit: ObstacleHit { position, size, category },
        });
        self
    }

    /// Consume the builder and bulk-load the R-tree (O(n log n)).
    pub fn build(self) -> ObstacleIndex {
        let count = self.entries.len();
        ObstacleIndex {
            tree: RTree::bulk_load(self.entries),
            count,
        }
    }
}
