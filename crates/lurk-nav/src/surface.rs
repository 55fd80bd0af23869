//! Walkable-surface representation and queries.
//!
//! # Data model
//!
//! The walkable surface is a union of axis-aligned rectangular **islands** in
//! the XZ plane, each at a fixed height, minus a set of rectangular **carve
//! regions** (obstacle footprints, doorways).  Carves can be toggled at
//! runtime — a closing door enables its carve, an opening door disables it —
//! which is the cheap stand-in for navmesh obstacle carving.
//!
//! # Normal convention
//!
//! [`closest_edge`][WalkableSurface::closest_edge] returns the boundary
//! normal pointing *out of the blocked region into walkable space*:
//!
//! - at an island's outer perimeter the normal points inward (the exterior is
//!   blocked);
//! - at a carve boundary the normal points away from the carve.
//!
//! Under this convention, a point tucked behind a carved obstacle has an edge
//! normal facing away from anything on the obstacle's far side, which is
//! exactly what the concealment facing test keys on.

use lurk_core::{CarveId, Vec3};

// ── Rect ─────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in the XZ plane at height `y`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min_x: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_z: f32,
    pub y:     f32,
}

impl Rect {
    /// Construct from two opposite corners (any order) at height `y`.
    pub fn new(a_x: f32, a_z: f32, b_x: f32, b_z: f32, y: f32) -> Self {
        Self {
            min_x: a_x.min(b_x),
            min_z: a_z.min(b_z),
            max_x: a_x.max(b_x),
            max_z: a_z.max(b_z),
            y,
        }
    }

    /// Construct from a center point and full XZ extents.
    pub fn centered(center: Vec3, size_x: f32, size_z: f32) -> Self {
        Self::new(
            center.x - size_x * 0.5,
            center.z - size_z * 0.5,
            center.x + size_x * 0.5,
            center.z + size_z * 0.5,
            center.y,
        )
    }

    /// `true` if `p`'s XZ projection lies inside (boundary exclusive).
    #[inline]
    pub fn contains_xz(&self, p: Vec3) -> bool {
        p.x > self.min_x && p.x < self.max_x && p.z > self.min_z && p.z < self.max_z
    }

    /// Clamp `p`'s XZ projection onto the rectangle, at the rect's height.
    #[inline]
    pub fn clamp_xz(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min_x, self.max_x),
            self.y,
            p.z.clamp(self.min_z, self.max_z),
        )
    }

    /// `true` if the XZ footprints of `self` and `other` overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_z <= other.max_z
            && self.max_z >= other.min_z
    }
}

// ── Query trait ───────────────────────────────────────────────────────────────

/// A boundary point on the walkable surface and its normal (see the module
/// docs for the normal convention).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeHit {
    pub position: Vec3,
    pub normal:   Vec3,
}

/// Read-only navigable-surface queries.
///
/// Implementations must be safe for concurrent reads from multiple agents;
/// both methods take `&self` and the trait requires `Send + Sync`.
pub trait SurfaceQuery: Send + Sync {
    /// Nearest walkable point within `max_distance` of `point`, if any.
    fn sample_near(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;

    /// Nearest surface boundary point and its normal, or `None` when the
    /// surface has no geometry to answer from.
    fn closest_edge(&self, point: Vec3) -> Option<EdgeHit>;
}

// ── WalkableSurface ───────────────────────────────────────────────────────────

struct Carve {
    rect:    Rect,
    enabled: bool,
}

/// Rectangle-island walkable surface with toggleable carve regions.
///
/// Build with [`WalkableSurfaceBuilder`].  Carve regions are assumed to lie
/// inside an island; a carve spanning an entire island makes that island
/// unsampleable, which is reported as a query miss rather than an error.
pub struct WalkableSurface {
    islands: Vec<Rect>,
    carves:  Vec<Carve>,
}

impl WalkableSurface {
    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// Enable or disable a carve region (e.g. a door closing or opening).
    ///
    /// Out-of-range ids are ignored; the surface cannot be broken by a stale
    /// handle.
    pub fn set_carve_enabled(&mut self, id: CarveId, enabled: bool) {
        if let Some(carve) = self.carves.get_mut(id.index()) {
            carve.enabled = enabled;
        }
    }

    /// `true` if the carve region is currently blocking.
    pub fn carve_enabled(&self, id: CarveId) -> bool {
        self.carves.get(id.index()).is_some_and(|c| c.enabled)
    }

    fn active_carves(&self) -> impl Iterator<Item = &Rect> {
        self.carves.iter().filter(|c| c.enabled).map(|c| &c.rect)
    }

    fn in_active_carve(&self, p: Vec3) -> bool {
        self.active_carves().any(|c| c.contains_xz(p))
    }

    /// Move `p` to the nearest boundary of `carve` along one axis.
    fn push_to_carve_edge(carve: &Rect, p: Vec3) -> Vec3 {
        let left   = p.x - carve.min_x;
        let right  = carve.max_x - p.x;
        let near   = p.z - carve.min_z;
        let far    = carve.max_z - p.z;
        let min    = left.min(right).min(near).min(far);

        let mut out = p;
        if min == left {
            out.x = carve.min_x;
        } else if min == right {
            out.x = carve.max_x;
        } else if min == near {
            out.z = carve.min_z;
        } else {
            out.z = carve.max_z;
        }
        out
    }
}

impl SurfaceQuery for WalkableSurface {
    fn sample_near(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        let mut best: Option<(f32, Vec3)> = None;

        for island in &self.islands {
            let mut candidate = island.clamp_xz(point);

            // A point landing inside an active carve is not walkable; try the
            // nearest carve boundary instead.
            if let Some(carve) = self
                .active_carves()
                .find(|c| c.contains_xz(candidate))
            {
                candidate = island.clamp_xz(Self::push_to_carve_edge(carve, candidate));
                if self.in_active_carve(candidate) {
                    continue;
                }
            }

            let dist = point.distance(candidate);
            if dist <= max_distance && best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, candidate));
            }
        }

        best.map(|(_, p)| p)
    }

    fn closest_edge(&self, point: Vec3) -> Option<EdgeHit> {
        // Answer from the island nearest to the query point.
        let island = self
            .islands
            .iter()
            .min_by(|a, b| {
                let da = point.distance(a.clamp_xz(point));
                let db = point.distance(b.clamp_xz(point));
                da.total_cmp(&db)
            })?;

        let mut best: Option<(f32, EdgeHit)> = None;
        let mut consider = |hit: EdgeHit| {
            let dist = point.distance(hit.position);
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, hit));
            }
        };

        // Island perimeter: normals point inward (exterior is blocked).
        for (position, normal) in rect_side_hits(island, point, true) {
            consider(EdgeHit { position, normal });
        }

        // Active carve boundaries: normals point away from the carve.
        for carve in self.active_carves() {
            if !carve.overlaps(island) {
                continue;
            }
            for (position, normal) in rect_side_hits(carve, point, false) {
                // Carve rects may carry their own height; edges live on the
                // island's surface.
                consider(EdgeHit {
                    position: Vec3::new(position.x, island.y, position.z),
                    normal,
                });
            }
        }

        best.map(|(_, hit)| hit)
    }
}

/// Nearest point on each of the rect's four sides, with the side normal.
///
/// `inward = true` flips the normals to point into the rectangle (used for
/// island perimeters); `false` leaves them pointing away from it (carves).
fn rect_side_hits(rect: &Rect, p: Vec3, inward: bool) -> [(Vec3, Vec3); 4] {
    let flip = if inward { -1.0 } else { 1.0 };
    let cz = p.z.clamp(rect.min_z, rect.max_z);
    let cx = p.x.clamp(rect.min_x, rect.max_x);
    [
        // x = min_x side, outward normal -X
        (Vec3::new(rect.min_x, rect.y, cz), Vec3::new(-flip, 0.0, 0.0)),
        // x = max_x side, outward normal +X
        (Vec3::new(rect.max_x, rect.y, cz), Vec3::new(flip, 0.0, 0.0)),
        // z = min_z side, outward normal -Z
        (Vec3::new(cx, rect.y, rect.min_z), Vec3::new(0.0, 0.0, -flip)),
        // z = max_z side, outward normal +Z
        (Vec3::new(cx, rect.y, rect.max_z), Vec3::new(0.0, 0.0, flip)),
    ]
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Construct a [`WalkableSurface`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use lurk_core::Vec3;
/// use lurk_nav::{Rect, SurfaceQuery, WalkableSurfaceBuilder};
///
/// let mut b = WalkableSurfaceBuilder::new();
/// b.add_island(Rect::new(0.0, 0.0, 20.0, 20.0, 0.0));
/// let crate_footprint = b.add_carve(Rect::new(9.0, 9.0, 11.0, 11.0, 0.0));
/// let surface = b.build();
/// assert!(surface.carve_enabled(crate_footprint));
/// assert!(surface.sample_near(Vec3::new(10.0, 0.0, 10.0), 2.0).is_some());
/// ```
#[derive(Default)]
pub struct WalkableSurfaceBuilder {
    islands: Vec<Rect>,
    carves:  Vec<Carve>,
}

impl WalkableSurfaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a walkable island.
    pub fn add_island(&mut self, rect: Rect) -> &mut Self {
        self.islands.push(rect);
        self
    }

    /// Add a carve region, enabled (blocking) by default, and return its id.
    pub fn add_carve(&mut self, rect: Rect) -> CarveId {
        let id = CarveId(self.carves.len() as u32);
        self.carves.push(Carve { rect, enabled: true });
        id
    }

    pub fn build(self) -> WalkableSurface {
        WalkableSurface {
            islands: self.islands,
            carves:  self.carves,
        }
    }
}
