use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 4;
const MAX_DEPTH: usize = 16;

/// Square cell given by its top-left corner and side length.
#[derive(Clone, Copy, Debug)]
pub(super) struct QuadBounds {
    pub(super) min: Vec2,
    pub(super) size: f32,
}

impl QuadBounds {
    /// Square around `points`, padded by one unit on every side.
    fn enclosing(points: &[Vec2]) -> Option<Self> {
        if !points.iter().all(|point| point.is_finite()) {
            return None;
        }
        let (&first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((first, first), |(min, max), &point| (min.min(point), max.max(point)));

        Some(Self {
            min: min - Vec2::splat(1.0),
            size: (max - min).max_elem().max(1.0) + 2.0,
        })
    }

    fn center(self) -> Vec2 {
        self.min + Vec2::splat(self.size * 0.5)
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        let max = self.min + Vec2::splat(self.size);
        point.x >= self.min.x && point.y >= self.min.y && point.x <= max.x && point.y <= max.y
    }

    /// Quadrant index: bit 0 set for the right half, bit 1 for the lower half.
    fn quadrant_of(self, point: Vec2) -> usize {
        let center = self.center();
        usize::from(point.x >= center.x) | (usize::from(point.y >= center.y) << 1)
    }

    fn quadrant(self, quadrant: usize) -> Self {
        let half = self.size * 0.5;
        let column = (quadrant & 1) as f32;
        let row = (quadrant >> 1) as f32;
        Self {
            min: self.min + vec2(column * half, row * half),
            size: half,
        }
    }

    pub(super) fn side_length(self) -> f32 {
        self.size
    }
}

/// Barnes-Hut cell. Internal cells aggregate the mass of everything below
/// them; leaves keep the indices of their bodies.
pub(super) struct QuadNode {
    pub(super) bounds: QuadBounds,
    pub(super) center_of_mass: Vec2,
    pub(super) mass: f32,
    pub(super) indices: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    pub(super) fn build(positions: &[Vec2], masses: &[f32]) -> Option<Self> {
        let bounds = QuadBounds::enclosing(positions)?;
        let indices = (0..positions.len()).collect();
        Some(Self::subdivide(bounds, indices, positions, masses, 0))
    }

    fn subdivide(
        bounds: QuadBounds,
        indices: Vec<usize>,
        positions: &[Vec2],
        masses: &[f32],
        depth: usize,
    ) -> Self {
        let mass: f32 = indices.iter().map(|&index| masses[index]).sum();
        let weighted = indices
            .iter()
            .fold(Vec2::ZERO, |sum, &index| sum + positions[index] * masses[index]);
        let center_of_mass = if mass > 0.0 {
            weighted / mass
        } else {
            bounds.center()
        };

        if depth >= MAX_DEPTH || indices.len() <= LEAF_CAPACITY {
            return Self {
                bounds,
                center_of_mass,
                mass,
                indices,
                children: Default::default(),
            };
        }

        let mut buckets: [Vec<usize>; 4] = Default::default();
        for index in indices {
            buckets[bounds.quadrant_of(positions[index])].push(index);
        }
        let children = std::array::from_fn(|quadrant| {
            let bucket = std::mem::take(&mut buckets[quadrant]);
            (!bucket.is_empty()).then(|| {
                Box::new(Self::subdivide(
                    bounds.quadrant(quadrant),
                    bucket,
                    positions,
                    masses,
                    depth + 1,
                ))
            })
        });

        Self {
            bounds,
            center_of_mass,
            mass,
            indices: Vec::new(),
            children,
        }
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}
