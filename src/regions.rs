//! Border-connected region labeling and thickness classification.
//!
//! Every background-like pixel on the outer boundary seeds a breadth-first
//! flood fill over 4-connected background-like neighbours. Each maximal
//! component found this way gets its own id. Pixels that cannot be reached
//! from the boundary stay unlabeled and are never removal candidates.

use std::collections::VecDeque;

use crate::background::BackgroundMask;
use crate::crop::Bounds;

const UNLABELED: usize = usize::MAX;

/// One border-connected component of background-like pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Region identifier, unique within its [`RegionMap`].
    pub id: usize,
    /// Bounding box of the member pixels.
    pub bounds: Bounds,
    /// Number of member pixels.
    pub area: usize,
}

impl Region {
    /// Horizontal span of the bounding box.
    #[must_use]
    pub fn horizontal_span(&self) -> u32 {
        self.bounds.width()
    }

    /// Vertical span of the bounding box.
    #[must_use]
    pub fn vertical_span(&self) -> u32 {
        self.bounds.height()
    }

    /// A region is thin when either span is at most `min_thickness`.
    ///
    /// The whole component's bounding box is measured, so a thin strip joined
    /// to a thick blob is judged by the combined extent.
    #[must_use]
    pub fn is_thin(&self, min_thickness: u32) -> bool {
        self.horizontal_span() <= min_thickness || self.vertical_span() <= min_thickness
    }
}

/// Label grid plus per-region extents.
#[derive(Debug, Clone)]
pub struct RegionMap {
    width: u32,
    height: u32,
    labels: Vec<usize>,
    regions: Vec<Region>,
}

impl RegionMap {
    /// Label all border-reachable background-like components of `mask`.
    #[must_use]
    pub fn label(mask: &BackgroundMask) -> Self {
        let (w, h) = (mask.width(), mask.height());
        let mut map = Self {
            width: w,
            height: h,
            labels: vec![UNLABELED; w as usize * h as usize],
            regions: Vec::new(),
        };
        if w == 0 || h == 0 {
            return map;
        }

        let mut queue = VecDeque::new();
        for x in 0..w {
            map.fill_from(mask, x, 0, &mut queue);
            map.fill_from(mask, x, h - 1, &mut queue);
        }
        for y in 0..h {
            map.fill_from(mask, 0, y, &mut queue);
            map.fill_from(mask, w - 1, y, &mut queue);
        }
        map
    }

    /// Flood the component containing seed `(x, y)` if it is background-like
    /// and not yet labeled.
    fn fill_from(
        &mut self,
        mask: &BackgroundMask,
        x: u32,
        y: u32,
        queue: &mut VecDeque<(u32, u32)>,
    ) {
        if !mask.get(x, y) || self.labels[mask.index(x, y)] != UNLABELED {
            return;
        }
        // At most one region per pixel, so ids stay below `UNLABELED`.
        let id = self.regions.len();
        let mut bounds = Bounds::point(x, y);
        let mut area = 0_usize;

        self.labels[mask.index(x, y)] = id;
        queue.push_back((x, y));
        while let Some((cx, cy)) = queue.pop_front() {
            bounds.include(cx, cy);
            area += 1;

            let neighbours = [
                (cx.checked_sub(1), Some(cy)),
                (cx.checked_add(1), Some(cy)),
                (Some(cx), cy.checked_sub(1)),
                (Some(cx), cy.checked_add(1)),
            ];
            for (nx, ny) in neighbours {
                let (Some(nx), Some(ny)) = (nx, ny) else {
                    continue;
                };
                if !mask.get(nx, ny) {
                    continue;
                }
                let idx = mask.index(nx, ny);
                if self.labels[idx] == UNLABELED {
                    self.labels[idx] = id;
                    queue.push_back((nx, ny));
                }
            }
        }

        self.regions.push(Region { id, bounds, area });
    }

    /// Grid width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All labeled regions, indexed by id.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region id at `(x, y)`, or `None` for unlabeled or out-of-range pixels.
    #[must_use]
    pub fn label_at(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let label = self.labels[y as usize * self.width as usize + x as usize];
        (label != UNLABELED).then_some(label)
    }

    /// Number of labeled pixels.
    #[must_use]
    pub fn labeled_pixels(&self) -> usize {
        self.regions.iter().map(|r| r.area).sum()
    }

    /// Iterate `(x, y, label)` in row-major order over labeled pixels only.
    pub fn iter_labeled(&self) -> impl Iterator<Item = (u32, u32, usize)> + '_ {
        let w = self.width as usize;
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l != UNLABELED)
            .map(move |(i, &l)| {
                #[allow(clippy::cast_possible_truncation)]
                let (x, y) = ((i % w) as u32, (i / w) as u32);
                (x, y, l)
            })
    }

    /// Per-region removal flags: `flags[id]` is true when the region is thin.
    #[must_use]
    pub fn thin_regions(&self, min_thickness: u32) -> Vec<bool> {
        self.regions
            .iter()
            .map(|r| r.is_thin(min_thickness))
            .collect()
    }
}
