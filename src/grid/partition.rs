//! Uniform grid partitioning of a point set.

use std::fmt;

use crate::encoding::validate_grid_size;
use crate::problem::{Point, PointSet};
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Offset subtracted before binning so points on the minimum edge land in
/// cell 0 after clamping.
pub const EPSILON: f64 = 1e-9;

/// Grid cell coordinates: `column` is the x bin, `row` the y bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellCoord {
    pub column: usize,
    pub row: usize,
}

impl CellCoord {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Linear index `column * grid_size + row`.
    pub fn linear(self, grid_size: usize) -> usize {
        self.column * grid_size + self.row
    }

    /// Inverse of [`linear`](CellCoord::linear).
    pub fn from_linear(index: usize, grid_size: usize) -> Self {
        Self {
            column: index / grid_size,
            row: index % grid_size,
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell({}, {})", self.column, self.row)
    }
}

/// One grid cell with its member points.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    coord: CellCoord,
    members: Vec<usize>,
    centroid: Option<Point>,
}

impl GridCell {
    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Member point indices in ascending order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Mean of the members' coordinates; `None` for an empty cell.
    pub fn centroid(&self) -> Option<Point> {
        self.centroid
    }
}

/// Centroids of the non-empty cells, as a point set of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidSet {
    /// Centroids in ascending linear-index order.
    pub points: PointSet,
    /// `cells[i]` is the cell whose centroid is `points.point(i)`.
    pub cells: Vec<CellCoord>,
}

/// A partitioned point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    grid_size: usize,
    cells: Vec<GridCell>,
}

impl Grid {
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// All `grid_size²` cells, indexed by [`CellCoord::linear`].
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&GridCell> {
        if coord.column >= self.grid_size || coord.row >= self.grid_size {
            return None;
        }
        self.cells.get(coord.linear(self.grid_size))
    }

    pub fn non_empty_cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|c| !c.is_empty())
    }

    /// Reduced point set of non-empty cell centroids. Empty cells have no
    /// centroid and are left out.
    pub fn centroids(&self) -> CentroidSet {
        let (points, cells) = self
            .non_empty_cells()
            .filter_map(|cell| cell.centroid.map(|c| (c, cell.coord)))
            .unzip::<_, _, Vec<Point>, Vec<CellCoord>>();
        CentroidSet {
            points: PointSet::new(points),
            cells,
        }
    }
}

/// Buckets points into a uniform `grid_size × grid_size` grid over their
/// bounding box.
#[derive(Debug, Clone, Copy)]
pub struct GridPartitioner {
    grid_size: usize,
}

impl GridPartitioner {
    /// Fails with [`Error::InvalidGridSize`](crate::Error::InvalidGridSize)
    /// unless `grid_size` is even and at least 2.
    pub fn new(grid_size: usize) -> Result<Self> {
        validate_grid_size(grid_size)?;
        Ok(Self { grid_size })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn partition(&self, points: &PointSet) -> Grid {
        let g = self.grid_size;
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); g * g];
        let mut sums: Vec<(f64, f64)> = vec![(0.0, 0.0); g * g];

        if let Some(bounds) = Bounds::of(points) {
            for (i, p) in points.iter().enumerate() {
                let coord = CellCoord::new(
                    bin(p.x, bounds.min_x, bounds.max_x - bounds.min_x, g),
                    bin(p.y, bounds.min_y, bounds.max_y - bounds.min_y, g),
                );
                let linear = coord.linear(g);
                members[linear].push(i);
                sums[linear].0 += p.x;
                sums[linear].1 += p.y;
            }
        }

        let cells: Vec<GridCell> = members
            .into_iter()
            .zip(sums)
            .enumerate()
            .map(|(linear, (members, (sx, sy)))| {
                let count = members.len() as f64;
                let centroid = (!members.is_empty()).then(|| Point::new(sx / count, sy / count));
                GridCell {
                    coord: CellCoord::from_linear(linear, g),
                    members,
                    centroid,
                }
            })
            .collect();

        let occupied = cells.iter().filter(|c| !c.is_empty()).count();
        log::debug!(
            "partition: points={} grid={g}x{g} occupied={occupied} empty={}",
            points.len(),
            g * g - occupied
        );

        Grid {
            grid_size: g,
            cells,
        }
    }
}

struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    fn of(points: &PointSet) -> Option<Self> {
        let first = points.get(0)?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(points.iter().fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }
}

/// `floor((value - min - EPSILON) / extent * grid_size)`, clamped into the
/// grid. A zero extent puts everything in bin 0.
fn bin(value: f64, min: f64, extent: f64, grid_size: usize) -> usize {
    if extent <= 0.0 {
        return 0;
    }
    let raw = ((value - min - EPSILON) / extent * grid_size as f64).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(grid_size - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn corners() -> PointSet {
        [(0.0, 0.0), (0.2, 0.1), (1.0, 1.0), (0.9, 0.1)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_rejects_bad_sizes() {
        for size in [0, 1, 3, 7] {
            assert!(matches!(
                GridPartitioner::new(size),
                Err(Error::InvalidGridSize(s)) if s == size
            ));
        }
        assert!(GridPartitioner::new(4).is_ok());
    }

    #[test]
    fn test_membership() {
        let grid = GridPartitioner::new(2).unwrap().partition(&corners());
        assert_eq!(grid.cells().len(), 4);
        assert_eq!(grid.cell(CellCoord::new(0, 0)).unwrap().members(), &[0, 1]);
        assert_eq!(grid.cell(CellCoord::new(1, 0)).unwrap().members(), &[3]);
        assert_eq!(grid.cell(CellCoord::new(1, 1)).unwrap().members(), &[2]);
        assert!(grid.cell(CellCoord::new(0, 1)).unwrap().is_empty());
        assert!(grid.cell(CellCoord::new(2, 0)).is_none());
    }

    #[test]
    fn test_centroids_skip_empty_cells() {
        let grid = GridPartitioner::new(2).unwrap().partition(&corners());
        let set = grid.centroids();
        assert_eq!(set.points.len(), 3);
        assert_eq!(
            set.cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(1, 1)
            ]
        );
        let c = set.points.point(0);
        assert!((c.x - 0.1).abs() < 1e-12);
        assert!((c.y - 0.05).abs() < 1e-12);
        assert!(grid.cell(CellCoord::new(0, 1)).unwrap().centroid().is_none());
    }

    #[test]
    fn test_linear_index_round_trip() {
        let coord = CellCoord::new(3, 1);
        assert_eq!(coord.linear(4), 13);
        assert_eq!(CellCoord::from_linear(13, 4), coord);
    }

    #[test]
    fn test_degenerate_extent() {
        let points: PointSet = [(1.0, 0.0), (1.0, 5.0), (1.0, 10.0)].into_iter().collect();
        let grid = GridPartitioner::new(2).unwrap().partition(&points);
        assert_eq!(grid.cell(CellCoord::new(0, 0)).unwrap().members(), &[0, 1]);
        assert_eq!(grid.cell(CellCoord::new(0, 1)).unwrap().members(), &[2]);
    }

    #[test]
    fn test_empty_point_set() {
        let grid = GridPartitioner::new(4).unwrap().partition(&PointSet::default());
        assert_eq!(grid.cells().len(), 16);
        assert!(grid.cells().iter().all(GridCell::is_empty));
        assert!(grid.centroids().points.is_empty());
    }

    #[test]
    fn test_single_point() {
        let points: PointSet = [(2.0, 3.0)].into_iter().collect();
        let grid = GridPartitioner::new(2).unwrap().partition(&points);
        assert_eq!(grid.cell(CellCoord::new(0, 0)).unwrap().members(), &[0]);
        assert_eq!(grid.centroids().points.point(0), Point::new(2.0, 3.0));
    }
}
