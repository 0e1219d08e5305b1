//! Dense per-cell matrices.
//!
//! Every static field the scorer reads (yield, edge distance, ...) is a
//! `Grid<f64>` of the map's dimensions, stored row-major so that index
//! `y * width + x` walks cells in scan order.

use super::cell::Cell;

/// A `width × height` matrix of values, one per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Grid {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Builds a grid from rows (outer index `y`). Returns `None` when the
    /// rows are ragged or empty.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len)?;
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let data: Vec<T> = rows.into_iter().flatten().collect();
        Some(Grid {
            width,
            height,
            data,
        })
    }

    /// Builds a grid by evaluating `f` at every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Cell) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(Cell::new(x as i32, y as i32)));
            }
        }
        Grid {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.width, self.height)
    }

    /// Row-major index of `cell`, or `None` when it lies off the map.
    #[inline]
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.y as usize * self.width + cell.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index_of(cell).map(|i| &self.data[i])
    }

    /// Overwrites the value at `cell`. Returns false if the cell is off the map.
    pub fn set(&mut self, cell: Cell, value: T) -> bool {
        match self.index_of(cell) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// Iterates all cells in scan order: rows ascending, then columns ascending.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Cell::new(x as i32, y as i32)))
    }

    /// Copies the grid back out as rows, outer index `y`.
    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.data.chunks(self.width.max(1)).map(<[T]>::to_vec).collect()
    }
}

impl Grid<f64> {
    /// Reads a numeric field, treating off-map cells as zero.
    #[inline]
    pub fn value(&self, cell: Cell) -> f64 {
        self.get(cell).copied().unwrap_or(0.0)
    }
}
