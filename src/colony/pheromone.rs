//! Bounded pheromone storage.

use super::config::{TAU_MAX, TAU_MIN};

/// A pheromone contribution to a single trail cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deposit {
    /// Row of the target cell.
    pub row: usize,
    /// Column of the target cell.
    pub col: usize,
    /// Amount added to the cell.
    pub amount: f64,
}

impl Deposit {
    /// Creates a deposit of `amount` on cell `(row, col)`.
    pub fn new(row: usize, col: usize, amount: f64) -> Self {
        Self { row, col, amount }
    }
}

/// Dense `rows × cols` matrix of trail strengths, stored row-major.
///
/// The TSP variant uses a square `N × N` matrix (its diagonal is never read).
/// The knapsack variant uses `N × 2`, see
/// [`KnapsackProblem`](crate::knapsack::KnapsackProblem).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates a matrix with every cell set to `initial`.
    pub fn new(rows: usize, cols: usize, initial: f64) -> Self {
        Self {
            rows,
            cols,
            values: vec![initial; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Trail strength of cell `(row, col)`.
    ///
    /// # Panics
    /// Panics if the cell is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[self.index(row, col)]
    }

    /// One row of the matrix.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.values[start..start + self.cols]
    }

    /// Row-major view of all cells.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Resets every cell to `level`.
    pub fn fill(&mut self, level: f64) {
        self.values.iter_mut().for_each(|v| *v = level);
    }

    /// Multiplies every cell by the retention factor.
    pub fn evaporate(&mut self, retention: f64) {
        for v in &mut self.values {
            *v *= retention;
        }
    }

    /// Adds a single contribution.
    pub fn deposit(&mut self, deposit: Deposit) {
        let idx = self.index(deposit.row, deposit.col);
        self.values[idx] += deposit.amount;
    }

    /// Forces every cell into `[TAU_MIN, TAU_MAX]`.
    pub fn clamp(&mut self) {
        for v in &mut self.values {
            *v = v.clamp(TAU_MIN, TAU_MAX);
        }
    }

    /// Returns `true` if every cell lies within `[TAU_MIN, TAU_MAX]`.
    pub fn is_bounded(&self) -> bool {
        self.values
            .iter()
            .all(|v| (TAU_MIN..=TAU_MAX).contains(v))
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "pheromone cell ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}
