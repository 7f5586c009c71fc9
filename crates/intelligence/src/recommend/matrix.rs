//! Row-major dense matrix of `f64`.

/// Dense row-major matrix addressed by integer indices.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
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

    /// Value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Set the value at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Mutably borrow one row.
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Copy out every column as its own vector.
    pub fn columns(&self) -> Vec<Vec<f64>> {
        (0..self.cols)
            .map(|c| (0..self.rows).map(|r| self.get(r, c)).collect())
            .collect()
    }

    /// Iterate all values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_and_rows() {
        let mut m = DenseMatrix::zeros(2, 3);
        m.set(1, 2, 4.0);
        m.row_mut(0)[1] = 2.0;
        assert_eq!(m.get(1, 2), 4.0);
        assert_eq!(m.row(0), &[0.0, 2.0, 0.0]);
        assert_eq!(m.columns(), vec![vec![0.0, 0.0], vec![2.0, 0.0], vec![0.0, 4.0]]);
    }

    #[test]
    fn test_empty_matrix() {
        let m = DenseMatrix::zeros(0, 0);
        assert_eq!(m.values().count(), 0);
        assert!(m.columns().is_empty());
    }
}
