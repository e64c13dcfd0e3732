use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Dense row-major matrix. `data[i][j]` is row `i`, column `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Every entry drawn independently from `dist`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, dist: &Uniform<f64>, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = dist.sample(rng);
            }
        }

        res
    }

    /// Builds a matrix from rows. Returns `None` if the rows are ragged.
    pub fn from_data(data: Vec<Vec<f64>>) -> Option<Matrix> {
        let cols = data.first().map_or(0, |row| row.len());
        if data.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    /// `self · v`, where `v` has `cols` entries.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(self.cols, v.len(), "Matrix and vector are of incorrect sizes");
        self.data.iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// `selfᵀ · v`, where `v` has `rows` entries.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(self.rows, v.len(), "Matrix and vector are of incorrect sizes");
        let mut res = vec![0.0; self.cols];
        for (row, &scale) in self.data.iter().zip(v) {
            for (acc, w) in res.iter_mut().zip(row) {
                *acc += w * scale;
            }
        }
        res
    }

    /// Outer product `a ⊗ b`: an `a.len() × b.len()` matrix.
    pub fn outer(a: &[f64], b: &[f64]) -> Matrix {
        Matrix {
            rows: a.len(),
            cols: b.len(),
            data: a.iter().map(|x| b.iter().map(|y| x * y).collect()).collect()
        }
    }

    /// Element-wise `self += rhs`.
    pub fn add_assign(&mut self, rhs: &Matrix) {
        self.axpy(1.0, rhs);
    }

    /// Element-wise `self += alpha · rhs`.
    pub fn axpy(&mut self, alpha: f64, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for (row, rhs_row) in self.data.iter_mut().zip(&rhs.data) {
            for (x, y) in row.iter_mut().zip(rhs_row) {
                *x += alpha * y;
            }
        }
    }

    pub fn scale(&mut self, factor: f64) {
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x *= factor;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter().flatten()
    }
}

/// Element-wise `a += alpha · b` on plain vectors.
pub fn axpy(a: &mut [f64], alpha: f64, b: &[f64]) {
    assert_eq!(a.len(), b.len(), "Vectors are of incorrect sizes");
    for (x, y) in a.iter_mut().zip(b) {
        *x += alpha * y;
    }
}

/// Element-wise (Hadamard) product.
pub fn hadamard(a: &[f64], b: &[f64]) -> Vec<f64> {
    assert_eq!(a.len(), b.len(), "Vectors are of incorrect sizes");
    a.iter().zip(b).map(|(x, y)| x * y).collect()
}
