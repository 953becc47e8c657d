use std::ops::{Index, IndexMut};

use ndarray::{Array2, ArrayView2, Zip};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use crate::{Error, Result};

/// Dense row-major matrix of `f64`.
///
/// `multiply` and `apply_function` fan their per-cell work out over the rayon
/// pool. Every other operation runs on the calling thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Matrix {
        Matrix {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// `rows x cols` matrix drawn uniformly from `[-1, 1]`.
    pub fn random(rows: usize, cols: usize) -> Matrix {
        Matrix {
            data: Array2::random((rows, cols), Uniform::new_inclusive(-1., 1.)),
        }
    }

    pub fn with_shape(rows: usize, cols: usize, randomize: bool) -> Matrix {
        if randomize {
            return Matrix::random(rows, cols);
        }
        Matrix::new(rows, cols)
    }

    /// The 0x0 matrix. Used as the "not yet sized" marker for optimizer state.
    pub fn empty() -> Matrix {
        Matrix::new(0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0 && self.cols() == 0
    }

    pub fn from_vec(rows: usize, cols: usize, values: Vec<f64>) -> Result<Matrix> {
        let len = values.len();
        Array2::from_shape_vec((rows, cols), values)
            .map(Matrix::from)
            .map_err(|_| Error::ShapeMismatch {
                op: "from_vec",
                left: (rows, cols),
                right: (1, len),
            })
    }

    /// 1 x n row vector.
    pub fn row_vector(values: &[f64]) -> Matrix {
        Matrix {
            data: Array2::from_shape_fn((1, values.len()), |(_, c)| values[c]),
        }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[[r, c]]
    }

    pub fn set(&mut self, r: usize, c: usize, value: f64) {
        self.data[[r, c]] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// Row-major copy of the elements.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// `A * B`. Panics when `A.cols != B.rows`.
    pub fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
        match Matrix::try_multiply(a, b) {
            Ok(product) => product,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.cols() != b.rows() {
            return Err(Error::ShapeMismatch {
                op: "multiply",
                left: a.shape(),
                right: b.shape(),
            });
        }

        let mut out = Array2::<f64>::zeros((a.rows(), b.cols()));
        let (lhs, rhs) = (&a.data, &b.data);

        // Each cell only reads its own row of A and column of B.
        Zip::indexed(&mut out).par_for_each(|(i, j), cell| {
            *cell = lhs.row(i).dot(&rhs.column(j));
        });

        Ok(Matrix { data: out })
    }

    /// `A + B`. Panics when the shapes differ.
    pub fn add(a: &Matrix, b: &Matrix) -> Matrix {
        match Matrix::try_add(a, b) {
            Ok(sum) => sum,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_add(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        // ndarray would happily broadcast a 1xn row over mxn, so check first.
        if a.shape() != b.shape() {
            return Err(Error::ShapeMismatch {
                op: "add",
                left: a.shape(),
                right: b.shape(),
            });
        }

        Ok(Matrix {
            data: &a.data + &b.data,
        })
    }

    /// In-place elementwise map. `f` must not depend on anything but its argument.
    pub fn apply_function<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        self.data.par_mapv_inplace(f);
    }

    /// Copying counterpart of `apply_function`.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        let mut out = self.clone();
        out.apply_function(f);
        out
    }

    /// In-place elementwise product. Panics when the shapes differ.
    pub fn hadamard_assign(&mut self, other: &Matrix) {
        assert_eq!(
            self.shape(),
            other.shape(),
            "elementwise product requires identical shapes"
        );
        self.data *= &other.data;
    }

    pub fn transpose(m: &Matrix) -> Matrix {
        Matrix {
            data: m.data.t().as_standard_layout().into_owned(),
        }
    }
}

impl From<Array2<f64>> for Matrix {
    fn from(data: Array2<f64>) -> Matrix {
        Matrix {
            data: data.as_standard_layout().into_owned(),
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[[r, c]]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.data[[r, c]]
    }
}
