//! Truth tables for the small binary tasks the network is exercised on.
//!
//! Two-input gates list their rows as (0,0), (0,1), (1,0), (1,1).

use crate::matrix::Matrix;
use crate::Dataset;

fn gate(truth: [f64; 4]) -> Dataset {
    let inputs = [[0., 0.], [0., 1.], [1., 0.], [1., 1.]];

    let x: Vec<Matrix> = inputs.iter().map(|row| Matrix::row_vector(row)).collect();
    let y: Vec<Matrix> = truth.iter().map(|t| Matrix::row_vector(&[*t])).collect();
    (x, y)
}

pub fn and() -> Dataset {
    gate([0., 0., 0., 1.])
}

pub fn or() -> Dataset {
    gate([0., 1., 1., 1.])
}

pub fn xor() -> Dataset {
    gate([0., 1., 1., 0.])
}

pub fn nand() -> Dataset {
    gate([1., 1., 1., 0.])
}

/// Every `bits`-wide pattern; column `i` holds bit `i`, target is 1 for an odd popcount.
///
/// Panics when `bits >= 32`.
pub fn parity(bits: u32) -> Dataset {
    assert!(bits < 32, "parity supports at most 31 bits, got {}", bits);

    let (mut x, mut y) = (vec![], vec![]);

    for pattern in 0..(1u64 << bits) {
        let row = (0..bits)
            .map(|i| ((pattern >> i) & 1) as f64)
            .collect::<Vec<f64>>();
        x.push(Matrix::row_vector(&row));
        y.push(Matrix::row_vector(&[(pattern.count_ones() % 2) as f64]));
    }

    (x, y)
}

/// Wraps plain rows as 1 x n matrices.
pub fn from_rows(x: &[Vec<f64>], y: &[Vec<f64>]) -> Dataset {
    let wrap = |rows: &[Vec<f64>]| -> Vec<Matrix> {
        rows.iter().map(|r| Matrix::row_vector(r)).collect()
    };
    (wrap(x), wrap(y))
}
