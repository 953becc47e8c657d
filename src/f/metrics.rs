use crate::matrix::Matrix;

pub fn argmax(d: &[f64]) -> usize {
    if d.is_empty() {
        return 0;
    }

    let mut max_ix = 0;
    let mut max = &d[0];

    for (i, v) in d.iter().enumerate() {
        if v > max {
            max = v;
            max_ix = i;
        }
    }

    max_ix
}

/// 1.0 when `p` clears `cut`, otherwise 0.0.
pub fn threshold(p: f64, cut: f64) -> f64 {
    if p > cut {
        return 1.;
    }
    0.
}

pub fn accuracy<T: Copy + PartialEq>(prediction: &[T], actual: &[T]) -> f64 {
    if prediction.is_empty() {
        return 0.;
    }

    let hits = prediction
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();

    (hits as f64 / prediction.len() as f64) * 100.
}

/// Percentage of cells whose prediction lands on the same side of 0.5 as the target.
pub fn binary_accuracy(predictions: &[Matrix], targets: &[Matrix]) -> f64 {
    let flatten = |ms: &[Matrix]| {
        ms.iter()
            .flat_map(|m| m.to_vec())
            .map(|v| threshold(v, 0.5) as u8)
            .collect::<Vec<u8>>()
    };

    accuracy(&flatten(predictions), &flatten(targets))
}
