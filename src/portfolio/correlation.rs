//! Return correlations across the aligned instruments.

use crate::common::math;
use crate::models::{CorrelatedPair, CorrelationMatrix, CorrelationSummary};
use crate::portfolio::alignment::AlignedReturns;

/// Correlation risk reported when fewer than two instruments are aligned.
pub const DEFAULT_CORRELATION_RISK: f64 = 0.5;

/// Pearson correlation of every pair of return columns. A column without
/// variance correlates 0 with everything else and 1 with itself.
pub fn correlation_matrix(returns: &AlignedReturns) -> CorrelationMatrix {
    let n = returns.instruments.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let rho = math::correlation(&returns.columns[i], &returns.columns[j]).unwrap_or(0.0);
            values[i][j] = rho;
            values[j][i] = rho;
        }
    }
    CorrelationMatrix {
        instruments: returns.instruments.clone(),
        values,
    }
}

/// Mean of the strict upper triangle, `None` with fewer than two
/// instruments.
pub fn average_correlation(matrix: &CorrelationMatrix) -> Option<f64> {
    let pairs: Vec<f64> = matrix.upper_triangle().map(|(_, _, v)| v).collect();
    math::mean(&pairs)
}

/// Pairs whose absolute correlation exceeds `high_correlation` are listed.
pub fn summarize(matrix: &CorrelationMatrix, high_correlation: f64) -> CorrelationSummary {
    let highly_correlated_pairs = matrix
        .upper_triangle()
        .filter(|(_, _, v)| v.abs() > high_correlation)
        .map(|(i, j, v)| CorrelatedPair {
            first: matrix.instruments[i].clone(),
            second: matrix.instruments[j].clone(),
            correlation: v,
        })
        .collect();

    CorrelationSummary {
        average_correlation: average_correlation(matrix).unwrap_or(0.0),
        max_correlation: matrix
            .upper_triangle()
            .map(|(_, _, v)| v)
            .reduce(f64::max)
            .unwrap_or(0.0),
        highly_correlated_pairs,
    }
}
