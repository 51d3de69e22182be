//! Mean-variance re-weighting.
//!
//! Weights live on the capped simplex (`sum = 1`, `0 ≤ w ≤ 0.3`), which is
//! enforced exactly by Euclidean projection. The target-return equality and
//! the volatility ceiling are handled with an augmented Lagrangian whose
//! subproblems are solved by projected gradient descent with backtracking.

use crate::common::math;
use crate::portfolio::alignment::AlignedReturns;
use crate::portfolio::metrics::TRADING_DAYS;

pub const MAX_WEIGHT: f64 = 0.3;
/// Return observations needed before optimizing.
pub const MIN_OBSERVATIONS: usize = 30;
/// Optimized weights at or below this are dropped from the result.
pub const NEGLIGIBLE_WEIGHT: f64 = 0.01;

const OUTER_ITERATIONS: usize = 40;
const INNER_ITERATIONS: usize = 3_000;
const MAX_BACKTRACKS: usize = 60;
const SUFFICIENT_DECREASE: f64 = 1e-4;
const MAX_STEP: f64 = 10.0;
const STATIONARITY_TOL: f64 = 1e-7;
const FEASIBILITY_TOL: f64 = 1e-6;
const INITIAL_PENALTY: f64 = 10.0;
const MAX_PENALTY: f64 = 1e8;
const MIN_VOLATILITY: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Objective {
    /// Maximize `(wᵀμ − rf) / σ`.
    MaxSharpe { risk_free_rate: f64 },
    /// Minimize `wᵀΣw` subject to `wᵀμ = target_return`.
    MinVariance { target_return: f64 },
}

/// Annualised moments of the aligned returns plus the constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationProblem {
    pub expected_returns: Vec<f64>,
    pub covariance: Vec<Vec<f64>>,
    pub objective: Objective,
    pub risk_tolerance: f64,
}

#[derive(Debug, Clone, Copy)]
struct Multipliers {
    equality: f64,
    volatility: f64,
    penalty: f64,
}

impl OptimizationProblem {
    /// `None` with fewer than [`MIN_OBSERVATIONS`] returns or when a moment
    /// cannot be estimated.
    pub fn from_returns(
        returns: &AlignedReturns,
        objective: Objective,
        risk_tolerance: f64,
    ) -> Option<Self> {
        if returns.len() < MIN_OBSERVATIONS || returns.columns.is_empty() {
            return None;
        }
        let expected_returns = returns
            .columns
            .iter()
            .map(|c| math::mean(c).map(|m| m * TRADING_DAYS))
            .collect::<Option<Vec<f64>>>()?;

        let n = returns.columns.len();
        let mut covariance = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let c = math::covariance(&returns.columns[i], &returns.columns[j])? * TRADING_DAYS;
                covariance[i][j] = c;
                covariance[j][i] = c;
            }
        }

        Some(Self {
            expected_returns,
            covariance,
            objective,
            risk_tolerance,
        })
    }

    pub fn dimension(&self) -> usize {
        self.expected_returns.len()
    }

    fn cov_times(&self, w: &[f64]) -> Vec<f64> {
        self.covariance
            .iter()
            .map(|row| row.iter().zip(w).map(|(c, x)| c * x).sum())
            .collect()
    }

    pub fn expected_return(&self, w: &[f64]) -> f64 {
        dot(w, &self.expected_returns)
    }

    pub fn volatility(&self, w: &[f64]) -> f64 {
        dot(w, &self.cov_times(w)).max(0.0).sqrt()
    }

    fn equality_residual(&self, w: &[f64]) -> f64 {
        match self.objective {
            Objective::MinVariance { target_return } => self.expected_return(w) - target_return,
            Objective::MaxSharpe { .. } => 0.0,
        }
    }

    /// Augmented Lagrangian value and gradient at `w`.
    fn lagrangian(&self, w: &[f64], m: &Multipliers) -> Option<(f64, Vec<f64>)> {
        let sigma_w = self.cov_times(w);
        let variance = dot(w, &sigma_w).max(0.0);
        let vol = variance.sqrt();
        let mu = &self.expected_returns;

        let (mut value, mut grad) = match self.objective {
            Objective::MaxSharpe { risk_free_rate } => {
                if vol < MIN_VOLATILITY {
                    return None;
                }
                let excess = dot(w, mu) - risk_free_rate;
                let grad = mu
                    .iter()
                    .zip(&sigma_w)
                    .map(|(m_i, s_i)| -(m_i / vol - excess * s_i / (vol * vol * vol)))
                    .collect::<Vec<f64>>();
                (-excess / vol, grad)
            }
            Objective::MinVariance { .. } => {
                (variance, sigma_w.iter().map(|s| 2.0 * s).collect())
            }
        };

        let h = self.equality_residual(w);
        if matches!(self.objective, Objective::MinVariance { .. }) {
            value += m.equality * h + 0.5 * m.penalty * h * h;
            let scale = m.equality + m.penalty * h;
            for (g, m_i) in grad.iter_mut().zip(mu) {
                *g += scale * m_i;
            }
        }

        let slack = self.volatility_multiplier(vol, m);
        value += (slack * slack - m.volatility * m.volatility) / (2.0 * m.penalty);
        if slack > 0.0 && vol >= MIN_VOLATILITY {
            for (g, s_i) in grad.iter_mut().zip(&sigma_w) {
                *g += slack * s_i / vol;
            }
        }

        if !value.is_finite() || grad.iter().any(|g| !g.is_finite()) {
            return None;
        }
        Some((value, grad))
    }

    fn volatility_multiplier(&self, vol: f64, m: &Multipliers) -> f64 {
        (m.volatility + m.penalty * (vol - self.risk_tolerance)).max(0.0)
    }

    /// Projected-gradient residual `‖w − P(w − ∇L)‖∞`.
    fn stationarity(&self, w: &[f64], grad: &[f64]) -> Option<f64> {
        let stepped: Vec<f64> = w.iter().zip(grad).map(|(x, g)| x - g).collect();
        let projected = project_capped_simplex(&stepped, MAX_WEIGHT)?;
        Some(
            w.iter()
                .zip(&projected)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }

    /// Minimize the augmented Lagrangian over the capped simplex. Returns the
    /// final point and whether it is stationary.
    fn minimize_subproblem(&self, start: Vec<f64>, m: &Multipliers) -> Option<(Vec<f64>, bool)> {
        let mut w = start;
        let mut step = 1.0;

        for _ in 0..INNER_ITERATIONS {
            let (value, grad) = self.lagrangian(&w, m)?;
            if self.stationarity(&w, &grad)? <= STATIONARITY_TOL {
                return Some((w, true));
            }

            let mut t = step;
            let mut next = None;
            for _ in 0..MAX_BACKTRACKS {
                let trial: Vec<f64> = w.iter().zip(&grad).map(|(x, g)| x - t * g).collect();
                let trial = project_capped_simplex(&trial, MAX_WEIGHT)?;
                let moved: f64 = trial.iter().zip(&w).map(|(a, b)| (a - b).powi(2)).sum();
                if let Some((trial_value, _)) = self.lagrangian(&trial, m) {
                    if trial_value <= value - SUFFICIENT_DECREASE / t * moved {
                        next = Some(trial);
                        break;
                    }
                }
                t *= 0.5;
            }

            match next {
                Some(trial) => {
                    w = trial;
                    step = (2.0 * t).min(MAX_STEP);
                }
                None => return Some((w, false)),
            }
        }
        Some((w, false))
    }

    /// Solve from equal weights. `None` when the bounds are infeasible, a
    /// quantity becomes undefined, or the iteration fails to converge.
    pub fn solve(&self) -> Option<Vec<f64>> {
        let n = self.dimension();
        if n == 0 || (n as f64) * MAX_WEIGHT < 1.0 {
            return None;
        }

        let mut w = vec![1.0 / n as f64; n];
        let mut m = Multipliers {
            equality: 0.0,
            volatility: 0.0,
            penalty: INITIAL_PENALTY,
        };
        let mut last_violation = f64::INFINITY;

        for _ in 0..OUTER_ITERATIONS {
            let (next, stationary) = self.minimize_subproblem(w, &m)?;
            w = next;

            let h = self.equality_residual(&w);
            let g = self.volatility(&w) - self.risk_tolerance;
            let violation = h.abs().max(g.max(0.0));
            if stationary && violation <= FEASIBILITY_TOL {
                return Some(w);
            }

            m.equality += m.penalty * h;
            m.volatility = (m.volatility + m.penalty * g).max(0.0);
            if violation > 0.25 * last_violation {
                m.penalty = (m.penalty * 10.0).min(MAX_PENALTY);
            }
            last_violation = violation;
        }
        None
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean projection onto `{x : Σx = 1, 0 ≤ x ≤ cap}`.
///
/// Finds the shift `τ` with `Σ clamp(v − τ, 0, cap) = 1` by bisection.
/// `None` when the set is empty or the input is not finite.
pub fn project_capped_simplex(v: &[f64], cap: f64) -> Option<Vec<f64>> {
    if v.is_empty() || (v.len() as f64) * cap < 1.0 || v.iter().any(|x| !x.is_finite()) {
        return None;
    }
    let mass = |tau: f64| -> f64 { v.iter().map(|x| (x - tau).clamp(0.0, cap)).sum() };

    let mut lo = v.iter().copied().fold(f64::INFINITY, f64::min) - cap;
    let mut hi = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if mass(mid) > 1.0 {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < 1e-15 {
            break;
        }
    }
    let tau = 0.5 * (lo + hi);
    Some(v.iter().map(|x| (x - tau).clamp(0.0, cap)).collect())
}
