//! The logistic activation and its derivative.
//!
//! No clamping is applied: for large |z| the exponential saturates to
//! `0.0` or `inf` and σ lands exactly on 0 or 1, which the caller accepts.

/// σ(z) = 1 / (1 + e^-z)
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// σ'(z) = e^z / (e^z + 1)², evaluated as σ(z)·(1 − σ(z)).
///
/// The product form stays finite for every finite `z`; the quotient form
/// turns into `inf / inf` once e^z overflows.
pub fn sigmoid_prime(z: f64) -> f64 {
    let s = sigmoid(z);
    s * (1.0 - s)
}
