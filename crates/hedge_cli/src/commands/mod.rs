//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod evaluate;
pub mod price;
pub mod simulate;

/// Sample mean and standard deviation (population form).
pub(crate) fn mean_std(xs: &[f64]) -> (f64, f64) {
    if xs.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}
