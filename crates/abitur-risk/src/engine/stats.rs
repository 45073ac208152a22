//! Small numeric helpers shared by the detectors.

pub fn mean(scores: &[u8]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let total: u32 = scores.iter().map(|score| u32::from(*score)).sum();
    Some(f64::from(total) / scores.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn population_std_dev(scores: &[u8]) -> Option<f64> {
    let mean = mean(scores)?;
    let variance = scores
        .iter()
        .map(|score| {
            let delta = f64::from(*score) - mean;
            delta * delta
        })
        .sum::<f64>()
        / scores.len() as f64;
    Some(variance.sqrt())
}

/// True when every score is strictly lower than its predecessor.
pub fn is_strictly_decreasing(scores: &[u8]) -> bool {
    scores.windows(2).all(|pair| pair[1] < pair[0])
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
