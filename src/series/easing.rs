use std::f64::consts::PI;

/// Cosine ease-in-ease-out: slow start, fast middle, slow end
///
/// Maps `[0, 1]` onto `[0, 1]` with `eased(0) == 0` and `eased(1) == 1`.
pub fn ease_in_out_cosine(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

/// `count` evenly spaced samples over `[0, 1]`, both ends included
pub fn linspace_unit(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { 1.0 } else { i as f64 / last })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(ease_in_out_cosine(0.0), 0.0);
        assert_eq!(ease_in_out_cosine(1.0), 1.0);
        assert!((ease_in_out_cosine(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let samples = linspace_unit(1001);
        let eased: Vec<f64> = samples.iter().map(|&t| ease_in_out_cosine(t)).collect();
        assert!(eased.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_slow_at_edges() {
        // Early and late steps move less than the middle step
        let step = 0.01;
        let start = ease_in_out_cosine(step) - ease_in_out_cosine(0.0);
        let middle = ease_in_out_cosine(0.5 + step) - ease_in_out_cosine(0.5);
        let end = ease_in_out_cosine(1.0) - ease_in_out_cosine(1.0 - step);
        assert!(start < middle);
        assert!(end < middle);
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace_unit(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace_unit(480).len(), 480);
        assert!(linspace_unit(0).is_empty());
    }
}
