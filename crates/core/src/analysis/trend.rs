use num_traits::ToPrimitive;
use rust_decimal::Decimal;

/// `y = slope * x + intercept`, with `x` the zero-based sample index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    pub fn equation(&self) -> String {
        format!("y = {:.2}x + {:.2}", self.slope, self.intercept)
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares of `values` against their index.
///
/// Needs at least two samples.
pub fn fit_linear_trend(values: &[Decimal]) -> Option<TrendLine> {
    if values.len() < 2 {
        return None;
    }
    let ys = values
        .iter()
        .map(|v| v.to_f64())
        .collect::<Option<Vec<f64>>>()?;

    let n = ys.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut covariance, mut variance) = (0.0, 0.0);
    for (i, y) in ys.iter().enumerate() {
        let dx = i as f64 - mean_x;
        covariance += dx * (y - mean_y);
        variance += dx * dx;
    }

    let slope = covariance / variance;
    Some(TrendLine {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fits_exact_line() {
        let values: Vec<Decimal> = (0..10).map(|i| Decimal::from(3 * i + 7)).collect();
        let line = fit_linear_trend(&values).unwrap();
        assert!(close(line.slope, 3.0));
        assert!(close(line.intercept, 7.0));
        assert_eq!(line.equation(), "y = 3.00x + 7.00");
    }

    #[test]
    fn flat_series_has_zero_slope() {
        let values = vec![dec!(50); 12];
        let line = fit_linear_trend(&values).unwrap();
        assert!(close(line.slope, 0.0));
        assert!(close(line.predict(100.0), 50.0));
    }

    #[test]
    fn noisy_series_matches_hand_computation() {
        // x = 0..4, y = [1, 3, 2, 5]: slope 1.1, intercept 1.1
        let line = fit_linear_trend(&[dec!(1), dec!(3), dec!(2), dec!(5)]).unwrap();
        assert!(close(line.slope, 1.1));
        assert!(close(line.intercept, 1.1));
        assert_eq!(line.equation(), "y = 1.10x + 1.10");
    }

    #[test]
    fn negative_intercept_is_rendered_with_sign() {
        let line = TrendLine {
            slope: -2.5,
            intercept: -1.0,
        };
        assert_eq!(line.equation(), "y = -2.50x + -1.00");
    }

    #[test]
    fn too_few_samples() {
        assert!(fit_linear_trend(&[]).is_none());
        assert!(fit_linear_trend(&[dec!(1)]).is_none());
    }
}
