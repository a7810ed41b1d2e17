use crate::error::DataError;

/// Piecewise-linear interpolation over non-decreasing knots, extrapolating
/// linearly from the first and last segments
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// `points` must be sorted by x (ties allowed) and hold at least two knots
    pub fn new(points: &[(f64, f64)]) -> Result<Self, DataError> {
        if points.len() < 2 {
            return Err(DataError::TooFewPoints {
                found: points.len(),
            });
        }
        let (xs, ys) = points.iter().copied().unzip();
        Ok(Self { xs, ys })
    }

    pub fn x_min(&self) -> f64 {
        self.xs[0]
    }

    pub fn x_max(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    /// Value at `x`
    ///
    /// The segment's right knot is the first knot with `x_k >= x`, clamped to
    /// `1..len`. With repeated x values this joins the last sample of one x to
    /// the first sample of the next; a zero-width segment yields its left knot.
    pub fn at(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let hi = self.xs.partition_point(|&k| k < x).clamp(1, n - 1);
        let lo = hi - 1;

        let (x0, x1) = (self.xs[lo], self.xs[hi]);
        let (y0, y1) = (self.ys[lo], self.ys[hi]);
        let width = x1 - x0;
        if width == 0.0 {
            return y0;
        }
        if x == x1 {
            return y1;
        }
        y0 + (y1 - y0) * ((x - x0) / width)
    }
}
