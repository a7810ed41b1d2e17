//! # Series Preparation
//!
//! Turns a [`TimeSeries`] into one point per animation frame. Frame times are
//! remapped through a cosine ease so the animation accelerates out of the
//! first year and settles into the last.

pub mod easing;
pub mod interpolate;

pub use easing::{ease_in_out_cosine, linspace_unit};
pub use interpolate::LinearInterpolator;

use crate::data::TimeSeries;
use crate::error::DataError;

/// The chart position at one animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePoint {
    /// Fractional year
    pub x: f64,
    pub y: f64,
}

impl FramePoint {
    /// Year shown on the counter overlay
    pub fn year_label(&self) -> i64 {
        self.x.trunc() as i64
    }
}

/// Dense, eased resampling of a time series
#[derive(Debug, Clone)]
pub struct DenseFrames {
    points: Vec<FramePoint>,
    x_range: (f64, f64),
    value_range: (f64, f64),
}

impl DenseFrames {
    /// Resample `series` into `frame_count` eased frames
    pub fn prepare(series: &TimeSeries, frame_count: usize) -> Result<Self, DataError> {
        let knots = series.year_points();
        let interpolator = LinearInterpolator::new(&knots)?;
        if frame_count < 2 {
            return Err(DataError::TooFewPoints { found: frame_count });
        }

        let x_first = interpolator.x_min();
        let x_last = interpolator.x_max();
        let span = x_last - x_first;

        let points = linspace_unit(frame_count)
            .into_iter()
            .map(|t| {
                let x = ease_in_out_cosine(t) * span + x_first;
                FramePoint {
                    x,
                    y: interpolator.at(x),
                }
            })
            .collect();

        let value_range = knots
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
                (lo.min(y), hi.max(y))
            });

        Ok(Self {
            points,
            x_range: (x_first, x_last),
            value_range,
        })
    }

    pub fn points(&self) -> &[FramePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last observed year
    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    /// Smallest and largest observed value
    pub fn value_range(&self) -> (f64, f64) {
        self.value_range
    }
}
