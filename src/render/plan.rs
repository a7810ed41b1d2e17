use crate::series::{DenseFrames, FramePoint};

/// Everything that changes from one animation frame to the next
#[derive(Debug, Clone)]
pub struct FrameState<'a> {
    pub index: usize,
    /// Cumulative line, frame 0 through `index` inclusive
    pub line: &'a [FramePoint],
    pub current: FramePoint,
    pub x_bounds: (f64, f64),
    pub y_bounds: (f64, f64),
    marker_every: usize,
}

impl<'a> FrameState<'a> {
    /// Markers stamped so far: one at every `marker_every`-th frame up to this
    /// one. Earlier markers never disappear.
    pub fn markers(&self) -> impl Iterator<Item = &'a FramePoint> {
        self.line.iter().step_by(self.marker_every)
    }

    /// Truncated year for the counter overlay
    pub fn year_label(&self) -> String {
        self.current.year_label().to_string()
    }
}

/// Per-frame chart layout for a dense frame sequence
#[derive(Debug, Clone)]
pub struct AnimationPlan<'a> {
    frames: &'a DenseFrames,
    zoom_max: Option<f64>,
    marker_every: usize,
}

impl<'a> AnimationPlan<'a> {
    pub fn new(frames: &'a DenseFrames, zoom_max: Option<f64>, marker_every: usize) -> Self {
        Self {
            frames,
            zoom_max,
            marker_every: marker_every.max(1),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// x-axis range: the observed years, widened when they coincide
    pub fn x_bounds(&self) -> (f64, f64) {
        let (first, last) = self.frames.x_range();
        if last > first {
            (first, last)
        } else {
            (first - 0.5, last + 0.5)
        }
    }

    /// y-axis range for a frame whose current value is `current_y`
    ///
    /// The ceiling is the configured zoom bound (or the series maximum), raised
    /// to stay one unit above the current value.
    pub fn y_bounds(&self, current_y: f64) -> (f64, f64) {
        let (series_min, series_max) = self.frames.value_range();
        let lower = series_min.min(0.0);
        let ceiling = self.zoom_max.unwrap_or(series_max);
        let upper = (current_y + 1.0).max(ceiling);
        if upper > lower {
            (lower, upper)
        } else {
            (lower, lower + 1.0)
        }
    }

    pub fn frame(&self, index: usize) -> Option<FrameState<'a>> {
        let points = self.frames.points();
        let current = *points.get(index)?;
        Some(FrameState {
            index,
            line: &points[..=index],
            current,
            x_bounds: self.x_bounds(),
            y_bounds: self.y_bounds(current.y),
            marker_every: self.marker_every,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::{Observation, TimeSeries};

    fn frames(points: &[(i32, f64)], count: usize) -> DenseFrames {
        let series: TimeSeries = points
            .iter()
            .map(|&(y, v)| Observation::new(NaiveDate::from_ymd_opt(y, 1, 1).unwrap(), v))
            .collect();
        DenseFrames::prepare(&series, count).unwrap()
    }

    #[test]
    fn test_markers_accumulate_every_tenth_frame() {
        let dense = frames(&[(2000, 60.0), (2020, 70.0)], 480);
        let plan = AnimationPlan::new(&dense, None, 10);

        assert_eq!(plan.frame(0).unwrap().markers().count(), 1);
        assert_eq!(plan.frame(9).unwrap().markers().count(), 1);
        assert_eq!(plan.frame(10).unwrap().markers().count(), 2);
        assert_eq!(plan.frame(479).unwrap().markers().count(), 48);

        // Marker positions are those of frames 0, 10, 20, ...
        let last = plan.frame(479).unwrap();
        let markers: Vec<&FramePoint> = last.markers().collect();
        assert_eq!(*markers[3], dense.points()[30]);
    }

    #[test]
    fn test_line_is_cumulative() {
        let dense = frames(&[(2000, 60.0), (2020, 70.0)], 480);
        let plan = AnimationPlan::new(&dense, None, 10);
        assert_eq!(plan.frame(0).unwrap().line.len(), 1);
        assert_eq!(plan.frame(200).unwrap().line.len(), 201);
        assert!(plan.frame(480).is_none());
        assert_eq!(plan.frame_count(), 480);
    }

    #[test]
    fn test_y_ceiling_respects_zoom_and_rises_with_value() {
        let dense = frames(&[(2000, 60.0), (2020, 70.0)], 48);

        let fixed = AnimationPlan::new(&dense, Some(100.0), 10);
        assert_eq!(fixed.y_bounds(65.0), (0.0, 100.0));
        assert_eq!(fixed.y_bounds(120.0), (0.0, 121.0));

        let unzoomed = AnimationPlan::new(&dense, None, 10);
        assert_eq!(unzoomed.y_bounds(60.0), (0.0, 70.0));
        assert_eq!(unzoomed.y_bounds(70.0), (0.0, 71.0));
    }

    #[test]
    fn test_negative_values_lower_the_floor() {
        let dense = frames(&[(2000, -5.0), (2010, 3.0)], 24);
        let plan = AnimationPlan::new(&dense, None, 10);
        assert_eq!(plan.y_bounds(-5.0).0, -5.0);
    }

    #[test]
    fn test_same_year_range_is_padded() {
        let series: TimeSeries = vec![
            Observation::new(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(), 1.0),
            Observation::new(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(), 2.0),
        ]
        .into_iter()
        .collect();
        let dense = DenseFrames::prepare(&series, 24).unwrap();
        let plan = AnimationPlan::new(&dense, None, 10);
        assert_eq!(plan.x_bounds(), (2020.5, 2021.5));
    }

    #[test]
    fn test_year_label() {
        let dense = frames(&[(2000, 60.0), (2020, 70.0)], 480);
        let plan = AnimationPlan::new(&dense, None, 10);
        assert_eq!(plan.frame(0).unwrap().year_label(), "2000");
        assert_eq!(plan.frame(479).unwrap().year_label(), "2020");
    }
}
