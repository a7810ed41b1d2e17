use chrono::{Datelike, NaiveDate};

/// A single (date, value) sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Calendar year as a numeric x coordinate
    pub fn year(&self) -> f64 {
        self.date.year() as f64
    }
}

/// A cleaned time series: ascending by date, unique dates, finite values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Build a series from raw samples, sorting by date and dropping
    /// non-finite values and repeated dates (first occurrence wins)
    pub fn from_observations<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        let mut observations: Vec<Observation> =
            iter.into_iter().filter(|o| o.value.is_finite()).collect();

        // Stable sort keeps input order among equal dates
        observations.sort_by_key(|o| o.date);
        observations.dedup_by_key(|o| o.date);

        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// (x, y) pairs with x as the numeric year
    pub fn year_points(&self) -> Vec<(f64, f64)> {
        self.observations.iter().map(|o| (o.year(), o.value)).collect()
    }
}

impl FromIterator<Observation> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::from_observations(iter)
    }
}
