use tracing::{info, warn};

use crate::config::DataConfig;
use crate::data::clean::{ColumnSpec, CsvDataset};
use crate::data::source::DataSource;
use crate::data::types::TimeSeries;
use crate::error::DataError;

/// Which dataset a series came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Primary,
    Fallback,
}

/// A cleaned series plus where it was found
#[derive(Debug, Clone)]
pub struct Retrieved {
    pub series: TimeSeries,
    pub source: SourceKind,
}

/// Fetches a metric for a country, trying the per-metric dataset first and the
/// combined fallback dataset once if that fails
pub struct DataRetriever<S> {
    source: S,
    config: DataConfig,
}

impl<S: DataSource> DataRetriever<S> {
    pub fn new(source: S, config: DataConfig) -> Self {
        Self { source, config }
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    /// Retrieve a non-empty series or fail with a typed error
    pub async fn retrieve(&self, metric: &str, country: &str) -> Result<Retrieved, DataError> {
        info!("📡 Fetching data for metric: {}, country: {}", metric, country);

        let (series, source) = match self.from_primary(metric, country).await {
            Ok(series) => {
                info!("   Found dataset in primary source");
                (series, SourceKind::Primary)
            }
            Err(e) if e.triggers_fallback() => {
                warn!("Primary source unavailable ({}), falling back", e);
                (self.from_fallback(metric, country).await?, SourceKind::Fallback)
            }
            Err(e) => return Err(e),
        };

        if series.is_empty() {
            return Err(DataError::EmptySeries {
                metric: metric.to_string(),
                country: country.to_string(),
            });
        }

        info!("📈 Loaded {} valid records", series.len());
        Ok(Retrieved { series, source })
    }

    async fn from_primary(&self, metric: &str, country: &str) -> Result<TimeSeries, DataError> {
        let url = self.config.primary_url(metric);
        let body = self.fetch_ok(&url).await?;
        let dataset = CsvDataset::open(&body, &url)?;
        self.extract(dataset, metric, country)
    }

    async fn from_fallback(&self, metric: &str, country: &str) -> Result<TimeSeries, DataError> {
        let url = self.config.fallback_url.clone();
        let body = self.fetch_ok(&url).await?;
        let dataset = CsvDataset::open(&body, &url)?;

        if !dataset.has_column(metric) {
            return Err(DataError::MetricNotFound {
                metric: metric.to_string(),
            });
        }
        self.extract(dataset, metric, country)
    }

    async fn fetch_ok(&self, url: &str) -> Result<Vec<u8>, DataError> {
        let fetched = self.source.fetch(url).await?;
        if !fetched.is_ok() {
            return Err(DataError::Status {
                url: url.to_string(),
                status: fetched.status,
            });
        }
        Ok(fetched.body)
    }

    fn extract(
        &self,
        dataset: CsvDataset<'_>,
        metric: &str,
        country: &str,
    ) -> Result<TimeSeries, DataError> {
        let columns = ColumnSpec {
            date: &self.config.date_column,
            metric,
            location: &self.config.location_column,
        };
        let (series, stats) = dataset.extract(columns, country)?;

        let dropped = stats.rows_in_scope - stats.rows_kept;
        if dropped > 0 {
            warn!(
                "Dropped {} of {} rows for '{}' (missing value, bad date or duplicate)",
                dropped, stats.rows_in_scope, country
            );
        }
        Ok(series)
    }
}
