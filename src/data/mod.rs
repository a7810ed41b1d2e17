//! # Data Retrieval Module
//!
//! Fetches a metric's time series for one country. The per-metric dataset is
//! tried first; if it cannot be fetched or parsed, the combined fallback
//! dataset is used once.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trend_reel::config::DataConfig;
//! use trend_reel::data::{DataRetriever, HttpSource};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let retriever = DataRetriever::new(HttpSource::new(), DataConfig::default());
//! let retrieved = retriever.retrieve("life_expectancy", "India").await?;
//! println!("{} observations", retrieved.series.len());
//! # Ok(())
//! # }
//! ```

pub mod clean;
pub mod retriever;
pub mod source;
pub mod types;

pub use clean::{ColumnSpec, CsvDataset};
pub use retriever::{DataRetriever, Retrieved, SourceKind};
pub use source::{DataSource, Fetched, HttpSource};
pub use types::{Observation, TimeSeries};
