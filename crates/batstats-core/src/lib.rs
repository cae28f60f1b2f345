// Library root: batting statistics pipeline (load, score, rank, resolve names).

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod names;
pub mod rank;
pub mod report;
pub mod table;

pub use config::{FieldMap, Role, MINIMUM_AT_BATS};
pub use error::{StatsError, StatsResult};
pub use metrics::Metric;
pub use names::RankedPlayer;
pub use rank::ScoredPlayer;
pub use table::{CsvTable, Row, TableSource};
