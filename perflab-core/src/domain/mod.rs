//! Domain types for PerfLab

pub mod series;
pub mod summary;
pub mod trade;
pub mod weights;

pub use series::{ValuePoint, ValueSeries};
pub use summary::{Summary, UNKNOWN_STRATEGY};
pub use trade::{TradeRecord, TradeSide};
pub use weights::WeightsPoint;

/// Symbol type alias
pub type Symbol = String;
