//! Category statistics: tree building, signed sums, shares and monthly series.
//!
//! Every function here is a pure transformation of the slices it is given.

pub mod aggregator;
pub mod engine;
pub mod period;
pub mod series;
pub mod tree;

pub use engine::{
    CategoryAmounts, CategoryStatItem, CategoryStatsEngine, PresentationLabels, StatNode,
};
pub use period::{DateRange, MonthPeriod};
pub use series::{CategorySeries, MonthlySeriesBuilder, SeriesPoint};
pub use tree::{CategoryForest, CategoryTreeBuilder, CategoryTreeNode};
