pub mod statistics_service;

pub use statistics_service::{CategoryStatsReport, CategoryTreeItem, StatisticsService, StatsQuery};

use crate::errors::StatsError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error("{0}")]
    Invalid(String),
}
