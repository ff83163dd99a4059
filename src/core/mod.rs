pub mod metrics;
pub mod types;

pub use types::{
    BacklinkRecord, CompetitorDomainRecord, DomainMetricSnapshot, KeywordRecord,
    PositionHistogram, TrendCounters, UNRANKED_POSITION,
};
