//! Per-book position keeping and PV01 risk aggregation.

pub mod position;
pub mod risk;

pub use position::{Position, PositionService, PositionToTradeListener};
pub use risk::{
    standard_sectors, BucketedSector, Pv01, RiskService, RiskToPositionListener, SectorRisk,
};
