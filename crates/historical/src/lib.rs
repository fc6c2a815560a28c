//! Append-only historical persistence: one typed writer per upstream
//! service, one timestamped line per observed value.

pub mod connector;
pub mod record;
pub mod service;

pub use connector::HistoricalDataConnector;
pub use record::PersistRecord;
pub use service::{HistoricalDataListener, HistoricalDataService, ServiceType};
