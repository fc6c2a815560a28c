//! Order-book market data: depth-N snapshot ingest and distribution.

pub mod connector;
pub mod service;
pub mod types;

pub use connector::MarketDataConnector;
pub use service::MarketDataService;
pub use types::{BidOffer, Order, OrderBook, PricingSide};
