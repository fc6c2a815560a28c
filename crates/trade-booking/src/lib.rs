//! Trade booking: external trade ingest plus the execution-order echo that
//! books algo fills round-robin across the three Treasury books.

pub mod connector;
pub mod exec_listener;
pub mod service;
pub mod types;

pub use connector::TradeBookingConnector;
pub use exec_listener::ExecutionToTradeListener;
pub use service::TradeBookingService;
pub use types::{Book, Trade, TradeSide};
