//! Execution chain: spread-crossing algo layer and the execution service it
//! feeds.

pub mod algo;
pub mod order_id;
pub mod service;
pub mod types;

pub use algo::{AlgoExecutionBookListener, AlgoExecutionService};
pub use order_id::OrderIdGenerator;
pub use service::{ExecutionAlgoListener, ExecutionService};
pub use types::{ExecutionOrder, Market, OrderType};
