//! # Bondmesh: Treasury middle-office pipeline
//!
//! A publish/subscribe service mesh for a small set of U.S. Treasuries:
//! - keyed services with synchronous, ordered listener fan-out
//! - market-data -> algo-execution -> execution -> trade-booking chain
//! - pricing -> algo-streaming -> streaming chain with a size ladder
//! - per-book positions and bucketed PV01 risk
//! - inquiry state machine, GUI throttle, and append-only audit sinks

pub mod config;
pub mod pipeline;

pub use config::AppConfig;
pub use pipeline::Pipeline;

pub use execution;
pub use historical;
pub use inquiry;
pub use market_data;
pub use products;
pub use risk_manager;
pub use service_core;
pub use streaming;
pub use trade_booking;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.trim().is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "bondmesh");
    }
}
