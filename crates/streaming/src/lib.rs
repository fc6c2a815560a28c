//! Pricing chain: mid/spread ingest, the alternating visible/hidden size
//! ladder, two-way stream publication, and the throttled GUI sink.

pub mod algo;
pub mod gui;
pub mod pricing;
pub mod service;
pub mod types;

pub use algo::{AlgoStreamingPriceListener, AlgoStreamingService};
pub use gui::{GuiPriceListener, GuiService};
pub use pricing::{PricingConnector, PricingService};
pub use service::{StreamingAlgoListener, StreamingService};
pub use types::{Price, PriceStream, PriceStreamOrder};
