//! Customer inquiry (RFQ) state machine and connectors.

pub mod connector;
pub mod service;
pub mod types;

pub use connector::{InquiryConnector, InquiryQuoteConnector};
pub use service::InquiryService;
pub use types::{Inquiry, InquiryState};
