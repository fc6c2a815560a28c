//! Service/Listener/Connector substrate for the middle-office event graph.
//!
//! Every stateful component in the pipeline is a keyed [`Service`]: it owns a
//! [`KeyedStore`] and a [`ListenerSet`], receives values through
//! [`Service::on_message`], and fans each value out synchronously to its
//! listeners in registration order. Listeners are the only cross-service
//! edge; the wired graph is acyclic.

pub mod connector;
pub mod error;
pub mod listener;
pub mod service;
pub mod store;

pub use connector::{split_fields, subscribe_lines, Connector};
pub use error::ServiceError;
pub use listener::{ListenerSet, ServiceListener};
pub use service::Service;
pub use store::KeyedStore;

pub type Result<T> = std::result::Result<T, ServiceError>;
