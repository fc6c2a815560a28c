use crate::connector::HistoricalDataConnector;
use crate::record::PersistRecord;
use service_core::{Connector, KeyedStore, ListenerSet, Result, Service, ServiceListener};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::error;

/// Which upstream service a historical sink persists; selects the output
/// filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    Position,
    Risk,
    Execution,
    Streaming,
    Inquiry,
}

impl ServiceType {
    pub fn filename(&self) -> &'static str {
        match self {
            ServiceType::Position => "positions.txt",
            ServiceType::Risk => "risk.txt",
            ServiceType::Execution => "executions.txt",
            ServiceType::Streaming => "streaming.txt",
            ServiceType::Inquiry => "allinquiries.txt",
        }
    }

    pub fn path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.filename())
    }
}

/// Persists values from one upstream service to its append-only store.
pub struct HistoricalDataService<V: PersistRecord + Clone> {
    service_type: ServiceType,
    data: KeyedStore<V>,
    listeners: ListenerSet<V>,
    connector: HistoricalDataConnector<V>,
}

impl<V: PersistRecord + Clone + Send + Sync> HistoricalDataService<V> {
    pub fn new(service_type: ServiceType, output_dir: &Path) -> Self {
        Self {
            service_type,
            data: KeyedStore::new(),
            listeners: ListenerSet::new(),
            connector: HistoricalDataConnector::new(service_type.path(output_dir)),
        }
    }

    #[inline]
    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Persist one value: record it in the keyed store and append its audit
    /// line. A failed write is logged and the record dropped; persistence
    /// errors never travel back up the fan-out.
    pub fn persist_data(&self, persist_key: &str, value: &V) {
        self.data.insert(persist_key.to_string(), value.clone());
        if let Err(err) = self.connector.publish(value.clone()) {
            error!(
                %err,
                path = %self.connector.path().display(),
                "historical record dropped"
            );
        }
    }
}

impl<V: PersistRecord + Clone + Send + Sync> Service<V> for HistoricalDataService<V> {
    fn get_data(&self, key: &str) -> Option<V> {
        self.data.get(key)
    }

    fn on_message(&self, value: V) -> Result<()> {
        self.data.insert(value.persist_key(), value);
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<V>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// The listener a historical sink registers on its source service.
pub struct HistoricalDataListener<V: PersistRecord + Clone> {
    service: Arc<HistoricalDataService<V>>,
}

impl<V: PersistRecord + Clone + Send + Sync> HistoricalDataListener<V> {
    pub fn new(service: Arc<HistoricalDataService<V>>) -> Self {
        Self { service }
    }
}

impl<V: PersistRecord + Clone + Send + Sync> ServiceListener<V> for HistoricalDataListener<V> {
    fn process_add(&self, value: &V) {
        self.service.persist_data(&value.persist_key(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inquiry::{Inquiry, InquiryState};
    use rust_decimal_macros::dec;
    use trade_booking::TradeSide;

    fn inquiry(state: InquiryState) -> Inquiry {
        Inquiry {
            inquiry_id: "I1".to_string(),
            product: products::bond_for_ticker("2Y").unwrap(),
            side: TradeSide::Buy,
            quantity: 1_000_000,
            price: dec!(100),
            state,
        }
    }

    #[test]
    fn every_observed_value_appends_a_line() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(HistoricalDataService::<Inquiry>::new(
            ServiceType::Inquiry,
            dir.path(),
        ));
        let listener = HistoricalDataListener::new(Arc::clone(&sink));

        for state in [
            InquiryState::Received,
            InquiryState::Quoted,
            InquiryState::Done,
        ] {
            listener.process_add(&inquiry(state));
        }

        let contents =
            std::fs::read_to_string(dir.path().join("allinquiries.txt")).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.contains("RECEIVED"));
        assert!(contents.contains("QUOTED"));
        assert!(contents.contains("DONE"));

        // the keyed store holds the latest value only
        assert_eq!(
            sink.get_data("I1").unwrap().state,
            InquiryState::Done
        );
    }

    #[test]
    fn service_types_map_to_fixed_filenames() {
        let base = Path::new("outputs");
        assert_eq!(
            ServiceType::Position.path(base),
            PathBuf::from("outputs/positions.txt")
        );
        assert_eq!(ServiceType::Risk.filename(), "risk.txt");
        assert_eq!(ServiceType::Execution.filename(), "executions.txt");
        assert_eq!(ServiceType::Streaming.filename(), "streaming.txt");
        assert_eq!(ServiceType::Inquiry.filename(), "allinquiries.txt");
    }
}
