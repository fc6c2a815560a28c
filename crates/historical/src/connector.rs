use crate::record::PersistRecord;
use chrono::Utc;
use service_core::{Connector, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::marker::PhantomData;
use std::path::PathBuf;

/// Appends one audit line per published value to a fixed file.
///
/// The parent directory is created on first write. There is no rotation and
/// no durability guarantee beyond flush-on-close.
pub struct HistoricalDataConnector<V> {
    path: PathBuf,
    _marker: PhantomData<fn(V)>,
}

impl<V: PersistRecord> HistoricalDataConnector<V> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl<V: PersistRecord + Send + Sync> Connector<V> for HistoricalDataConnector<V> {
    fn publish(&self, value: V) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", value.persist_line(Utc::now()))?;
        Ok(())
    }
}
