use crate::types::Price;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use products::format_timestamp;
use service_core::{KeyedStore, ListenerSet, Result, Service, ServiceListener};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

struct ThrottleState {
    last_update: Option<DateTime<Utc>>,
    emitted: u32,
}

/// Rate-limited GUI sink on price events.
///
/// A price is recorded only when at least `throttle_millis` have elapsed
/// since the previous recorded update and fewer than `max_updates` have been
/// emitted; everything else is silently dropped.
pub struct GuiService {
    updates: KeyedStore<Price>,
    listeners: ListenerSet<Price>,
    throttle_millis: i64,
    max_updates: u32,
    state: Mutex<ThrottleState>,
    output: PathBuf,
}

impl GuiService {
    pub fn new(throttle_millis: i64, max_updates: u32, output: impl Into<PathBuf>) -> Self {
        Self {
            updates: KeyedStore::new(),
            listeners: ListenerSet::new(),
            throttle_millis,
            max_updates,
            state: Mutex::new(ThrottleState {
                last_update: None,
                emitted: 0,
            }),
            output: output.into(),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u32 {
        self.state.lock().emitted
    }

    /// Throttle decision and write, with the clock passed in. The elapsed
    /// time is computed in milliseconds directly.
    pub fn on_price_at(&self, price: &Price, now: DateTime<Utc>) -> bool {
        {
            let mut state = self.state.lock();
            let elapsed_ok = state
                .last_update
                .map_or(true, |last| (now - last).num_milliseconds() >= self.throttle_millis);
            if !elapsed_ok || state.emitted >= self.max_updates {
                return false;
            }
            state.emitted += 1;
            state.last_update = Some(now);
        }

        self.updates
            .insert(price.product_id().to_string(), price.clone());
        self.write_record(price, now);
        true
    }

    fn write_record(&self, price: &Price, now: DateTime<Utc>) {
        let line = format!(
            "{},{},{},{}\n",
            format_timestamp(now),
            price.product_id(),
            price.mid,
            price.bid_offer_spread
        );
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(err) = written {
            error!(%err, path = %self.output.display(), "gui record dropped");
        }
    }
}

impl Service<Price> for GuiService {
    fn get_data(&self, key: &str) -> Option<Price> {
        self.updates.get(key)
    }

    fn on_message(&self, price: Price) -> Result<()> {
        self.on_price_at(&price, Utc::now());
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<Price>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Edge from pricing into the GUI sink.
pub struct GuiPriceListener {
    service: Arc<GuiService>,
}

impl GuiPriceListener {
    pub fn new(service: Arc<GuiService>) -> Self {
        Self { service }
    }
}

impl ServiceListener<Price> for GuiPriceListener {
    fn process_add(&self, price: &Price) {
        if let Err(err) = self.service.on_message(price.clone()) {
            error!(%err, "gui update failed");
        }
    }
}
