use crate::position::Position;
use products::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::{KeyedStore, ListenerSet, Result, Service, ServiceError, ServiceListener};
use std::sync::Arc;
use tracing::warn;

/// PV01 exposure: a per-unit risk constant and the quantity it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pv01<T> {
    pub product: T,
    pub pv01: Decimal,
    pub quantity: i64,
}

impl<T> Pv01<T> {
    pub fn new(product: T, pv01: Decimal, quantity: i64) -> Self {
        Self {
            product,
            pv01,
            quantity,
        }
    }

    pub fn update_quantity(&mut self, quantity: i64) {
        self.quantity += quantity;
    }
}

/// A named group of products whose risk aggregates to one number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketedSector {
    pub products: Vec<Bond>,
    pub name: String,
}

impl BucketedSector {
    pub fn new(products: Vec<Bond>, name: impl Into<String>) -> Self {
        Self {
            products,
            name: name.into(),
        }
    }

    /// A sector's product id is its name.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.name
    }
}

/// Risk for one bucketed sector, standing as a single risk unit.
pub type SectorRisk = Pv01<BucketedSector>;

/// The standard tenor bucketing of the seven on-the-run Treasuries.
pub fn standard_sectors() -> Vec<BucketedSector> {
    let bucket = |tickers: &[&str], name: &str| {
        BucketedSector::new(
            tickers
                .iter()
                .filter_map(|t| products::bond_for_ticker(t))
                .collect(),
            name,
        )
    };
    vec![
        bucket(&["2Y", "3Y"], "FrontEnd"),
        bucket(&["5Y", "7Y", "10Y"], "Belly"),
        bucket(&["20Y", "30Y"], "LongEnd"),
    ]
}

/// Vends PV01 risk per security and per bucketed sector, keyed on product
/// identifier.
pub struct RiskService {
    risks: KeyedStore<Pv01<Bond>>,
    listeners: ListenerSet<Pv01<Bond>>,
}

impl RiskService {
    pub fn new() -> Self {
        Self {
            risks: KeyedStore::new(),
            listeners: ListenerSet::new(),
        }
    }

    /// Fold a position delta into the product's risk and fan out the
    /// updated cumulative PV01.
    pub fn add_position(&self, position: &Position) -> Result<()> {
        let product_id = position.product_id();
        let pv01 = products::pv01_for(product_id)
            .ok_or_else(|| ServiceError::UnknownProduct(product_id.to_string()))?;

        let updated = self.risks.upsert(
            product_id,
            Pv01::new(position.product.clone(), pv01, 0),
            |risk| risk.update_quantity(position.aggregate_position()),
        );
        self.listeners.notify_add(&updated);
        Ok(())
    }

    /// Aggregate risk for a sector: sum of pv01 x quantity over its
    /// products, with the sector standing as a single unit.
    pub fn bucketed_risk(&self, sector: &BucketedSector) -> SectorRisk {
        let total = sector
            .products
            .iter()
            .filter_map(|product| self.risks.get(product.product_id()))
            .map(|risk| risk.pv01 * Decimal::from(risk.quantity))
            .sum();
        Pv01::new(sector.clone(), total, 1)
    }
}

impl Default for RiskService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Pv01<Bond>> for RiskService {
    fn get_data(&self, key: &str) -> Option<Pv01<Bond>> {
        self.risks.get(key)
    }

    fn on_message(&self, risk: Pv01<Bond>) -> Result<()> {
        self.risks
            .insert(risk.product.product_id().to_string(), risk);
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<Pv01<Bond>>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Edge from position keeping into risk.
pub struct RiskToPositionListener {
    service: Arc<RiskService>,
}

impl RiskToPositionListener {
    pub fn new(service: Arc<RiskService>) -> Self {
        Self { service }
    }
}

impl ServiceListener<Position> for RiskToPositionListener {
    fn process_add(&self, position: &Position) {
        if let Err(err) = self.service.add_position(position) {
            warn!(%err, "position delta dropped by risk");
        }
    }
}
