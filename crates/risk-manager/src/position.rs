use products::Bond;
use serde::{Deserialize, Serialize};
use service_core::{KeyedStore, ListenerSet, Result, Service, ServiceListener};
use std::collections::BTreeMap;
use std::sync::Arc;
use trade_booking::{Book, Trade};

/// Signed position per book for one product.
///
/// All three books are present from construction, initialized to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub product: Bond,
    positions: BTreeMap<Book, i64>,
}

impl Position {
    pub fn new(product: Bond) -> Self {
        let positions = Book::ALL.iter().map(|book| (*book, 0i64)).collect();
        Self { product, positions }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        self.product.product_id()
    }

    #[inline]
    pub fn position(&self, book: Book) -> i64 {
        self.positions.get(&book).copied().unwrap_or(0)
    }

    pub fn update_position(&mut self, book: Book, quantity: i64) {
        *self.positions.entry(book).or_insert(0) += quantity;
    }

    /// Sum across all books.
    pub fn aggregate_position(&self) -> i64 {
        self.positions.values().sum()
    }

    pub fn books(&self) -> impl Iterator<Item = (Book, i64)> + '_ {
        self.positions.iter().map(|(book, qty)| (*book, *qty))
    }
}

/// Positions across books and securities, keyed on product identifier.
///
/// Cumulative positions stay private to the service; listeners observe only
/// the per-trade delta position.
pub struct PositionService {
    positions: KeyedStore<Position>,
    listeners: ListenerSet<Position>,
}

impl PositionService {
    pub fn new() -> Self {
        Self {
            positions: KeyedStore::new(),
            listeners: ListenerSet::new(),
        }
    }

    /// Apply a trade to the cumulative position and fan out the delta.
    pub fn add_trade(&self, trade: &Trade) {
        let signed = trade.signed_quantity();

        self.positions.upsert(
            trade.product_id(),
            Position::new(trade.product.clone()),
            |position| position.update_position(trade.book, signed),
        );

        let mut delta = Position::new(trade.product.clone());
        delta.update_position(trade.book, signed);
        self.listeners.notify_add(&delta);
    }
}

impl Default for PositionService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Position> for PositionService {
    fn get_data(&self, key: &str) -> Option<Position> {
        self.positions.get(key)
    }

    fn on_message(&self, position: Position) -> Result<()> {
        self.positions
            .insert(position.product_id().to_string(), position);
        Ok(())
    }

    fn add_listener(&self, listener: Arc<dyn ServiceListener<Position>>) {
        self.listeners.add(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Edge from trade booking into position keeping.
pub struct PositionToTradeListener {
    service: Arc<PositionService>,
}

impl PositionToTradeListener {
    pub fn new(service: Arc<PositionService>) -> Self {
        Self { service }
    }
}

impl ServiceListener<Trade> for PositionToTradeListener {
    fn process_add(&self, trade: &Trade) {
        self.service.add_trade(trade);
    }
}
