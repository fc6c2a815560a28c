use chrono::{DateTime, Utc};
use execution::ExecutionOrder;
use inquiry::Inquiry;
use products::{format_timestamp, Bond};
use risk_manager::{Position, Pv01};
use streaming::PriceStream;
use trade_booking::Book;

/// A value the historical service can persist: a stable key and a
/// timestamped, comma-separated audit line.
pub trait PersistRecord {
    fn persist_key(&self) -> String;

    fn persist_line(&self, at: DateTime<Utc>) -> String;
}

impl PersistRecord for Position {
    fn persist_key(&self) -> String {
        self.product_id().to_string()
    }

    /// `ts,product,trsy1,trsy2,trsy3,aggregate`
    fn persist_line(&self, at: DateTime<Utc>) -> String {
        format!(
            "{},{},{},{},{},{}",
            format_timestamp(at),
            self.product_id(),
            self.position(Book::Trsy1),
            self.position(Book::Trsy2),
            self.position(Book::Trsy3),
            self.aggregate_position()
        )
    }
}

impl PersistRecord for Pv01<Bond> {
    fn persist_key(&self) -> String {
        self.product.product_id().to_string()
    }

    /// `ts,product,pv01,quantity`
    fn persist_line(&self, at: DateTime<Utc>) -> String {
        format!(
            "{},{},{},{}",
            format_timestamp(at),
            self.product.product_id(),
            self.pv01,
            self.quantity
        )
    }
}

impl PersistRecord for ExecutionOrder {
    fn persist_key(&self) -> String {
        self.order_id.clone()
    }

    /// `ts,product,orderId,side,orderType,price,visibleQty,hiddenQty,isChild`
    fn persist_line(&self, at: DateTime<Utc>) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{}",
            format_timestamp(at),
            self.product_id(),
            self.order_id,
            self.side,
            self.order_type,
            self.price,
            self.visible_quantity,
            self.hidden_quantity,
            self.is_child_order
        )
    }
}

impl PersistRecord for PriceStream {
    fn persist_key(&self) -> String {
        self.product_id().to_string()
    }

    /// `ts,product,bidPrice,bidVisible,bidHidden,offerPrice,offerVisible,offerHidden`
    fn persist_line(&self, at: DateTime<Utc>) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            format_timestamp(at),
            self.product_id(),
            self.bid_order.price,
            self.bid_order.visible_quantity,
            self.bid_order.hidden_quantity,
            self.offer_order.price,
            self.offer_order.visible_quantity,
            self.offer_order.hidden_quantity
        )
    }
}

impl PersistRecord for Inquiry {
    fn persist_key(&self) -> String {
        self.inquiry_id.clone()
    }

    /// `ts,inquiryId,product,side,quantity,price,state`
    fn persist_line(&self, at: DateTime<Utc>) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            format_timestamp(at),
            self.inquiry_id,
            self.product_id(),
            self.side,
            self.quantity,
            self.price,
            self.state
        )
    }
}
