//! Two-phase assembly of the service graph: construct every service first,
//! then install the cross-service listeners. Services live in `Arc`s owned
//! here; listeners hold non-owning handles into that set, and the wired
//! topology is acyclic.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use execution::{
    AlgoExecutionBookListener, AlgoExecutionService, ExecutionAlgoListener, ExecutionOrder,
    ExecutionService,
};
use historical::{HistoricalDataListener, HistoricalDataService, ServiceType};
use inquiry::{Inquiry, InquiryConnector, InquiryService};
use market_data::{MarketDataConnector, MarketDataService};
use products::Bond;
use risk_manager::{
    Position, PositionService, PositionToTradeListener, Pv01, RiskService, RiskToPositionListener,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use streaming::{
    AlgoStreamingPriceListener, AlgoStreamingService, GuiPriceListener, GuiService, PriceStream,
    PricingConnector, PricingService, StreamingAlgoListener, StreamingService,
};
use trade_booking::{ExecutionToTradeListener, TradeBookingConnector, TradeBookingService};
use tracing::{info, warn};

pub struct Pipeline {
    config: AppConfig,

    market_data: Arc<MarketDataService>,
    algo_execution: Arc<AlgoExecutionService>,
    execution: Arc<ExecutionService>,
    trade_booking: Arc<TradeBookingService>,
    positions: Arc<PositionService>,
    risk: Arc<RiskService>,

    pricing: Arc<PricingService>,
    algo_streaming: Arc<AlgoStreamingService>,
    streaming: Arc<StreamingService>,
    gui: Arc<GuiService>,

    inquiries: Arc<InquiryService>,

    historical_positions: Arc<HistoricalDataService<Position>>,
    historical_risk: Arc<HistoricalDataService<Pv01<Bond>>>,
    historical_executions: Arc<HistoricalDataService<ExecutionOrder>>,
    historical_streams: Arc<HistoricalDataService<PriceStream>>,
    historical_inquiries: Arc<HistoricalDataService<Inquiry>>,
}

impl Pipeline {
    /// Phase 1: instantiate every service. Nothing is wired yet.
    pub fn new(config: AppConfig) -> Self {
        let output_dir = config.output_dir.clone();
        let gui = Arc::new(GuiService::new(
            config.gui.throttle_millis,
            config.gui.max_updates,
            config.gui.output.clone(),
        ));

        Self {
            market_data: Arc::new(MarketDataService::new(config.depth)),
            algo_execution: Arc::new(AlgoExecutionService::new()),
            execution: Arc::new(ExecutionService::new()),
            trade_booking: Arc::new(TradeBookingService::new()),
            positions: Arc::new(PositionService::new()),
            risk: Arc::new(RiskService::new()),
            pricing: Arc::new(PricingService::new()),
            algo_streaming: Arc::new(AlgoStreamingService::new()),
            streaming: Arc::new(StreamingService::new()),
            gui,
            inquiries: InquiryService::new(),
            historical_positions: Arc::new(HistoricalDataService::new(
                ServiceType::Position,
                &output_dir,
            )),
            historical_risk: Arc::new(HistoricalDataService::new(ServiceType::Risk, &output_dir)),
            historical_executions: Arc::new(HistoricalDataService::new(
                ServiceType::Execution,
                &output_dir,
            )),
            historical_streams: Arc::new(HistoricalDataService::new(
                ServiceType::Streaming,
                &output_dir,
            )),
            historical_inquiries: Arc::new(HistoricalDataService::new(
                ServiceType::Inquiry,
                &output_dir,
            )),
            config,
        }
    }

    /// Phase 2: install the cross-service listeners, leaves last.
    pub fn wire(&self) {
        use service_core::Service;

        // market data -> algo execution -> execution -> booking
        self.market_data.add_listener(Arc::new(AlgoExecutionBookListener::new(
            Arc::clone(&self.algo_execution),
            Arc::clone(&self.market_data),
        )));
        self.algo_execution.add_listener(Arc::new(
            ExecutionAlgoListener::new(Arc::clone(&self.execution)),
        ));
        self.execution.add_listener(Arc::new(
            HistoricalDataListener::new(Arc::clone(&self.historical_executions)),
        ));
        self.execution.add_listener(Arc::new(
            ExecutionToTradeListener::new(Arc::clone(&self.trade_booking)),
        ));

        // booking -> positions -> risk
        self.trade_booking.add_listener(Arc::new(
            PositionToTradeListener::new(Arc::clone(&self.positions)),
        ));
        self.positions.add_listener(Arc::new(RiskToPositionListener::new(
            Arc::clone(&self.risk),
        )));
        self.positions.add_listener(Arc::new(HistoricalDataListener::new(
            Arc::clone(&self.historical_positions),
        )));
        self.risk.add_listener(Arc::new(HistoricalDataListener::new(
            Arc::clone(&self.historical_risk),
        )));

        // pricing -> algo streaming -> streaming, plus the GUI throttle
        self.pricing.add_listener(Arc::new(AlgoStreamingPriceListener::new(
            Arc::clone(&self.algo_streaming),
        )));
        self.pricing
            .add_listener(Arc::new(GuiPriceListener::new(Arc::clone(&self.gui))));
        self.algo_streaming.add_listener(Arc::new(StreamingAlgoListener::new(
            Arc::clone(&self.streaming),
        )));
        self.streaming.add_listener(Arc::new(HistoricalDataListener::new(
            Arc::clone(&self.historical_streams),
        )));

        // inquiries
        self.inquiries.add_listener(Arc::new(HistoricalDataListener::new(
            Arc::clone(&self.historical_inquiries),
        )));
    }

    /// Construct and wire in one call.
    pub fn build(config: AppConfig) -> Self {
        let pipeline = Self::new(config);
        pipeline.wire();
        pipeline
    }

    /// Drain the four input feeds in order. A missing or unreadable feed is
    /// fatal for that source only.
    pub fn run(&self) -> Result<()> {
        let inputs = self.config.inputs.clone();

        self.drive_source(&inputs.trades, "trades", |reader| {
            TradeBookingConnector::new(Arc::clone(&self.trade_booking))
                .subscribe(reader)
                .map(|_| ())
        });
        self.drive_source(&inputs.marketdata, "marketdata", |reader| {
            MarketDataConnector::new(Arc::clone(&self.market_data))
                .subscribe(reader)
                .map(|_| ())
        });
        self.drive_source(&inputs.prices, "prices", |reader| {
            PricingConnector::new(Arc::clone(&self.pricing))
                .subscribe(reader)
                .map(|_| ())
        });
        self.drive_source(&inputs.inquiries, "inquiries", |reader| {
            InquiryConnector::new(Arc::clone(&self.inquiries))
                .subscribe(reader)
                .map(|_| ())
        });

        Ok(())
    }

    fn drive_source<F>(&self, path: &Path, name: &str, subscribe: F)
    where
        F: FnOnce(BufReader<File>) -> service_core::Result<()>,
    {
        let opened = File::open(path)
            .with_context(|| format!("opening {} feed at {}", name, path.display()));
        match opened {
            Ok(file) => {
                info!(feed = name, path = %path.display(), "subscribing");
                if let Err(err) = subscribe(BufReader::new(file)) {
                    warn!(feed = name, %err, "feed aborted");
                }
            }
            Err(err) => warn!(feed = name, %err, "feed skipped"),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn market_data(&self) -> &Arc<MarketDataService> {
        &self.market_data
    }

    pub fn algo_execution(&self) -> &Arc<AlgoExecutionService> {
        &self.algo_execution
    }

    pub fn execution(&self) -> &Arc<ExecutionService> {
        &self.execution
    }

    pub fn trade_booking(&self) -> &Arc<TradeBookingService> {
        &self.trade_booking
    }

    pub fn positions(&self) -> &Arc<PositionService> {
        &self.positions
    }

    pub fn risk(&self) -> &Arc<RiskService> {
        &self.risk
    }

    pub fn pricing(&self) -> &Arc<PricingService> {
        &self.pricing
    }

    pub fn algo_streaming(&self) -> &Arc<AlgoStreamingService> {
        &self.algo_streaming
    }

    pub fn streaming(&self) -> &Arc<StreamingService> {
        &self.streaming
    }

    pub fn gui(&self) -> &Arc<GuiService> {
        &self.gui
    }

    pub fn inquiries(&self) -> &Arc<InquiryService> {
        &self.inquiries
    }

    pub fn historical_inquiries(&self) -> &Arc<HistoricalDataService<Inquiry>> {
        &self.historical_inquiries
    }
}
