use bondmesh::{AppConfig, Pipeline};
use service_core::Service;
use tracing::{info, warn, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Starting bondmesh v{}", bondmesh::VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_file(&path)?,
        None => match AppConfig::load_from_file("bondmesh.toml") {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, "no config file, using defaults");
                AppConfig::default()
            }
        },
    };

    let pipeline = Pipeline::build(config);
    pipeline.run()?;

    info!(
        trades = pipeline.trade_booking().trade_count(),
        gui_updates = pipeline.gui().emitted(),
        "pipeline drained"
    );

    for sector in risk_manager::standard_sectors() {
        let risk = pipeline.risk().bucketed_risk(&sector);
        info!(sector = %sector.name, pv01 = %risk.pv01, "bucketed risk");
    }

    for bond in products::all_bonds() {
        if let Some(position) = pipeline.positions().get_data(bond.product_id()) {
            info!(
                product = %bond,
                aggregate = position.aggregate_position(),
                "final position"
            );
        }
    }

    info!("bondmesh shutdown complete");
    Ok(())
}
