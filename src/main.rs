use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use diabetes_risk::adapters::{
    build_router, FileDatasetSource, LocalModelScorer, RemoteScorer, RemoteScorerConfig,
    RiskAppState, RuleBasedScorer,
};
use diabetes_risk::application::{RiskOrchestrator, TrainModelHandler};
use diabetes_risk::config::{AppConfig, ScoringMode};
use diabetes_risk::domain::model::ModelSlot;
use diabetes_risk::ports::RiskScorer;
use diabetes_risk::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let model_slot = ModelSlot::new();
    match &config.training.dataset_path {
        Some(path) => {
            let handler = TrainModelHandler::new(
                Arc::new(FileDatasetSource::new(path)),
                config.training.settings(),
            );
            if let Err(e) = handler.train_and_publish(&model_slot).await {
                error!(error = %e, "Startup training failed; model endpoints stay unavailable");
            }
        }
        None => warn!("No training dataset configured; model endpoints stay unavailable"),
    }

    let primary: Arc<dyn RiskScorer> = match config.scoring.mode {
        ScoringMode::Remote => Arc::new(RemoteScorer::new(
            RemoteScorerConfig::new(&config.scoring.base_url)
                .with_timeout(config.scoring.timeout()),
        )?),
        ScoringMode::Local => Arc::new(LocalModelScorer::new(model_slot.clone())),
        ScoringMode::Rules => Arc::new(RuleBasedScorer::default()),
    };
    let orchestrator = RiskOrchestrator::new(primary).with_timeout(config.scoring.timeout());

    let app = build_router(
        RiskAppState::new(Arc::new(orchestrator), model_slot),
        &config.server,
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, mode = ?config.scoring.mode, "Diabetes risk service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
