use log::{error, info};
use premium_engine::{init_logging, EngineConfig, PremiumEngine, RefreshTask};
use tokio::time::interval;

/// Console premium monitor: captures on a fixed cadence and prints the
/// domestic premiums plus the gap between the two venues.
#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("failed to initialize logging: {}", e);
        return;
    }

    let config = EngineConfig::from_env();
    info!(
        "premium monitor starting: {} vs {} every {:?}",
        config.symbol, config.domestic_market, config.refresh_interval
    );

    let engine = match PremiumEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let refresh = RefreshTask::spawn(engine.aggregator(), config.refresh_interval);

    println!("time     | domestic_a | domestic_b | gap");
    println!("{}", "-".repeat(50));

    let mut ticker = interval(config.refresh_interval);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
            _ = ticker.tick() => {
                if let Some(snapshot) = engine.history().await.last() {
                    let gap = snapshot.premium_a - snapshot.premium_b;
                    println!(
                        "[{}] {:>6}% | {:>6}% | {:>6}%",
                        snapshot.captured_at.format("%H:%M:%S"),
                        snapshot.premium_a.value().round_dp(2),
                        snapshot.premium_b.value().round_dp(2),
                        gap.round_dp(2),
                    );
                }
            }
        }
    }

    refresh.shutdown().await;
}
