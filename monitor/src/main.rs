use anyhow::Result;
use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use validator_monitor::config::ConfigManager;
use validator_monitor::dashboard::{self, DashboardPublisher, DashboardSender};
use validator_monitor::start_chain;
use validator_monitor::web::{start_web_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("validator_monitor=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting Validator Signing Monitor");

    let config_dir = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let config_manager = ConfigManager::new(config_dir).await?;
    let config = config_manager.get_current_config();
    info!(
        "Configuration loaded: {} chains, block check every {}s, node probe every {}s",
        config.chains.len(),
        config.block_check_interval_seconds,
        config.node_probe_interval_seconds
    );

    let cancel = CancellationToken::new();
    let publisher = DashboardPublisher::new(config.dashboard_webhook_url.clone())?;

    let (sender, publisher_task) = if config.dashboard_enabled {
        let (sender, rx) = dashboard::channel(config.dashboard_channel_capacity);
        let task = tokio::spawn(publisher.clone().run(rx, cancel.clone()));
        (sender, Some(task))
    } else {
        warn!("Dashboard disabled, status snapshots will not be published");
        (DashboardSender::disabled(), None)
    };

    let mut chain_tasks = Vec::new();
    for (name, chain_config) in &config.chains {
        match start_chain(name, chain_config, &config, sender.clone(), cancel.clone()).await {
            Ok(handles) => {
                info!("Monitoring {} ({})", name, chain_config.chain_id);
                chain_tasks.extend(handles);
            }
            Err(e) => error!("Could not start monitoring for {}: {}", name, e),
        }
    }
    drop(sender);

    if chain_tasks.is_empty() {
        warn!("No chains are being monitored");
    }

    let server_cancel = cancel.clone();
    let state = AppState::new(config.clone(), publisher);
    let server = tokio::spawn(async move {
        if let Err(e) = start_web_server(state, server_cancel).await {
            error!("Status API stopped: {}", e);
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested, stopping monitors");
    cancel.cancel();

    join_all(chain_tasks).await;
    if let Some(task) = publisher_task {
        let _ = task.await;
    }
    let _ = server.await;

    info!("Validator Signing Monitor stopped");
    Ok(())
}
