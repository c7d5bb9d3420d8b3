use anyhow::Result;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use mina_monitor::constants::config::CONFIG_DIR;
use mina_monitor::web::{server::shutdown_signal, start_status_server};
use mina_monitor::{ConfigManager, DockerCli, GraphQlStatusClient, MonitorLoop};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("mina_monitor=debug".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting mina-monitor");

    let config_manager = ConfigManager::new(CONFIG_DIR.to_string()).await?;
    let config = config_manager.get_current_config();

    let status_client = GraphQlStatusClient::from_config(&config)?;
    let docker = DockerCli::new(config.docker_binary.clone(), config.docker_timeout());
    let monitor = MonitorLoop::new(config.clone(), status_client, docker);
    let report = monitor.report();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    if let Some(address) = config.status_server_address.clone() {
        let server_shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            if let Err(e) = start_status_server(&address, report, server_shutdown).await {
                error!("Status server failed: {}", e);
            }
        });
    }

    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let out_of_sync_count = monitor.run(shutdown_rx).await;
    info!("Exiting after {} restart decisions", out_of_sync_count);

    Ok(())
}
