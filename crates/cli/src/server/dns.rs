use ferrous_doh_application::use_cases::ForwardQueryUseCase;
use ferrous_doh_domain::Config;
use ferrous_doh_infrastructure::dns::{HttpsTransport, TcpDnsListener, UdpListener, WorkerPool};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Binds both listeners and serves until Ctrl-C.
///
/// A listener that fails to bind is logged and the other one keeps serving;
/// only when neither binds does this return an error.
pub async fn start_dns_server(config: &Config) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = config.server.listen_address().parse()?;
    let workers = WorkerPool::new(config.server.workers);

    let upstream = Arc::new(HttpsTransport::new(
        config.upstream.url.clone(),
        config.upstream.timeout(),
    )?);
    let handler = Arc::new(ForwardQueryUseCase::new(upstream));

    info!(
        bind_address = %socket_addr,
        num_workers = workers.size(),
        upstream = %config.upstream.url,
        timeout_ms = config.upstream.timeout_ms,
        "Starting DNS-over-HTTPS proxy"
    );

    let mut join_set: JoinSet<()> = JoinSet::new();

    match UdpListener::bind(
        socket_addr,
        config.server.udp_recv_buffer,
        handler.clone(),
        workers.clone(),
    ) {
        Ok(listener) => {
            join_set.spawn(async move {
                if let Err(e) = listener.run().await {
                    error!(error = %e, "UDP listener error");
                }
            });
        }
        Err(e) => error!(error = %e, "UDP listener unavailable"),
    }

    match TcpDnsListener::bind(
        socket_addr,
        config.server.tcp_read_timeout(),
        handler,
        workers,
    ) {
        Ok(listener) => {
            join_set.spawn(async move {
                if let Err(e) = listener.run().await {
                    error!(error = %e, "TCP listener error");
                }
            });
        }
        Err(e) => error!(error = %e, "TCP listener unavailable"),
    }

    if join_set.is_empty() {
        anyhow::bail!("Neither the UDP nor the TCP listener could bind {}", socket_addr);
    }

    info!(listeners = join_set.len(), "DNS proxy ready on {}", socket_addr);

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                }
                info!("Shutdown requested");
                join_set.abort_all();
                return Ok(());
            }
            joined = join_set.join_next() => {
                if joined.is_none() {
                    anyhow::bail!("All DNS listeners stopped");
                }
            }
        }
    }
}
