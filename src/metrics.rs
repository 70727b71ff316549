use std::net::SocketAddr;
use tracing::{info, warn};

/// Install the Prometheus exporter when a port is configured. Without one
/// the `metrics` macros stay no-ops.
pub fn init_metrics(port: Option<u16>) {
    let Some(port) = port else {
        info!("Metrics exporter disabled");
        return;
    };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            info!("Prometheus exporter listening on http://{}/metrics", addr);
        }
        Err(e) => {
            warn!("Prometheus exporter install failed (possibly already installed): {}", e);
        }
    }
}
