//! Metrics collection and exposition.
//!
//! # Metrics
//! - `walletflow_transfers_submitted_total` (counter): accepted submits
//! - `walletflow_transfers_confirmed_total` (counter): confirmed transfers
//! - `walletflow_transfers_failed_total` (counter): failures by stage
//! - `walletflow_rpc_healthy` (gauge): 1=reachable, 0=unreachable

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
///
/// Failure to bind is logged and otherwise ignored; metrics are never worth
/// taking the tool down for.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_transfer_submitted() {
    metrics::counter!("walletflow_transfers_submitted_total").increment(1);
}

pub fn record_transfer_confirmed() {
    metrics::counter!("walletflow_transfers_confirmed_total").increment(1);
}

/// `stage` is one of "broadcast", "reverted", "receipt".
pub fn record_transfer_failed(stage: &'static str) {
    metrics::counter!("walletflow_transfers_failed_total", "stage" => stage).increment(1);
}

pub fn record_rpc_health(healthy: bool) {
    metrics::gauge!("walletflow_rpc_healthy").set(if healthy { 1.0 } else { 0.0 });
}
