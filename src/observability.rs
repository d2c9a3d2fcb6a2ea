use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: seats successfully booked.
pub const BOOKINGS_TOTAL: &str = "muster_bookings_total";

/// Counter: book attempts rejected because the slot was full.
pub const BOOKINGS_REJECTED_TOTAL: &str = "muster_bookings_rejected_total";

/// Counter: bookings cancelled.
pub const CANCELLATIONS_TOTAL: &str = "muster_cancellations_total";

/// Counter: waitlist entries promoted into bookings.
pub const PROMOTIONS_TOTAL: &str = "muster_promotions_total";

/// Counter: waitlist joins.
pub const WAITLIST_JOINS_TOTAL: &str = "muster_waitlist_joins_total";

/// Counter: voluntary waitlist withdrawals.
pub const WAITLIST_WITHDRAWALS_TOTAL: &str = "muster_waitlist_withdrawals_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: slots currently live (created minus archived).
pub const SLOTS_ACTIVE: &str = "muster_slots_active";

/// Counter: slots created.
pub const SLOTS_CREATED_TOTAL: &str = "muster_slots_created_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}
