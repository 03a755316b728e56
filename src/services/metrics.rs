//! Métricas Prometheus del ciclo de viajes

use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub trips_assigned_total: IntCounter,
    pub trips_completed_total: IntCounter,
    pub deliveries_recorded_total: IntCounter,
    pub invoices_generated_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let trips_assigned_total =
            IntCounter::new("trips_assigned_total", "Trips created through assignment")?;
        let trips_completed_total =
            IntCounter::new("trips_completed_total", "Trips closed through logout")?;
        let deliveries_recorded_total =
            IntCounter::new("deliveries_recorded_total", "Deliveries recorded by drivers")?;
        let invoices_generated_total =
            IntCounter::new("invoices_generated_total", "Invoices persisted")?;

        registry.register(Box::new(trips_assigned_total.clone()))?;
        registry.register(Box::new(trips_completed_total.clone()))?;
        registry.register(Box::new(deliveries_recorded_total.clone()))?;
        registry.register(Box::new(invoices_generated_total.clone()))?;

        Ok(Self {
            registry,
            trips_assigned_total,
            trips_completed_total,
            deliveries_recorded_total,
            invoices_generated_total,
        })
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_the_exposition() {
        let metrics = Metrics::new().unwrap();
        metrics.trips_assigned_total.inc();
        metrics.invoices_generated_total.inc_by(3);

        let text = metrics.encode().unwrap();
        assert!(text.contains("trips_assigned_total 1"));
        assert!(text.contains("invoices_generated_total 3"));
    }
}
