use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::{DequeMetricsSnapshot, StoreMetricsSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for container metrics snapshots.
///
/// Writes in the Prometheus text exposition format so the output can be
/// scraped directly or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<DequeMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &DequeMetricsSnapshot) {
        self.write_counter(&self.metric_name("inserts_total"), snapshot.inserts);
        self.write_counter(&self.metric_name("removals_total"), snapshot.removals);
        self.write_counter(&self.metric_name("evictions_total"), snapshot.evictions);
        self.write_counter(
            &self.metric_name("empty_removals_total"),
            snapshot.empty_removals,
        );
        self.write_gauge(&self.metric_name("len"), snapshot.len as u64);
        self.write_gauge(&self.metric_name("limit"), snapshot.limit as u64);
    }
}

impl<W: Write + Send> MetricsExporter<StoreMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &StoreMetricsSnapshot) {
        self.write_counter(&self.metric_name("inserts_total"), snapshot.inserts);
        self.write_counter(&self.metric_name("updates_total"), snapshot.updates);
        self.write_counter(&self.metric_name("removes_total"), snapshot.removes);
        self.write_counter(&self.metric_name("clears_total"), snapshot.clears);
        self.write_counter(&self.metric_name("lookups_total"), snapshot.lookups);
        self.write_counter(&self.metric_name("misses_total"), snapshot.misses);
        self.write_gauge(&self.metric_name("len"), snapshot.len as u64);
    }
}
