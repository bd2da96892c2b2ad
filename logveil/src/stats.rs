// logveil/src/stats.rs
//! A metrics collector that counts redactions per PII type, backing `--stats`.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Mutex;

use logveil_core::{MetricsCollector, MetricsContext};

#[derive(Debug, Default)]
struct Counts {
    fields_seen: usize,
    redacted: BTreeMap<String, usize>,
}

/// Thread-safe redaction counter.
#[derive(Debug, Default)]
pub struct RedactionStats {
    counts: Mutex<Counts>,
}

impl RedactionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-empty values inspected.
    pub fn fields_seen(&self) -> usize {
        self.counts.lock().map(|c| c.fields_seen).unwrap_or_default()
    }

    /// Redaction counts keyed by PII type, sorted by type.
    pub fn by_type(&self) -> BTreeMap<String, usize> {
        self.counts.lock().map(|c| c.redacted.clone()).unwrap_or_default()
    }

    pub fn total_redacted(&self) -> usize {
        self.by_type().values().sum()
    }

    pub fn write_summary<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let by_type = self.by_type();
        writeln!(
            writer,
            "Redaction summary: {} of {} values redacted",
            by_type.values().sum::<usize>(),
            self.fields_seen()
        )?;
        for (pii_type, count) in &by_type {
            writeln!(writer, "  {}: {}", pii_type, count)?;
        }
        Ok(())
    }
}

impl MetricsCollector for RedactionStats {
    fn record(&self, context: MetricsContext) {
        let mut counts = match self.counts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        counts.fields_seen += 1;
        if context.redacted {
            *counts.redacted.entry(context.pii_type).or_insert(0) += 1;
        }
    }
}
