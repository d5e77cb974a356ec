//! Result sinks: a fixed-width text table and JSON.

use std::io::{self, Write};

use crate::bench::{ResultSink, ResultTable};
use crate::utils::round2;

const WIDTH: usize = 102;

/// Prints the results table the way the experiment has always reported it,
/// plus a SKIPPED column.
pub struct TableReport<W: Write> {
    out: W,
}

impl<W: Write> TableReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TableReport<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ResultSink for TableReport<W> {
    fn consume(&mut self, table: &ResultTable) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "{}", "=".repeat(WIDTH))?;
        writeln!(out, "{:^WIDTH$}", "FINAL EXPERIMENTAL RESULTS")?;
        writeln!(out, "{}", "=".repeat(WIDTH))?;
        writeln!(
            out,
            "| {:^10} | {:<12} | {:>12} | {:>12} | {:>12} | {:>12} | {:>10} |",
            "BATCH", "METHOD", "WRITE (ms)", "READ (ms)", "TPS", "SIZE (KB)", "SKIPPED"
        )?;
        writeln!(out, "{}", "-".repeat(WIDTH))?;

        // Rows in run order; a rule whenever the batch changes.
        let mut previous: Option<usize> = None;
        for r in table {
            if previous.is_some_and(|b| b != r.batch_size) {
                writeln!(out, "{}", "-".repeat(WIDTH))?;
            }
            previous = Some(r.batch_size);
            writeln!(
                out,
                "| {:^10} | {:<12} | {:>12.2} | {:>12.2} | {:>12.2} | {:>12.2} | {:>10} |",
                r.batch_size,
                r.strategy.label(),
                r.write_ms,
                r.read_ms,
                r.tps,
                round2(r.storage_kb),
                r.skipped()
            )?;
        }
        writeln!(out, "{}", "=".repeat(WIDTH))?;
        out.flush()
    }
}

/// Pretty-printed JSON array of every result.
pub struct JsonReport<W: Write> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for JsonReport<W> {
    fn consume(&mut self, table: &ResultTable) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, table)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
