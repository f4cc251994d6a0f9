//! Thread-safe CSV results sink.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use tracing::info;

use crate::error::SweepError;
use crate::record::{CSV_HEADER, ResultRecord};

/// Append-only CSV table of [`ResultRecord`]s shared by all workers.
///
/// The header is written on construction. Each [`append`](Self::append)
/// writes one combination's records under an internal lock and flushes, so
/// a partially completed sweep leaves a readable file.
#[derive(Debug)]
pub struct ResultsSink<W: Write> {
    state: Mutex<SinkState<W>>,
}

#[derive(Debug)]
struct SinkState<W: Write> {
    writer: csv::Writer<W>,
    records: usize,
    /// Highest-count record seen for each k; earliest wins ties.
    best_by_k: BTreeMap<usize, ResultRecord>,
}

/// Totals reported when a sink is finished.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkSummary {
    /// Records written.
    pub records: usize,
    /// Best record per k, ascending k.
    pub best_by_k: Vec<ResultRecord>,
}

impl SinkSummary {
    /// The single best record across all k (lowest k on ties).
    pub fn best(&self) -> Option<&ResultRecord> {
        self.best_by_k
            .iter()
            .reduce(|best, r| if r.correct > best.correct { r } else { best })
    }
}

impl ResultsSink<File> {
    /// Creates (or truncates) `path` and writes the header.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Sink`] if the file cannot be created or written.
    pub fn create(path: &Path) -> Result<Self, SweepError> {
        let file = File::create(path).map_err(|e| SweepError::Sink {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::new(file)
    }
}

impl<W: Write> ResultsSink<W> {
    /// Wraps `inner` and writes the header row.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Sink`] if the header cannot be written.
    pub fn new(inner: W) -> Result<Self, SweepError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;
        Ok(Self {
            state: Mutex::new(SinkState {
                writer,
                records: 0,
                best_by_k: BTreeMap::new(),
            }),
        })
    }

    /// Writes `records` as one batch and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Sink`] on write failure or
    /// [`SweepError::SinkPoisoned`] if another writer panicked mid-append.
    pub fn append(&self, records: &[ResultRecord]) -> Result<(), SweepError> {
        let mut state = self.state.lock().map_err(|_| SweepError::SinkPoisoned)?;
        for record in records {
            state.writer.write_record(record.to_fields())?;
            info!(
                k = record.k,
                threshold = record.threshold,
                exponent = record.exponent,
                correct = record.correct,
                "record"
            );
            state
                .best_by_k
                .entry(record.k)
                .and_modify(|best| {
                    if record.correct > best.correct {
                        *best = *record;
                    }
                })
                .or_insert(*record);
        }
        state.records += records.len();
        state.writer.flush()?;
        Ok(())
    }

    /// Records written so far.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::SinkPoisoned`] if the lock is poisoned.
    pub fn records(&self) -> Result<usize, SweepError> {
        Ok(self.state.lock().map_err(|_| SweepError::SinkPoisoned)?.records)
    }

    /// Flushes and returns the summary.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Sink`] if the final flush fails.
    pub fn finish(self) -> Result<SinkSummary, SweepError> {
        self.into_inner().map(|(_, summary)| summary)
    }

    /// Flushes and returns the underlying writer with the summary.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Sink`] if the final flush fails or
    /// [`SweepError::SinkPoisoned`] if the lock is poisoned.
    pub fn into_inner(self) -> Result<(W, SinkSummary), SweepError> {
        let state = self
            .state
            .into_inner()
            .map_err(|_| SweepError::SinkPoisoned)?;
        let summary = SinkSummary {
            records: state.records,
            best_by_k: state.best_by_k.into_values().collect(),
        };
        let inner = state.writer.into_inner().map_err(|e| SweepError::Sink {
            reason: e.error().to_string(),
        })?;
        Ok((inner, summary))
    }
}
