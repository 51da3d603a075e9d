// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics after each epoch:
//
//   metrics.csv   — one row per epoch, appended across runs
//   history.json  — per-metric series for the finished run,
//                   the same shape Keras/TF.js return from fit()
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number (1, 2, 3, ...)
//   - train_loss: mean per-timestep cross-entropy on the training set
//   - train_acc:  fraction of training timesteps predicted exactly
//   - val_loss:   same loss on the validation set (blank if none)
//   - val_acc:    same accuracy on the validation set (blank if none)
//
// Example CSV output:
//   epoch,train_loss,train_acc,val_loss,val_acc
//   1,2.874100,0.412000,2.701300,0.455000
//   2,2.210500,0.538000,2.156200,0.561000
//
// Accuracy counts padding timesteps too, so it starts high on
// corpora with many short words. Watch val_loss for progress.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch:      usize,
    pub train_loss: f64,
    pub train_acc:  f64,
    /// None when the validation split is empty
    pub val_loss:   Option<f64>,
    pub val_acc:    Option<f64>,
}

impl EpochMetrics {
    pub fn new(
        epoch:      usize,
        train_loss: f64,
        train_acc:  f64,
        val_loss:   Option<f64>,
        val_acc:    Option<f64>,
    ) -> Self {
        Self { epoch, train_loss, train_acc, val_loss, val_acc }
    }

    /// One console line for this epoch
    pub fn summary(&self, total_epochs: usize) -> String {
        let mut line = format!(
            "Epoch {:>3}/{} | loss={:.4} | acc={:.1}%",
            self.epoch,
            total_epochs,
            self.train_loss,
            self.train_acc * 100.0,
        );
        if let (Some(loss), Some(acc)) = (self.val_loss, self.val_acc) {
            line.push_str(&format!(" | val_loss={:.4} | val_acc={:.1}%", loss, acc * 100.0));
        }
        line
    }
}

/// Per-metric series for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub loss:     Vec<f64>,
    pub acc:      Vec<f64>,
    pub val_loss: Vec<Option<f64>>,
    pub val_acc:  Vec<Option<f64>>,
}

impl TrainingHistory {
    pub fn push(&mut self, m: &EpochMetrics) {
        self.loss.push(m.train_loss);
        self.acc.push(m.train_acc);
        self.val_loss.push(m.val_loss);
        self.val_acc.push(m.val_acc);
    }

    pub fn epochs(&self) -> usize {
        self.loss.len()
    }
}

/// Logs epoch metrics to CSV and the final history to JSON.
pub struct MetricsLogger {
    dir:      PathBuf,
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,train_acc,val_loss,val_acc")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { dir, csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{},{}",
            m.epoch,
            m.train_loss,
            m.train_acc,
            optional(m.val_loss),
            optional(m.val_acc),
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:?}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    /// Write the run's history to history.json
    pub fn save_history(&self, history: &TrainingHistory) -> Result<PathBuf> {
        let path = self.dir.join("history.json");
        fs::write(&path, serde_json::to_string_pretty(history)?)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        Ok(path)
    }

    #[cfg(test)]
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

fn optional(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.6}")).unwrap_or_default()
}
