//! JSON-lines event log.
//!
//! The game loop hands events to [`EventLog::record`], which never blocks: a
//! writer task on a small background runtime serializes each event with
//! `serde_json` and appends it, one object per line, to the log file.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::GameEvent;

pub struct EventLog {
    rt: Runtime,
    tx: Option<mpsc::UnboundedSender<Value>>,
    writer: Option<JoinHandle<()>>,
}

impl EventLog {
    /// Open (or create) `path` for appending and start the writer.
    pub fn open(path: &str) -> Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("event-log")
            .enable_all()
            .build()
            .context("starting event log runtime")?;

        let file = rt
            .block_on(OpenOptions::new().create(true).append(true).open(path))
            .with_context(|| format!("opening event log {path}"))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Value>();
        let writer = rt.spawn(async move {
            let mut file = file;
            let mut buf: Vec<u8> = Vec::with_capacity(4096);

            while let Some(record) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &record).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    break;
                }
            }
            let _ = file.flush().await;
        });

        Ok(Self {
            rt,
            tx: Some(tx),
            writer: Some(writer),
        })
    }

    /// Queue one event, stamped with wall-clock milliseconds.
    pub fn record(&self, event: &GameEvent) {
        let Some(tx) = self.tx.as_ref() else {
            return;
        };
        if let Ok(record) = log_record(event, unix_millis()) {
            let _ = tx.send(record);
        }
    }

    /// Stop accepting events and wait until everything queued is written.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender ends the writer loop once the queue is drained.
        self.tx.take();
        if let Some(writer) = self.writer.take() {
            let _ = self.rt.block_on(writer);
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// The JSON object written for one event: the event's own fields plus `ts_ms`.
pub fn log_record(event: &GameEvent, ts_ms: u64) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(event)?;
    if let Value::Object(map) = &mut value {
        map.insert("ts_ms".to_string(), json!(ts_ms));
    }
    Ok(value)
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
