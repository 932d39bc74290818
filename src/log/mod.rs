use crate::errors::RequestError;
use crate::provider::{CompletionBackend, DynBackend};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// `RUST_LOG` wins; otherwise `info`, or `debug` when `debug` is set.
pub fn init_tracing(debug: bool) {
    let fallback = if debug { "rewild=debug,info" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with_writer(std::io::stderr)
        .init();
}

pub fn tx_dir(root: &Path, tx: Uuid) -> PathBuf {
    root.join(".rewild").join("tx").join(tx.to_string())
}

/// One prompt/completion exchange as written to disk.
#[derive(Debug, Serialize)]
pub struct Exchange<'a> {
    pub tx: Uuid,
    pub stage: &'a str,
    pub timestamp: DateTime<Utc>,
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn save_exchange(dir: &Path, ex: &Exchange<'_>) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let p = dir.join(format!("{}.exchange.json", ex.stage));
    fs::write(&p, to_string_pretty(ex)?)?;
    Ok(p)
}

/// Wraps a backend and saves every exchange under `tx_dir(root, tx)`.
pub struct RecordingBackend {
    inner: DynBackend,
    dir: PathBuf,
    tx: Uuid,
    seq: AtomicUsize,
}

impl RecordingBackend {
    pub fn new(inner: DynBackend, root: &Path, tx: Uuid) -> Self {
        let dir = tx_dir(root, tx);
        debug!(dir = %dir.display(), "saving completion exchanges");
        Self { inner, dir, tx, seq: AtomicUsize::new(0) }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl CompletionBackend for RecordingBackend {
    async fn complete(&self, prompt: &str) -> Result<String, RequestError> {
        let result = self.inner.complete(prompt).await;
        let stage = format!("{:03}", self.seq.fetch_add(1, Ordering::Relaxed) + 1);
        let ex = Exchange {
            tx: self.tx,
            stage: &stage,
            timestamp: Utc::now(),
            prompt,
            completion: result.as_ref().ok().map(String::as_str),
            error: result.as_ref().err().map(ToString::to_string),
        };
        match save_exchange(&self.dir, &ex) {
            Ok(p) => debug!(path = %p.display(), "exchange saved"),
            Err(e) => warn!(error = %e, "could not save exchange"),
        }
        result
    }
}
