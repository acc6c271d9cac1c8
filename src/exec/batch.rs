// src/exec/batch.rs

//! Sequential, single-flight batch execution.
//!
//! Elevation prompts must never overlap: two concurrent sudo or dialog
//! prompts racing for the same credential UI is a correctness hazard, not a
//! performance concern. The dispatcher therefore runs services strictly in
//! order and holds a one-permit semaphore for the whole batch; a second
//! batch arriving while one is in flight gets [`RoutesplitError::BatchBusy`]
//! and nothing else happens.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::classify::summarize_result;
use crate::errors::{Result, RoutesplitError};
use crate::exec::runner::CommandRunner;
use crate::types::{ActionKind, SummaryItem};

/// One service to run plus its extra script arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub service: String,
    pub extra_args: Vec<String>,
}

/// An ordered, de-duplicated batch. Consumed by one dispatcher run, never
/// mutated concurrently.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub action: ActionKind,
    entries: Vec<BatchEntry>,
    output_prefix: String,
}

impl BatchRequest {
    /// Build a batch with the same extra args for every service. Duplicates
    /// are dropped, first occurrence wins, order is otherwise preserved.
    pub fn new(
        action: ActionKind,
        services: impl IntoIterator<Item = String>,
        extra_args: Vec<String>,
    ) -> Self {
        let entries = dedup_services(services)
            .into_iter()
            .map(|service| BatchEntry {
                service,
                extra_args: extra_args.clone(),
            })
            .collect();
        Self {
            action,
            entries,
            output_prefix: String::new(),
        }
    }

    /// Build a batch from per-service entries (VERIFY, where each service
    /// targets its own host). De-duplication applies to service names.
    pub fn from_entries(action: ActionKind, entries: impl IntoIterator<Item = BatchEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.service.clone()))
            .collect();
        Self {
            action,
            entries,
            output_prefix: String::new(),
        }
    }

    /// Text prepended to the combined output (e.g. a skipped-services note).
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a batch produces for presentation.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Raw output of every service, each under a `===== <service> =====`
    /// header, in batch order.
    pub combined: String,
    /// One classified summary per service, in batch order.
    pub summaries: Vec<SummaryItem>,
}

/// Runs batches one at a time, services strictly in order.
pub struct Dispatcher {
    runner: CommandRunner,
    inflight: Arc<Semaphore>,
}

impl Dispatcher {
    pub fn new(runner: CommandRunner) -> Self {
        Self {
            runner,
            inflight: Arc::new(Semaphore::new(1)),
        }
    }

    /// Run one batch to completion.
    ///
    /// Returns [`RoutesplitError::BatchBusy`] without side effects when a
    /// batch is already in flight. A failure of one service is captured in
    /// its summary and the remaining services still run.
    pub async fn run_batch(&self, request: BatchRequest) -> Result<BatchOutcome> {
        let _permit = self
            .inflight
            .try_acquire()
            .map_err(|_| RoutesplitError::BatchBusy)?;

        info!(
            action = request.action.label(),
            services = request.entries.len(),
            "batch started"
        );

        let mut combined = request.output_prefix.clone();
        let mut summaries = Vec::with_capacity(request.entries.len());

        for entry in &request.entries {
            let result = self
                .runner
                .run_service(request.action, &entry.service, &entry.extra_args)
                .await;

            if let Err(err) = &result {
                warn!(service = %entry.service, error = %err, "service invocation failed");
            }

            summaries.push(summarize_result(
                request.action,
                &entry.service,
                &entry.extra_args,
                &result,
            ));

            if !combined.is_empty() {
                if !combined.ends_with('\n') {
                    combined.push('\n');
                }
                combined.push('\n');
            }
            combined.push_str(&format!("===== {} =====\n", entry.service));
            match &result {
                Ok(res) if res.output.is_empty() => combined.push_str("(no output)"),
                Ok(res) => combined.push_str(&res.output),
                Err(err) => combined.push_str(&format!("ERROR: {err}")),
            }
        }

        info!(action = request.action.label(), "batch finished");
        Ok(BatchOutcome {
            combined,
            summaries,
        })
    }
}

/// Drop duplicate services, keeping the first occurrence and the order.
pub fn dedup_services(services: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    services
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
