// src/exec/runner.rs

//! Per-service command invocation.

use tracing::{debug, info};

use crate::errors::ExecError;
use crate::exec::backend::AuthBackend;
use crate::repo::RepoPaths;
use crate::types::{ActionKind, CommandResult};

/// Resolves the script for an action and invokes the configured backend for
/// one service.
pub struct CommandRunner {
    backend: Box<dyn AuthBackend>,
    paths: RepoPaths,
}

impl CommandRunner {
    pub fn new(backend: Box<dyn AuthBackend>, paths: RepoPaths) -> Self {
        Self { backend, paths }
    }

    pub fn paths(&self) -> &RepoPaths {
        &self.paths
    }

    /// Run one action for one service and return the captured result.
    pub async fn run_service(
        &self,
        action: ActionKind,
        service: &str,
        extra_args: &[String],
    ) -> Result<CommandResult, ExecError> {
        let script = self.paths.script_for(action);
        info!(
            action = action.label(),
            service,
            script = %script.display(),
            "starting privileged command"
        );

        let result = self.backend.run(&script, service, extra_args).await;

        match &result {
            Ok(res) => debug!(
                service,
                exit_code = res.exit_code,
                bytes = res.output.len(),
                "privileged command finished"
            ),
            Err(err) => debug!(service, error = %err, "privileged command failed"),
        }

        result
    }
}
