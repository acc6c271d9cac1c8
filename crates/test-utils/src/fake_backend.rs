use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use routesplit::errors::ExecError;
use routesplit::exec::AuthBackend;
use routesplit::types::CommandResult;

/// One invocation the fake backend received, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub script: PathBuf,
    pub service: String,
    pub extra_args: Vec<String>,
}

/// A fake auth backend that:
/// - records every invocation into a shared list
/// - returns a scripted result per service (default: exit 0, empty output)
/// - optionally sleeps before responding, to keep a batch "in flight".
pub struct FakeAuthBackend {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responses: Mutex<HashMap<String, Result<CommandResult, ExecError>>>,
    delay: Option<Duration>,
}

impl FakeAuthBackend {
    pub fn new(calls: Arc<Mutex<Vec<RecordedCall>>>) -> Self {
        Self {
            calls,
            responses: Mutex::new(HashMap::new()),
            delay: None,
        }
    }

    /// Sleep this long inside every call before responding.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Script a successful result for one service.
    pub fn respond_ok(self, service: &str, exit_code: i32, output: &str) -> Self {
        self.respond(
            service,
            Ok(CommandResult {
                exit_code,
                output: output.to_string(),
            }),
        )
    }

    /// Script an execution failure for one service.
    pub fn respond_err(self, service: &str, err: ExecError) -> Self {
        self.respond(service, Err(err))
    }

    fn respond(self, service: &str, result: Result<CommandResult, ExecError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(service.to_string(), result);
        self
    }
}

impl AuthBackend for FakeAuthBackend {
    fn run(
        &self,
        script: &Path,
        service: &str,
        extra_args: &[String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult, ExecError>> + Send + '_>> {
        let call = RecordedCall {
            script: script.to_path_buf(),
            service: service.to_string(),
            extra_args: extra_args.to_vec(),
        };
        let calls = Arc::clone(&self.calls);
        // Scripted responses are consumed; repeated calls fall back to the
        // default so recording still works.
        let result = self
            .responses
            .lock()
            .unwrap()
            .remove(service)
            .unwrap_or(Ok(CommandResult {
                exit_code: 0,
                output: String::new(),
            }));
        let delay = self.delay;

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            calls.lock().unwrap().push(call);
            result
        })
    }
}
