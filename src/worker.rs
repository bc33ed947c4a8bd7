use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::hub;
use crate::runner::CommandRunner;

/// A hub install command waiting to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub version: String,
    pub command: String,
}

/// What came back from running an [`InstallRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub version: String,
    pub output: String,
}

impl InstallOutcome {
    pub fn succeeded(&self) -> bool {
        hub::install_succeeded(&self.output)
    }
}

/// Runs hub commands on the blocking pool so the state owner never waits on
/// the hub process. Install results are queued on the paired [`Completions`].
#[derive(Clone)]
pub struct Dispatcher {
    handle: Handle,
    runner: Arc<dyn CommandRunner>,
    completions: UnboundedSender<InstallOutcome>,
}

/// Owner side of the install completion queue.
pub struct Completions {
    receiver: UnboundedReceiver<InstallOutcome>,
}

impl Dispatcher {
    pub fn new(handle: Handle, runner: Arc<dyn CommandRunner>) -> (Self, Completions) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self {
            handle,
            runner,
            completions: sender,
        };
        (dispatcher, Completions { receiver })
    }

    pub fn dispatch_install(&self, request: InstallRequest) -> JoinHandle<()> {
        let runner = Arc::clone(&self.runner);
        let completions = self.completions.clone();

        self.handle.spawn_blocking(move || {
            tracing::info!("Dispatching `{}`", request.command);
            let output = runner.run(&request.command);
            let outcome = InstallOutcome {
                version: request.version,
                output,
            };
            if completions.send(outcome).is_err() {
                tracing::warn!("Install completion dropped: owner is gone");
            }
        })
    }

    /// Run an arbitrary hub command in the background and hand back its output.
    pub fn fetch(&self, command: String) -> JoinHandle<String> {
        let runner = Arc::clone(&self.runner);
        self.handle.spawn_blocking(move || runner.run(&command))
    }
}

impl Completions {
    /// Wait for the next finished install.
    pub async fn next(&mut self) -> Option<InstallOutcome> {
        self.receiver.recv().await
    }

    /// A finished install, if one is already queued.
    pub fn try_next(&mut self) -> Option<InstallOutcome> {
        self.receiver.try_recv().ok()
    }
}
