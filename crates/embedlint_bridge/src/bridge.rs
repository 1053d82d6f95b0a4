//! Blocking request/response bridge to the engine worker.

use std::sync::OnceLock;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

use crate::{BridgeError, EngineFactory, LintReport, ProseEngine};

/// One lint request, paired with its reply channel.
struct Job {
    text: String,
    filename: String,
    reply: Sender<Result<LintReport, BridgeError>>,
}

/// Synchronous facade over the asynchronous engine worker.
///
/// The worker thread is long-lived; the engine instance inside it is built
/// lazily on the first request and reused for the lifetime of the bridge.
/// Requests from one caller are fully serialized: `lint_blocking` does not
/// return until the worker has replied, so no two requests from the same
/// traversal are ever in flight concurrently.
///
/// There is no cancellation and no timeout: a request, once issued, runs to
/// completion or failure.
pub struct SyncBridge {
    sender: Option<Sender<Job>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl SyncBridge {
    /// Spawns the worker thread. The engine itself is not constructed until
    /// the first call to [`lint_blocking`](Self::lint_blocking).
    pub fn spawn<F>(factory: F) -> Self
    where
        F: FnOnce() -> Result<Box<dyn ProseEngine>, BridgeError> + Send + 'static,
    {
        let (sender, receiver) = crossbeam_channel::unbounded::<Job>();
        let worker = thread::spawn(move || worker_loop(receiver, Box::new(factory)));

        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Returns the process-wide bridge, spawning it on first use.
    ///
    /// The factory passed by the first caller wins; later factories are
    /// ignored. This mirrors the engine's own lifecycle: constructed at most
    /// once per process, torn down only at process exit.
    pub fn global<F>(factory: F) -> &'static SyncBridge
    where
        F: FnOnce() -> Result<Box<dyn ProseEngine>, BridgeError> + Send + 'static,
    {
        static GLOBAL: OnceLock<SyncBridge> = OnceLock::new();
        GLOBAL.get_or_init(|| SyncBridge::spawn(factory))
    }

    /// Lints `text` under `filename` and blocks until the worker replies.
    ///
    /// Engine failures for this request come back as [`BridgeError::Engine`]
    /// (or [`BridgeError::Init`] if the engine never came up); no partial
    /// messages are returned on failure.
    pub fn lint_blocking(&self, text: &str, filename: &str) -> Result<LintReport, BridgeError> {
        let sender = self.sender.as_ref().ok_or(BridgeError::WorkerGone)?;

        let (reply, response) = crossbeam_channel::bounded(1);
        sender
            .send(Job {
                text: text.to_string(),
                filename: filename.to_string(),
                reply,
            })
            .map_err(|_| BridgeError::WorkerGone)?;

        response.recv().map_err(|_| BridgeError::WorkerGone)?
    }
}

impl Drop for SyncBridge {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

enum EngineState {
    Uninit(EngineFactory),
    Ready(Box<dyn ProseEngine>),
    Failed(BridgeError),
}

fn worker_loop(jobs: Receiver<Job>, factory: EngineFactory) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            let error = BridgeError::Runtime(e.to_string());
            warn!("Failed to build engine worker runtime: {e}");
            for job in jobs.iter() {
                let _ = job.reply.send(Err(error.clone()));
            }
            return;
        }
    };

    let mut state = EngineState::Uninit(factory);

    for job in jobs.iter() {
        state = match state {
            EngineState::Uninit(factory) => {
                debug!("Initializing prose engine");
                match factory() {
                    Ok(engine) => EngineState::Ready(engine),
                    Err(e) => {
                        warn!("Engine initialization failed: {e}");
                        EngineState::Failed(e)
                    }
                }
            }
            ready => ready,
        };

        let result = match &mut state {
            EngineState::Ready(engine) => {
                debug!(
                    "Linting {} bytes as {}",
                    job.text.len(),
                    job.filename
                );
                runtime.block_on(engine.lint(&job.text, &job.filename))
            }
            EngineState::Failed(e) => Err(e.clone()),
            // Uninit cannot survive the step above; answer defensively
            // instead of panicking the worker.
            EngineState::Uninit(_) => Err(BridgeError::init("engine was never constructed")),
        };

        if job.reply.send(result).is_err() {
            debug!("Caller went away before receiving lint reply");
        }
    }

    debug!("Engine worker shutting down");
}
