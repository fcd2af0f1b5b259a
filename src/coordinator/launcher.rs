//! Worker task launching
//!
//! The coordinator launches workers through [`TaskLauncher`] so that launch
//! failures can be injected in tests. [`ThreadLauncher`] is the production
//! implementation: one named OS thread per worker, created with
//! `thread::Builder` so that hitting the thread limit surfaces as an
//! `io::Error` rather than a panic.

use crate::worker::{Worker, WorkerResult};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Launches a worker on its own task and hands back a joinable handle
pub trait TaskLauncher {
    fn launch(&self, worker: Worker) -> io::Result<JoinHandle<WorkerResult>>;
}

/// One OS thread per worker, named `pi-worker-{id}`
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadLauncher {
    /// Stack size for worker threads; `None` uses the platform default
    pub stack_size: Option<usize>,
}

impl TaskLauncher for ThreadLauncher {
    fn launch(&self, worker: Worker) -> io::Result<JoinHandle<WorkerResult>> {
        let mut builder = thread::Builder::new().name(format!("pi-worker-{}", worker.id()));
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }
        builder.spawn(move || worker.run())
    }
}

/// Fault to inject in [`FaultyLauncher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Refuse to launch the worker with this id
    RefuseLaunch(usize),
    /// Launch the worker with this id, but have it panic instead of integrating
    PanicWorker(usize),
}

/// Launcher that injects a single fault and counts finished workers
///
/// Workers other than the faulty one run normally on real threads.
#[derive(Debug, Clone)]
pub struct FaultyLauncher {
    fault: Fault,
    finished: Arc<AtomicUsize>,
}

impl FaultyLauncher {
    pub fn new(fault: Fault) -> Self {
        Self {
            fault,
            finished: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of workers that ran to completion
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

impl TaskLauncher for FaultyLauncher {
    fn launch(&self, worker: Worker) -> io::Result<JoinHandle<WorkerResult>> {
        let id = worker.id();
        match self.fault {
            Fault::RefuseLaunch(bad) if bad == id => Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                format!("refusing to launch worker {}", id),
            )),
            Fault::PanicWorker(bad) if bad == id => {
                thread::Builder::new().spawn(move || -> WorkerResult { panic!("worker {} failed", id) })
            }
            _ => {
                let finished = Arc::clone(&self.finished);
                thread::Builder::new().spawn(move || {
                    let result = worker.run();
                    finished.fetch_add(1, Ordering::SeqCst);
                    result
                })
            }
        }
    }
}
