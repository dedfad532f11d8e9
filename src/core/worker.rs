//! Worker threads for the twinpane background jobs.
//!
//! Recursive copies and allow-listed console commands run here, off the dispatcher's
//! thread. A job never touches application state: it computes a self-contained
//! [JobResult] and sends it back over a channel, where the event loop feeds it into
//! the dispatcher as an ordinary event.
//!
//! Each job kind has its own small pool of threads sharing one receiver, so several
//! copies (one per clipboard entry) can be in flight at once. Completions arrive in
//! whatever order the jobs finish.

use crate::core::copy::copy_recursive;
use crate::core::error::OpError;
use crate::core::proc::{CommandPolicy, run_command};

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

/// A unit of background work. Reports exactly one [JobResult].
#[derive(Debug, Clone)]
pub enum Job {
    Copy {
        source: PathBuf,
        dest: PathBuf,
    },
    Command {
        line: String,
        cwd: PathBuf,
        policy: Arc<CommandPolicy>,
    },
}

/// Terminal outcome of a [Job], delivered once to the dispatcher.
#[derive(Debug)]
pub enum JobResult {
    CopyDone {
        source: PathBuf,
        dest: PathBuf,
        error: Option<OpError>,
    },
    CommandResult {
        command: String,
        output: String,
        error: Option<OpError>,
    },
}

impl JobResult {
    /// The path a copy result is about: the destination on success, the source on failure.
    ///
    /// Used to name the copy in console lines.
    pub fn copy_path(&self) -> Option<&PathBuf> {
        match self {
            JobResult::CopyDone {
                dest, error: None, ..
            } => Some(dest),
            JobResult::CopyDone { source, .. } => Some(source),
            JobResult::CommandResult { .. } => None,
        }
    }
}

/// Runs a job to completion on the calling thread.
///
/// Used by the worker threads, and directly by tests that want deterministic completion.
pub fn run_job(job: Job) -> JobResult {
    match job {
        Job::Copy { source, dest } => {
            tracing::debug!(src = %source.display(), dest = %dest.display(), "copy job started");
            let error = copy_recursive(&source, &dest).err();
            if let Some(e) = &error {
                tracing::warn!(src = %source.display(), error = %e, "copy job failed");
            }
            JobResult::CopyDone {
                source,
                dest,
                error,
            }
        }
        Job::Command { line, cwd, policy } => {
            tracing::debug!(command = %line, cwd = %cwd.display(), "command job started");
            let outcome = run_command(&line, &cwd, &policy);
            JobResult::CommandResult {
                command: line,
                output: outcome.output,
                error: outcome.error,
            }
        }
    }
}

/// Channels to the copy and command worker pools plus the shared response receiver.
pub struct Workers {
    copy_tx: Sender<Job>,
    command_tx: Sender<Job>,
    response_rx: Receiver<JobResult>,
}

impl Workers {
    /// Spawns `threads` workers for each job kind (at least one each).
    pub fn spawn(threads: usize) -> Self {
        let (copy_tx, copy_rx) = unbounded::<Job>();
        let (command_tx, command_rx) = unbounded::<Job>();
        let (res_tx, response_rx) = unbounded::<JobResult>();

        for _ in 0..threads.max(1) {
            start_job_worker(copy_rx.clone(), res_tx.clone());
            start_job_worker(command_rx.clone(), res_tx.clone());
        }

        Self {
            copy_tx,
            command_tx,
            response_rx,
        }
    }

    /// Hands a job to the pool for its kind.
    pub fn submit(&self, job: Job) {
        let tx = match job {
            Job::Copy { .. } => &self.copy_tx,
            Job::Command { .. } => &self.command_tx,
        };
        if tx.send(job).is_err() {
            tracing::error!("job submitted after the worker pool shut down");
        }
    }

    /// Accessor for the job result receiver.
    pub fn response_rx(&self) -> &Receiver<JobResult> {
        &self.response_rx
    }
}

/// Starts a worker thread which runs jobs from `task_rx` and answers on `res_tx`.
///
/// # Arguments
/// * `task_rx` - Receiver channel for incoming jobs (shared by the pool)
/// * `res_tx` - Sender channel for outgoing results
fn start_job_worker(task_rx: Receiver<Job>, res_tx: Sender<JobResult>) {
    thread::spawn(move || {
        while let Ok(job) = task_rx.recv() {
            if res_tx.send(run_job(job)).is_err() {
                break;
            }
        }
    });
}
