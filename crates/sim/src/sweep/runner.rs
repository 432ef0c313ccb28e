//! Bounded worker pool.
//!
//! A producer feeds jobs through a rendezvous channel to a fixed number of
//! workers, so at most one job per worker is in flight. Workers send each
//! finished [`JobResult`] through a second rendezvous channel to a single
//! consumer running on the calling thread; slow output therefore stalls the
//! workers rather than piling up results in memory.
//!
//! Each job carries its own generator, cloned from a master generator that is
//! then jumped ahead by 2^128 steps. The streams never overlap and do not
//! depend on which worker picks up which job.

use super::jobs::Job;
use super::results::{snapshot, JobResult};
use crate::analysis::PairSampling;
use crate::errors::{ConfigError, SweepError};
use crate::simulation::MoranProcess;
use log::{debug, info, warn};
use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::num::NonZeroUsize;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread;

/// Settings shared by every job of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Number of worker threads
    pub threads: usize,
    /// Master seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub sampling: PairSampling,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            seed: None,
            sampling: PairSampling::default(),
        }
    }
}

impl RunSettings {
    /// Create the master generator.
    pub fn master_rng(&self) -> Xoshiro256PlusPlus {
        match self.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        }
    }
}

/// Available CPU parallelism, or 1 if it cannot be determined.
pub fn default_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Run every replicate of `job` and collect its measurements.
pub fn run_job<R: RngCore>(
    job: &Job,
    sampling: PairSampling,
    rng: &mut R,
) -> Result<JobResult, ConfigError> {
    let plan = job.plan;
    if plan.generations() == 0 {
        warn!(
            "Job {} simulates no generations; results describe the ancestor only",
            job.id
        );
    }

    let mut result = JobResult::new(job.configs.clone());
    for _ in 0..plan.replicates {
        let mut process = MoranProcess::from_random_ancestor(&job.configs, rng)?;
        for _ in 0..plan.gen_time {
            process.run_for(plan.gen_step, rng);
            let records = snapshot(process.populations(), process.generation(), sampling, rng);
            result.calc_results.extend(records);
        }
    }
    Ok(result)
}

type JobMessage = (Job, Xoshiro256PlusPlus);
type ResultMessage = Result<JobResult, ConfigError>;

/// Run `jobs` on a pool of `settings.threads` workers.
///
/// `on_result` is called on the calling thread once per finished job, in
/// completion order. The first error it returns stops the run: no further
/// results are accepted and the workers wind down after their current job.
///
/// Returns the number of results handed to `on_result`.
pub fn run_jobs<F, E>(jobs: Vec<Job>, settings: &RunSettings, mut on_result: F) -> Result<usize, E>
where
    F: FnMut(JobResult) -> Result<(), E>,
    E: From<SweepError>,
{
    if settings.threads == 0 {
        return Err(SweepError::NoWorkers.into());
    }

    let total = jobs.len();
    let workers = settings.threads.min(total.max(1));
    let sampling = settings.sampling;
    let mut master = settings.master_rng();
    info!("Running {total} job(s) on {workers} worker(s)");

    let (job_tx, job_rx) = mpsc::sync_channel::<JobMessage>(0);
    let (result_tx, result_rx) = mpsc::sync_channel::<ResultMessage>(0);
    let job_rx = Arc::new(Mutex::new(job_rx));

    let (completed, failure, panicked) = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let jobs = Arc::clone(&job_rx);
                let results = result_tx.clone();
                scope.spawn(move || worker_loop(worker, &jobs, &results, sampling))
            })
            .collect();
        // Only workers may keep the channel ends alive, so that the producer
        // and the consumer both notice when every worker is gone.
        drop(job_rx);
        drop(result_tx);

        let producer = scope.spawn(move || {
            for job in jobs {
                let rng = master.clone();
                master.jump();
                if job_tx.send((job, rng)).is_err() {
                    break;
                }
            }
        });

        let mut completed = 0;
        let mut failure: Option<E> = None;
        while let Ok(message) = result_rx.recv() {
            let handled = match message {
                Ok(result) => on_result(result),
                Err(e) => Err(SweepError::from(e).into()),
            };
            match handled {
                Ok(()) => completed += 1,
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        drop(result_rx);

        let panicked = handles
            .into_iter()
            .chain(std::iter::once(producer))
            .map(|handle| handle.join())
            .filter(Result::is_err)
            .count();
        (completed, failure, panicked)
    });

    if let Some(e) = failure {
        return Err(e);
    }
    if panicked > 0 {
        return Err(SweepError::WorkerPanicked(panicked).into());
    }
    info!("Finished {completed} of {total} job(s)");
    Ok(completed)
}

fn worker_loop(
    worker: usize,
    jobs: &Mutex<Receiver<JobMessage>>,
    results: &SyncSender<ResultMessage>,
    sampling: PairSampling,
) {
    loop {
        let next = match jobs.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => break,
        };
        let Ok((job, mut rng)) = next else {
            break;
        };

        debug!(
            "Worker {worker} running job {} ({} population(s))",
            job.id,
            job.configs.len()
        );
        let outcome = run_job(&job, sampling, &mut rng);
        if results.send(outcome).is_err() {
            break;
        }
    }
}
