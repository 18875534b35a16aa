use crate::config::Config;
use crate::error::{Error, Result};
use crate::pipeline::{InterestingnessPipeline, Score};
use futures::future::join_all;
use image::DynamicImage;
use log::trace;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};

/// What a worker should score.
pub enum ScoreJob {
    Image(Arc<DynamicImage>),
    File(PathBuf),
}

pub struct ScoreTask {
    pub job: ScoreJob,
    pub job_id: u64,
    pub result_sender: oneshot::Sender<Result<Score>>,
}

/// A fixed set of tokio workers fed round-robin by a dispatcher task.
pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<ScoreTask>,
    workers: Vec<tokio::task::JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `worker_count` workers. Must be called inside a tokio runtime.
    pub fn new(pipeline: Arc<InterestingnessPipeline>, worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<ScoreTask>();
        let mut workers = Vec::with_capacity(worker_count);

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<ScoreTask>())
            .unzip();

        // Spawn dispatcher
        tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                trace!("dispatching job {} to worker {}", task.job_id, worker_idx);
                // A closed worker drops the task, and its oneshot with it.
                let _ = worker_senders[worker_idx].send(task);
                worker_idx = (worker_idx + 1) % worker_count;
            }
        });

        // Spawn workers
        for mut worker_receiver in worker_receivers {
            let worker_pipeline = Arc::clone(&pipeline);

            let worker = tokio::spawn(async move {
                while let Some(task) = worker_receiver.recv().await {
                    let result = Self::score_job(Arc::clone(&worker_pipeline), task.job).await;
                    trace!("job {} finished", task.job_id);
                    let _ = task.result_sender.send(result);
                }
            });

            workers.push(worker);
        }

        Self {
            task_sender,
            workers,
        }
    }

    async fn score_job(pipeline: Arc<InterestingnessPipeline>, job: ScoreJob) -> Result<Score> {
        tokio::task::spawn_blocking(move || match job {
            ScoreJob::Image(image) => Ok(pipeline.analyze(&image)),
            ScoreJob::File(path) => pipeline.analyze_file(path),
        })
        .await
        .map_err(|e| Error::Worker(format!("scoring task failed: {e}")))?
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub async fn submit(&self, job: ScoreJob, job_id: u64) -> Result<Score> {
        let (result_sender, result_receiver) = oneshot::channel();

        let task = ScoreTask {
            job,
            job_id,
            result_sender,
        };

        self.task_sender
            .send(task)
            .map_err(|_| Error::Worker("failed to send task to worker pool".to_string()))?;

        result_receiver
            .await
            .map_err(|_| Error::Worker("failed to receive result from worker".to_string()))?
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for worker in &self.workers {
            worker.abort();
        }
    }
}

/// Scores many images concurrently with one shared configuration.
///
/// Results are identical to `InterestingnessPipeline`; only the scheduling differs.
pub struct ParallelPipeline {
    pipeline: Arc<InterestingnessPipeline>,
    worker_pool: WorkerPool,
    job_counter: AtomicU64,
}

impl ParallelPipeline {
    /// Builds a pool with one worker per logical CPU.
    ///
    /// Must be called inside a tokio runtime: spawning the workers panics otherwise.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_workers(config, num_cpus::get())
    }

    /// Builds a pool with `worker_count` workers (at least one).
    ///
    /// Must be called inside a tokio runtime: spawning the workers panics otherwise.
    pub fn with_workers(config: Config, worker_count: usize) -> Result<Self> {
        let pipeline = Arc::new(InterestingnessPipeline::new(config)?);
        let worker_pool = WorkerPool::new(Arc::clone(&pipeline), worker_count);
        Ok(Self {
            pipeline,
            worker_pool,
            job_counter: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &Config {
        self.pipeline.config()
    }

    pub fn worker_count(&self) -> usize {
        self.worker_pool.worker_count()
    }

    fn next_job_id(&self) -> u64 {
        self.job_counter.fetch_add(1, Ordering::Relaxed)
    }

    pub async fn analyze(&self, image: Arc<DynamicImage>) -> Result<Score> {
        self.worker_pool
            .submit(ScoreJob::Image(image), self.next_job_id())
            .await
    }

    pub async fn analyze_file(&self, path: impl Into<PathBuf>) -> Result<Score> {
        self.worker_pool
            .submit(ScoreJob::File(path.into()), self.next_job_id())
            .await
    }

    /// Scores every image and returns the results in input order.
    pub async fn analyze_batch(&self, images: Vec<Arc<DynamicImage>>) -> Vec<Result<Score>> {
        join_all(images.into_iter().map(|image| self.analyze(image))).await
    }

    /// Scores every file and returns the results in input order.
    pub async fn analyze_files(&self, paths: Vec<PathBuf>) -> Vec<Result<Score>> {
        join_all(paths.into_iter().map(|path| self.analyze_file(path))).await
    }
}
