//! Job scheduler infrastructure for background tasks.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Job frequency for scheduling.
#[derive(Debug, Clone, Copy)]
pub enum JobFrequency {
    /// Run every N seconds (for development/testing overrides).
    Seconds(u64),
    /// Run every day.
    Daily,
}

impl JobFrequency {
    /// Get the duration between job executions.
    pub fn duration(&self) -> Duration {
        match self {
            JobFrequency::Seconds(secs) => Duration::from_secs(*secs),
            JobFrequency::Daily => Duration::from_secs(86400),
        }
    }
}

/// Result of one job execution.
///
/// `AlreadyRan` is a normal outcome, not an error: the daily-run guard
/// refused the claim because the day's run already happened (or is in
/// flight in another process).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed { detail: String },
    AlreadyRan,
    Skipped { reason: String },
}

/// Trait for implementing background jobs.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// Stable task name; keys the daily-run guard and the status query.
    fn name(&self) -> &'static str;

    /// The frequency at which this job should run.
    fn frequency(&self) -> JobFrequency;

    /// Execute the job once.
    async fn execute(&self) -> Result<JobOutcome, String>;
}

/// Named set of jobs, shared between the scheduler and the manual-trigger
/// route.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Vec<Arc<dyn Job>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Register a job.
    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Look a job up by its task name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Job>> {
        self.jobs.iter().find(|j| j.name() == name).cloned()
    }

    /// All registered task names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.jobs.iter().map(|j| j.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Job>> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Background job scheduler.
pub struct JobScheduler {
    registry: JobRegistry,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    /// Create a scheduler over a registry of jobs.
    pub fn new(registry: JobRegistry) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            registry,
            shutdown_tx,
            shutdown_rx,
            handles: Vec::new(),
        }
    }

    /// Start an interval loop per registered job.
    pub fn start(&mut self) {
        info!("Starting job scheduler with {} jobs", self.registry.len());

        for job in self.registry.iter() {
            let job = Arc::clone(job);
            let mut shutdown_rx = self.shutdown_rx.clone();

            let handle = tokio::spawn(async move {
                let name = job.name();
                let frequency = job.frequency();
                // The first tick completes immediately, so each job gets a
                // startup pass; the daily-run guard absorbs restarts within
                // the same day.
                let mut interval = tokio::time::interval(frequency.duration());

                info!(job = name, frequency = ?frequency, "Job scheduled");

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let start = std::time::Instant::now();
                            info!(job = name, "Job starting");

                            match job.execute().await {
                                Ok(JobOutcome::Completed { detail }) => {
                                    info!(
                                        job = name,
                                        elapsed_ms = start.elapsed().as_millis(),
                                        detail = %detail,
                                        "Job completed"
                                    );
                                }
                                Ok(JobOutcome::AlreadyRan) => {
                                    info!(job = name, "Job already ran today");
                                }
                                Ok(JobOutcome::Skipped { reason }) => {
                                    info!(job = name, reason = %reason, "Job skipped");
                                }
                                Err(e) => {
                                    error!(
                                        job = name,
                                        elapsed_ms = start.elapsed().as_millis(),
                                        error = %e,
                                        "Job failed"
                                    );
                                }
                            }
                        }
                        _ = shutdown_rx.changed() => {
                            if *shutdown_rx.borrow() {
                                info!(job = name, "Job shutting down");
                                break;
                            }
                        }
                    }
                }
            });

            self.handles.push(handle);
        }
    }

    /// Initiate graceful shutdown of all jobs.
    /// Returns immediately after signaling shutdown.
    pub fn shutdown(&self) {
        info!("Initiating job scheduler shutdown");
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for all jobs to complete with timeout.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        info!("Waiting for jobs to complete (timeout: {:?})", timeout);

        let shutdown_future = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!("Job task panicked: {}", e);
                }
            }
        };

        match tokio::time::timeout(timeout, shutdown_future).await {
            Ok(()) => info!("All jobs completed gracefully"),
            Err(_) => warn!("Job shutdown timed out after {:?}", timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TestJob {
        run_count: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Job for TestJob {
        fn name(&self) -> &'static str {
            "test_job"
        }

        fn frequency(&self) -> JobFrequency {
            JobFrequency::Seconds(1)
        }

        async fn execute(&self) -> Result<JobOutcome, String> {
            self.run_count.fetch_add(1, Ordering::SeqCst);
            Ok(JobOutcome::Completed {
                detail: "ok".to_string(),
            })
        }
    }

    #[test]
    fn test_job_frequency_duration() {
        assert_eq!(
            JobFrequency::Seconds(30).duration(),
            Duration::from_secs(30)
        );
        assert_eq!(JobFrequency::Daily.duration(), Duration::from_secs(86400));
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = JobRegistry::new();
        registry.register(TestJob {
            run_count: Arc::new(AtomicUsize::new(0)),
        });

        assert_eq!(registry.len(), 1);
        assert!(registry.get("test_job").is_some());
        assert!(registry.get("unknown_job").is_none());
        assert_eq!(registry.names(), vec!["test_job"]);
    }

    #[tokio::test]
    async fn test_scheduler_runs_at_startup_and_shuts_down() {
        let mut registry = JobRegistry::new();
        let run_count = Arc::new(AtomicUsize::new(0));
        registry.register(TestJob {
            run_count: Arc::clone(&run_count),
        });

        let mut scheduler = JobScheduler::new(registry);
        scheduler.start();

        // Give the startup pass a moment to fire
        tokio::time::sleep(Duration::from_millis(100)).await;

        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(2)).await;

        // The first tick completes immediately: a restart never waits a
        // whole interval before its first pass.
        assert!(run_count.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_empty_registry() {
        let registry = JobRegistry::new();
        assert!(registry.is_empty());
        let scheduler = JobScheduler::new(registry);
        assert!(scheduler.handles.is_empty());
    }
}
