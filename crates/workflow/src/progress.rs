//! Progress tracking for long-running bulk-enrollment jobs.
//!
//! Clients poll by opaque job id while an import runs. Entries expire ten
//! minutes after their last update so the map stays bounded; the store is
//! an external collaborator of the engine and never participates in its
//! transactions.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;
use uuid::Uuid;

/// How long a job entry survives after its last update.
pub const JOB_TTL: Duration = Duration::from_secs(600);

/// A snapshot of one bulk job's progress.
#[derive(Debug, Clone, Serialize)]
pub struct JobProgress {
    pub job_id: Uuid,
    pub total: u32,
    pub processed: u32,
    pub failed: u32,
    pub message: Option<String>,
    pub finished: bool,
}

struct Entry {
    progress: JobProgress,
    updated_at: Instant,
}

/// Process-wide store of bulk-job progress snapshots.
pub struct JobStore {
    ttl: Duration,
    jobs: Mutex<HashMap<Uuid, Entry>>,
}

impl Default for JobStore {
    fn default() -> Self {
        Self::with_ttl(JOB_TTL)
    }
}

impl JobStore {
    /// Create a store with a custom entry TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Register a new job, returning its polling id.
    pub fn start(&self, total: u32) -> Uuid {
        let job_id = Uuid::new_v4();
        let progress = JobProgress {
            job_id,
            total,
            processed: 0,
            failed: 0,
            message: None,
            finished: false,
        };
        let mut jobs = self.jobs.lock().expect("job store lock poisoned");
        Self::evict_expired(&mut jobs, self.ttl);
        jobs.insert(
            job_id,
            Entry {
                progress,
                updated_at: Instant::now(),
            },
        );
        job_id
    }

    /// Update a job's counters. Returns `false` if the job is unknown or
    /// already expired.
    pub fn update(
        &self,
        job_id: Uuid,
        processed: u32,
        failed: u32,
        message: Option<String>,
    ) -> bool {
        let mut jobs = self.jobs.lock().expect("job store lock poisoned");
        Self::evict_expired(&mut jobs, self.ttl);
        match jobs.get_mut(&job_id) {
            Some(entry) => {
                entry.progress.processed = processed;
                entry.progress.failed = failed;
                entry.progress.message = message;
                entry.updated_at = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Mark a job as finished. The entry remains pollable until its TTL
    /// lapses.
    pub fn finish(&self, job_id: Uuid, message: Option<String>) -> bool {
        let mut jobs = self.jobs.lock().expect("job store lock poisoned");
        match jobs.get_mut(&job_id) {
            Some(entry) => {
                entry.progress.finished = true;
                entry.progress.message = message;
                entry.updated_at = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Current snapshot for a job, if it exists and has not expired.
    pub fn get(&self, job_id: Uuid) -> Option<JobProgress> {
        let mut jobs = self.jobs.lock().expect("job store lock poisoned");
        Self::evict_expired(&mut jobs, self.ttl);
        jobs.get(&job_id).map(|entry| entry.progress.clone())
    }

    fn evict_expired(jobs: &mut HashMap<Uuid, Entry>, ttl: Duration) {
        let now = Instant::now();
        jobs.retain(|_, entry| now.duration_since(entry.updated_at) < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_update_and_poll() {
        let store = JobStore::default();
        let id = store.start(10);

        assert!(store.update(id, 4, 1, Some("row 4 skipped".into())));

        let progress = store.get(id).expect("job should be pollable");
        assert_eq!(progress.total, 10);
        assert_eq!(progress.processed, 4);
        assert_eq!(progress.failed, 1);
        assert!(!progress.finished);
    }

    #[test]
    fn finish_marks_job_done() {
        let store = JobStore::default();
        let id = store.start(2);
        assert!(store.finish(id, None));
        assert!(store.get(id).expect("still pollable").finished);
    }

    #[test]
    fn unknown_job_is_none() {
        let store = JobStore::default();
        assert!(store.get(Uuid::new_v4()).is_none());
        assert!(!store.update(Uuid::new_v4(), 1, 0, None));
    }

    #[test]
    fn expired_jobs_are_evicted() {
        let store = JobStore::with_ttl(Duration::from_millis(0));
        let id = store.start(1);
        // TTL of zero expires the entry immediately.
        assert!(store.get(id).is_none());
        assert!(!store.update(id, 1, 0, None));
    }
}
