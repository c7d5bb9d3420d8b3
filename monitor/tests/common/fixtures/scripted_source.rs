//! Status source that replays a fixed script of query results

use mina_monitor::errors::StatusQueryError;
use mina_monitor::{StatusSnapshot, StatusSource};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type QueryResult = Result<StatusSnapshot, StatusQueryError>;

/// Replays scripted results in order; once the script runs out the
/// fallback result is returned forever.
pub struct ScriptedStatusSource {
    script: Mutex<VecDeque<QueryResult>>,
    fallback: QueryResult,
    calls: AtomicUsize,
}

impl ScriptedStatusSource {
    pub fn new(script: Vec<QueryResult>, fallback: QueryResult) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always answers with the same result
    pub fn constant(result: QueryResult) -> Self {
        Self::new(Vec::new(), result)
    }

    /// `count` copies of the same snapshot, then the snapshot again forever
    pub fn repeat(snapshot: StatusSnapshot, count: usize) -> Self {
        Self::new(vec![Ok(snapshot.clone()); count], Ok(snapshot))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StatusSource for ScriptedStatusSource {
    async fn fetch_status(&self) -> QueryResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}
