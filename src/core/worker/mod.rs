mod error;
mod pool;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use log::{debug, trace};

pub use error::{Error, Result};
pub use pool::join_workers;

use crate::core::{
    actor::{Actor, Step},
    collector::CollectorInput,
    stage::StageOutput,
    tag::{HasTag, TagId},
    transform::Transform,
    types::Predicate,
};

/// Counters shared by every worker of one run.
#[derive(Debug, Default)]
pub struct RunStats {
    transformed: AtomicUsize,
    accepted: AtomicUsize,
}

impl RunStats {
    pub fn transformed(&self) -> usize {
        self.transformed.load(Ordering::Acquire)
    }

    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::Acquire)
    }
}

pub struct Worker {
    tag: TagId,
    stage: StageOutput,
    collector: CollectorInput,
    transform: Arc<dyn Transform>,
    predicate: Predicate,
    stats: Arc<RunStats>,
    processed: usize,
}

impl Worker {
    pub fn new(
        index: usize,
        stage: StageOutput,
        collector: CollectorInput,
        transform: Arc<dyn Transform>,
        predicate: Predicate,
        stats: Arc<RunStats>,
    ) -> Self {
        Self {
            tag: TagId::worker(index),
            stage,
            collector,
            transform,
            predicate,
            stats,
            processed: 0,
        }
    }
}

impl HasTag for Worker {
    fn tag(&self) -> &TagId {
        &self.tag
    }
}

#[async_trait]
impl Actor for Worker {
    type Error = Error;

    async fn poll(&mut self) -> Result<Step> {
        let Some(record) = self.stage.pull().await? else {
            debug!("{}: stage exhausted after {} records", self.tag, self.processed);
            return Ok(Step::Done);
        };
        trace!("{}: pulled {}", self.tag, record);

        let transform = self.transform.clone();
        let transformed = tokio::task::spawn_blocking(move || transform.apply(record))
            .await
            .map_err(|err| Error::TransformPanicked(self.tag.clone(), err.to_string()))?;

        self.processed += 1;
        self.stats.transformed.fetch_add(1, Ordering::AcqRel);

        if !self.predicate.accepts(&transformed) {
            trace!("{}: rejected {}", self.tag, transformed);
            return Ok(Step::Continue);
        }

        trace!("{}: accepted {}", self.tag, transformed);
        self.collector.submit(transformed).await?;
        self.stats.accepted.fetch_add(1, Ordering::AcqRel);

        Ok(Step::Continue)
    }
}
