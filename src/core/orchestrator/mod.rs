//! Owns the lifecycle of one pipeline run.
//!
//! Components are started downstream first: stage, workers, the worker
//! join barrier, then the collector. Only then is the input fed. Shutdown
//! flows forward through closed channels: closing the stage input ends the
//! workers, the join barrier seals the collector, the collector ends the
//! drain.

mod error;

use std::sync::Arc;

use log::{debug, info};
use tokio_util::sync::CancellationToken;

pub use error::{Error, Result};

use crate::{
    config::{global::channel_buffer_size, pipeline::PipelineConfig},
    core::{
        actor, collector, stage,
        transform::{self, Transform},
        types::{Predicate, Record, TransformedRecord},
        worker::{self, RunStats, Worker},
    },
};

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub originals: Vec<Record>,
    /// Accepted records in collector arrival order, not input order.
    pub accepted: Vec<TransformedRecord>,
}

pub struct Orchestrator {
    transform: Arc<dyn Transform>,
    predicate: Predicate,
    stage_capacity: Option<usize>,
    channel_buffer_size: usize,
}

impl Orchestrator {
    pub fn new(transform: Arc<dyn Transform>, predicate: Predicate) -> Self {
        Self {
            transform,
            predicate,
            stage_capacity: None,
            channel_buffer_size: channel_buffer_size(),
        }
    }

    pub fn try_create_from(cfg: &PipelineConfig) -> Result<Self> {
        let orchestrator = Self::new(transform::create_from(&cfg.transform), cfg.predicate);

        Ok(match cfg.stage_capacity {
            Some(capacity) => orchestrator.with_stage_capacity(capacity),
            None => orchestrator,
        })
    }

    pub fn with_stage_capacity(mut self, capacity: usize) -> Self {
        self.stage_capacity = Some(capacity);
        self
    }

    #[cfg(test)]
    pub fn with_channel_buffer_size(mut self, size: usize) -> Self {
        self.channel_buffer_size = size;
        self
    }

    pub async fn run(&self, records: Vec<Record>, worker_count: usize) -> Result<RunOutput> {
        if records.is_empty() {
            return Err(Error::EmptyInput);
        }
        if worker_count == 0 {
            return Err(Error::NoWorkers);
        }

        let total = records.len();
        let capacity = self
            .stage_capacity
            .unwrap_or_else(|| stage::default_capacity(total));
        info!(
            "Running {} records through {} workers (stage capacity {}, accepting {})",
            total, worker_count, capacity, self.predicate
        );

        let ctx = CancellationToken::new();
        let stats = Arc::new(RunStats::default());

        let (stage_in, stage_out, stage) = stage::channel(capacity, self.channel_buffer_size);
        let (submit, seal, drain, collector) =
            collector::channel(total, self.channel_buffer_size);

        let stage_handle = actor::spawn(Box::new(stage), ctx.child_token());

        let workers = (0..worker_count)
            .map(|index| {
                let worker = Worker::new(
                    index,
                    stage_out.clone(),
                    submit.clone(),
                    self.transform.clone(),
                    self.predicate,
                    stats.clone(),
                );
                actor::spawn(Box::new(worker), ctx.child_token())
            })
            .collect::<Vec<_>>();
        // Workers hold the only remaining ends.
        drop(stage_out);
        drop(submit);

        let joiner = tokio::spawn(worker::join_workers(workers, seal, ctx.clone()));
        let collector_handle = actor::spawn(Box::new(collector), ctx.child_token());

        let fed = feed(stage_in, &records).await;
        let accepted = drain.collect().await;
        debug!("Drained {} accepted records", accepted.len());

        // A failed actor explains a failed feed, so report actor errors first.
        joiner.await??;
        stage_handle.await??;
        collector_handle.await??;
        fed?;

        let transformed = stats.transformed();
        if transformed != total {
            return Err(Error::LostRecords {
                expected: total,
                transformed,
            });
        }
        if stats.accepted() != accepted.len() {
            return Err(Error::Undelivered {
                accepted: stats.accepted(),
                drained: accepted.len(),
            });
        }

        info!("Run finished: {}/{} records accepted", accepted.len(), total);

        Ok(RunOutput {
            originals: records,
            accepted,
        })
    }
}

async fn feed(input: stage::StageInput, records: &[Record]) -> stage::Result<()> {
    for record in records {
        input.push(record.clone()).await?;
    }
    input.close_input();
    debug!("Fed {} records, input closed", records.len());

    Ok(())
}
