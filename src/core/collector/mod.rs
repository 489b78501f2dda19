//! Fan-in of accepted records from every worker.
//!
//! Shutdown is two-phase. The [`Seal`] is fired by the worker join barrier
//! once every worker has returned; only after that, and after the intake and
//! the internal queue are both empty, does the collector drop its output and
//! thereby end the [`Drain`].

mod error;

use std::collections::VecDeque;

use async_trait::async_trait;
use log::{debug, trace, warn};
use tokio::sync::{mpsc, oneshot};

pub use error::{Error, Result};

use crate::core::{
    actor::{Actor, Step},
    tag::{HasTag, TagId},
    types::TransformedRecord,
};

/// Creates a collector whose internal queue holds at most `capacity` records.
///
/// `request_buffer` bounds the submission channel, a full channel suspends
/// the submitting worker.
pub fn channel(capacity: usize, request_buffer: usize) -> (CollectorInput, Seal, Drain, Collector) {
    let (submit_tx, submit_rx) = mpsc::channel(request_buffer.max(1));
    let (seal_tx, seal_rx) = oneshot::channel();
    let (out_tx, out_rx) = mpsc::channel(1);
    let capacity = capacity.max(1);

    let collector = Collector {
        tag: TagId::collector(),
        capacity,
        queue: VecDeque::with_capacity(capacity),
        submissions: submit_rx,
        intake_closed: false,
        seal: seal_rx,
        sealed: false,
        output: out_tx,
        collected: 0,
    };

    (
        CollectorInput { tx: submit_tx },
        Seal { tx: seal_tx },
        Drain { rx: out_rx },
        collector,
    )
}

#[derive(Clone)]
pub struct CollectorInput {
    tx: mpsc::Sender<TransformedRecord>,
}

impl CollectorInput {
    pub async fn submit(&self, record: TransformedRecord) -> Result<()> {
        self.tx.send(record).await.map_err(|_| Error::Closed)
    }
}

/// The no-more-submissions signal. Firing consumes it.
pub struct Seal {
    tx: oneshot::Sender<()>,
}

impl Seal {
    pub fn seal(self) {
        // A vanished collector has nothing left to seal.
        let _ = self.tx.send(());
    }
}

pub struct Drain {
    rx: mpsc::Receiver<TransformedRecord>,
}

impl Drain {
    /// Next accepted record in arrival order, `None` once the collector has
    /// finished.
    pub async fn next(&mut self) -> Option<TransformedRecord> {
        self.rx.recv().await
    }

    pub async fn collect(mut self) -> Vec<TransformedRecord> {
        let mut records = vec![];
        while let Some(record) = self.next().await {
            records.push(record);
        }
        records
    }
}

pub struct Collector {
    tag: TagId,
    capacity: usize,
    queue: VecDeque<TransformedRecord>,
    submissions: mpsc::Receiver<TransformedRecord>,
    intake_closed: bool,
    seal: oneshot::Receiver<()>,
    sealed: bool,
    output: mpsc::Sender<TransformedRecord>,
    collected: usize,
}

impl Collector {
    fn on_sealed(&mut self, signal: std::result::Result<(), oneshot::error::RecvError>) {
        if signal.is_err() {
            warn!("{}: seal dropped without firing, closing intake", self.tag);
        }
        debug!("{}: sealed, {} records pending", self.tag, self.queue.len());

        self.sealed = true;
        // Anything already sent is still received, later sends fail.
        self.submissions.close();
    }

    fn on_submission(&mut self, record: Option<TransformedRecord>) {
        match record {
            Some(record) => {
                trace!("{}: collected {}", self.tag, record);
                self.collected += 1;
                self.queue.push_back(record);
            }
            None => {
                debug!("{}: intake exhausted", self.tag);
                self.intake_closed = true;
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.sealed && self.intake_closed && self.queue.is_empty()
    }
}

impl HasTag for Collector {
    fn tag(&self) -> &TagId {
        &self.tag
    }
}

#[async_trait]
impl Actor for Collector {
    type Error = Error;

    async fn poll(&mut self) -> Result<Step> {
        if self.is_finished() {
            debug!("{}: drained {} records", self.tag, self.collected);
            return Ok(Step::Done);
        }

        let can_accept = !self.intake_closed && self.queue.len() < self.capacity;
        let can_deliver = !self.queue.is_empty();

        tokio::select! {
            signal = &mut self.seal, if !self.sealed => {
                self.on_sealed(signal);
            }
            record = self.submissions.recv(), if can_accept => {
                self.on_submission(record);
            }
            permit = self.output.clone().reserve_owned(), if can_deliver => match permit {
                Ok(permit) => {
                    if let Some(record) = self.queue.pop_front() {
                        permit.send(record);
                    }
                }
                Err(_) => return Err(Error::DrainDropped(self.queue.len())),
            },
        }

        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::{actor, types::Record};
    use tokio_util::sync::CancellationToken;

    fn accepted(id: i64) -> TransformedRecord {
        TransformedRecord {
            original: Record::new(id, 1.0, "src"),
            id: -id,
            age: -1.0,
            name: "DERIVED".into(),
        }
    }

    #[tokio::test]
    async fn test_drains_in_arrival_order() {
        let (input, seal, drain, collector) = channel(8, 1);
        let handle = actor::spawn(Box::new(collector), CancellationToken::new());

        for id in 1..=3 {
            input.submit(accepted(id)).await.unwrap();
        }
        drop(input);
        seal.seal();

        let ids = drain.collect().await.iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![-1, -2, -3]);
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_waits_for_seal() {
        let (input, seal, mut drain, collector) = channel(4, 1);
        let _handle = actor::spawn(Box::new(collector), CancellationToken::new());

        input.submit(accepted(1)).await.unwrap();
        drop(input);

        assert_eq!(drain.next().await.unwrap().id, -1);

        // Every submitter is gone but nothing has sealed the collector yet.
        let pending = tokio::time::timeout(Duration::from_millis(50), drain.next()).await;
        assert!(pending.is_err());

        seal.seal();
        assert!(drain.next().await.is_none());
    }

    #[tokio::test]
    async fn test_keeps_buffered_submissions_after_seal() {
        let (input, seal, drain, collector) = channel(4, 4);

        // Submissions sit in the channel before the collector ever runs.
        for id in 1..=4 {
            input.submit(accepted(id)).await.unwrap();
        }
        drop(input);
        seal.seal();

        let handle = actor::spawn(Box::new(collector), CancellationToken::new());
        assert_eq!(drain.collect().await.len(), 4);
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_submit_after_seal_fails() {
        let (input, seal, drain, collector) = channel(4, 1);
        let handle = actor::spawn(Box::new(collector), CancellationToken::new());

        seal.seal();
        assert!(drain.collect().await.is_empty());
        assert!(handle.await.unwrap().is_ok());
        assert!(matches!(input.submit(accepted(1)).await, Err(Error::Closed)));
    }

    #[tokio::test]
    async fn test_dropped_drain_is_an_error() {
        let (input, _seal, drain, collector) = channel(4, 1);
        let handle = actor::spawn(Box::new(collector), CancellationToken::new());

        drop(drain);
        input.submit(accepted(1)).await.unwrap();

        let result = handle.await.unwrap();
        assert!(matches!(
            result,
            Err(actor::Error::Collector(Error::DrainDropped(1)))
        ));
    }
}
