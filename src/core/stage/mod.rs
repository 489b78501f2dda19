//! Bounded staging area between the source and the worker pool.
//!
//! The buffer runs as an actor owning its queue. Producers push through
//! [`StageInput`] and wait for an acknowledgement, consumers pull through
//! [`StageOutput`] with a request/response round trip. The actor only listens
//! for pushes while it has room and only serves pulls while it has something
//! to hand out (or knows nothing more will come).

mod error;

use std::collections::VecDeque;

use async_trait::async_trait;
use log::{debug, trace};
use tokio::sync::{mpsc, oneshot};

pub use error::{Error, Result};

use crate::core::{
    actor::{Actor, Step},
    tag::{HasTag, TagId},
    types::Record,
};

struct Push {
    record: Record,
    ack: oneshot::Sender<()>,
}

type Pull = oneshot::Sender<Option<Record>>;

/// Capacity used when none is configured: strictly less than the whole input
/// so the source and the workers genuinely overlap.
pub fn default_capacity(total: usize) -> usize {
    (total / 2).saturating_sub(1).max(1)
}

/// Creates a stage buffer holding at most `capacity` records.
///
/// `request_buffer` bounds the number of in-flight pull requests.
pub fn channel(capacity: usize, request_buffer: usize) -> (StageInput, StageOutput, StageBuffer) {
    let (push_tx, push_rx) = mpsc::channel(1);
    let (pull_tx, pull_rx) = mpsc::channel(request_buffer.max(1));
    let capacity = capacity.max(1);

    let stage = StageBuffer {
        tag: TagId::stage(),
        capacity,
        queue: VecDeque::with_capacity(capacity),
        pushes: push_rx,
        pulls: pull_rx,
        input_closed: false,
        delivered: 0,
    };

    (
        StageInput { tx: push_tx },
        StageOutput { tx: pull_tx },
        stage,
    )
}

/// Producer side. There is exactly one per buffer.
pub struct StageInput {
    tx: mpsc::Sender<Push>,
}

impl StageInput {
    /// Enqueues `record`, suspending until the buffer has taken it.
    pub async fn push(&self, record: Record) -> Result<()> {
        let (ack, acked) = oneshot::channel();
        self.tx
            .send(Push { record, ack })
            .await
            .map_err(|_| Error::Closed)?;

        acked.await.map_err(|_| Error::Closed)
    }

    /// Marks the end of input. Consumers drain what is left and then see
    /// exhaustion.
    pub fn close_input(self) {
        drop(self.tx);
    }
}

/// Consumer side, cloned once per worker.
#[derive(Clone)]
pub struct StageOutput {
    tx: mpsc::Sender<Pull>,
}

impl StageOutput {
    /// Takes one record out of the buffer. Returns `None` once input is
    /// closed and every record has been handed out.
    pub async fn pull(&self) -> Result<Option<Record>> {
        let (reply, replied) = oneshot::channel();
        self.tx.send(reply).await.map_err(|_| Error::Closed)?;

        replied.await.map_err(|_| Error::Closed)
    }
}

pub struct StageBuffer {
    tag: TagId,
    capacity: usize,
    queue: VecDeque<Record>,
    pushes: mpsc::Receiver<Push>,
    pulls: mpsc::Receiver<Pull>,
    input_closed: bool,
    delivered: usize,
}

impl StageBuffer {
    fn accept(&mut self, push: Option<Push>) {
        match push {
            Some(Push { record, ack }) => {
                trace!("{}: staged {}", self.tag, record);
                self.queue.push_back(record);
                // The producer may have given up waiting, the record is ours regardless.
                let _ = ack.send(());
            }
            None => {
                debug!(
                    "{}: input closed with {} records queued",
                    self.tag,
                    self.queue.len()
                );
                self.input_closed = true;
            }
        }
    }

    fn serve(&mut self, reply: Pull) {
        let record = self.queue.pop_front();
        let handed_out = record.is_some();

        if let Err(Some(record)) = reply.send(record) {
            // Requester went away before the reply, keep the record for someone else.
            self.queue.push_front(record);
            return;
        }

        if handed_out {
            self.delivered += 1;
        }
    }
}

impl HasTag for StageBuffer {
    fn tag(&self) -> &TagId {
        &self.tag
    }
}

#[async_trait]
impl Actor for StageBuffer {
    type Error = Error;

    async fn poll(&mut self) -> Result<Step> {
        let has_room = !self.input_closed && self.queue.len() < self.capacity;
        let can_serve = !self.queue.is_empty() || self.input_closed;

        tokio::select! {
            push = self.pushes.recv(), if has_room => {
                self.accept(push);
            }
            pull = self.pulls.recv(), if can_serve => match pull {
                Some(reply) => self.serve(reply),
                None if self.input_closed && self.queue.is_empty() => {
                    debug!("{}: exhausted after {} records", self.tag, self.delivered);
                    return Ok(Step::Done);
                }
                None => return Err(Error::Abandoned(self.queue.len())),
            },
        }

        Ok(Step::Continue)
    }
}
