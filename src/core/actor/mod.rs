use async_trait::async_trait;
use log::{debug, error, info};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::tag::HasTag;

mod error;

pub use error::{Error, Result};

const SLOW_POLL: std::time::Duration = std::time::Duration::from_millis(200);

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Done,
}

#[async_trait]
pub trait Actor: HasTag + Send + 'static {
    type Error: Send + 'static + Into<error::Error>;
    async fn poll(&mut self) -> std::result::Result<Step, Self::Error>;
}

/// Drives `actor` until it reports [`Step::Done`], fails, or `ctx` is cancelled.
pub fn spawn<T, Error>(actor: Box<T>, ctx: CancellationToken) -> JoinHandle<Result<()>>
where
    T: Actor<Error = Error> + Send + 'static + ?Sized,
    Error: Send + 'static + Into<error::Error>,
{
    let tag = actor.tag().clone();
    let mut actor = actor;

    tokio::spawn(async move {
        let actor = actor.as_mut();
        debug!("{} ({}): started", tag, tag.scope());

        loop {
            let poll_start = std::time::Instant::now();

            tokio::select! {
                biased;

                _ = ctx.cancelled() => {
                    info!("{}: cancelled", tag);
                    return Err(error::Error::Cancelled(tag));
                }
                r = actor.poll() => match r {
                    Ok(Step::Continue) => {}
                    Ok(Step::Done) => {
                        debug!("{}: finished", tag);
                        return Ok(());
                    }
                    Err(err) => {
                        let err: error::Error = err.into();
                        error!("{}: error: {}", tag, err);
                        return Err(err);
                    },
                }
            }

            let poll_elapsed = poll_start.elapsed();
            if poll_elapsed > SLOW_POLL {
                debug!("{}: poll took {:?}", tag, poll_elapsed);
            }

            // Yield to allow other tasks to run
            tokio::task::yield_now().await;
        }
    })
}
