use futures::{stream::FuturesUnordered, StreamExt};
use log::{debug, error};
use rand::Rng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    config::pipeline::WorkerCount,
    core::{actor, collector::Seal},
};

/// Waits for every worker. The first failure cancels the whole run; if all of
/// them finish cleanly the collector is sealed, exactly once.
pub async fn join_workers(
    handles: Vec<JoinHandle<actor::Result<()>>>,
    seal: Seal,
    ctx: CancellationToken,
) -> actor::Result<()> {
    let total = handles.len();
    let mut pending = handles.into_iter().collect::<FuturesUnordered<_>>();
    let mut finished = 0;

    while let Some(joined) = pending.next().await {
        match joined {
            Ok(Ok(())) => {
                finished += 1;
                debug!("join: {}/{} workers finished", finished, total);
            }
            Ok(Err(err)) => {
                error!("join: worker failed, aborting run: {}", err);
                ctx.cancel();
                return Err(err);
            }
            Err(err) => {
                error!("join: worker task died, aborting run: {}", err);
                ctx.cancel();
                return Err(actor::Error::Lost(err.to_string()));
            }
        }
    }

    seal.seal();
    Ok(())
}

impl WorkerCount {
    /// Turns the configured policy into a concrete count for an input of
    /// `total` records.
    pub fn resolve(&self, total: usize) -> usize {
        match self {
            WorkerCount::Fixed(n) => *n,
            WorkerCount::Policy(_) => {
                let upper = total / 4 + 2;
                rand::rng().random_range(2..upper.max(3))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::pipeline::WorkerPolicy;

    #[test]
    fn test_fixed_count() {
        assert_eq!(WorkerCount::Fixed(5).resolve(1), 5);
    }

    #[test]
    fn test_random_count_range() {
        let policy = WorkerCount::Policy(WorkerPolicy::Random);
        for _ in 0..100 {
            let n = policy.resolve(40);
            assert!((2..12).contains(&n));
        }
        assert_eq!(policy.resolve(3), 2);
    }
}
