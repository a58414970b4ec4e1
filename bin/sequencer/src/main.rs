//! Demo: a delayed feeder and a consumer sharing one `BasicQueue`.

mod feeder;

use std::{sync::Arc, time::Duration};

use cairn_core::BasicQueue;
use tokio::{
    sync::{Mutex, Notify},
    time::{interval, sleep},
};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::feeder::{Feeder, Job, SharedQueue};

const BATCH: usize = 2;

/// Queues the immediate jobs, then takes `export` back out by identity
/// before the consumer can see it. A lookalike job does not match.
async fn seed(queue: &SharedQueue) {
    let mut q = queue.lock().await;
    let export = Job::new("export");

    for job in [Job::new("ingest"), Arc::clone(&export), Job::new("index")] {
        let name = job.name.clone();
        if let Err(err) = q.enqueue_tail(job) {
            warn!(job = %name, %err, "enqueue failed");
        }
    }

    if let Err(err) = q.remove_by_value(&Job::new("export")) {
        info!(job = %export.name, %err, "lookalike job not cancelled");
    }
    match q.remove_by_value(&export) {
        Ok(()) => info!(job = %export.name, "job cancelled"),
        Err(err) => warn!(job = %export.name, %err, "job not cancelled"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    info!("starting sequencer demo");

    let queue: SharedQueue = Arc::new(Mutex::new(
        BasicQueue::builder()
            .on_frozen(|queue: &BasicQueue<Arc<Job>>| {
                warn!(
                    queue_id = %queue.id(),
                    pending = queue.len(),
                    "queue is frozen; operation rejected"
                );
            })
            .build(),
    ));

    let feeder = Feeder::spawn(Arc::clone(&queue));

    seed(&queue).await;

    // Delayed jobs, one of which jumps the line
    feeder.schedule(Job::new("compact"), Duration::from_secs(1));
    feeder.schedule(Job::urgent("rebuild"), Duration::from_secs(3));

    info!("jobs scheduled");

    // Consumer loop
    let shutdown = Arc::new(Notify::new());
    let consumer = {
        let queue = Arc::clone(&queue);
        let shutdown = Arc::clone(&shutdown);

        tokio::spawn(async move {
            let mut ticks = interval(Duration::from_millis(750));
            loop {
                tokio::select! {
                    _ = shutdown.notified() => break,
                    _ = ticks.tick() => {
                        match queue.lock().await.peek_head(BATCH) {
                            Ok(jobs) => {
                                for job in jobs {
                                    info!(job = %job.name, urgent = job.urgent, "processing job");
                                }
                            }
                            Err(err) => debug!(%err, "consumer skipped tick"),
                        }
                    }
                }
            }
            info!("consumer exited");
        })
    };

    // Hold the queue still for a while
    sleep(Duration::from_secs(2)).await;
    queue.lock().await.freeze();
    sleep(Duration::from_secs(2)).await;
    queue.lock().await.unfreeze();

    // Let system run
    sleep(Duration::from_secs(3)).await;

    info!("shutting down sequencer");
    shutdown.notify_one();
    let _ = consumer.await;
    feeder.shutdown().await;

    match queue.lock().await.drain_all() {
        Ok(left) if !left.is_empty() => warn!(count = left.len(), "jobs left unprocessed"),
        Ok(_) => info!("queue empty at shutdown"),
        Err(err) => warn!(%err, "could not drain queue"),
    }
}
