use std::{sync::Arc, time::Duration};

use cairn_core::{BasicQueue, QueueError};
use futures_util::StreamExt;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tokio_util::time::DelayQueue;
use tracing::{debug, info, warn};

/// How long a job waits before another delivery attempt when the queue is frozen.
pub(crate) const RETRY_DELAY: Duration = Duration::from_millis(500);

pub(crate) type SharedQueue = Arc<Mutex<BasicQueue<Arc<Job>>>>;

#[derive(Debug)]
pub(crate) struct Job {
    pub(crate) name: String,
    pub(crate) urgent: bool,
}

impl Job {
    pub(crate) fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            urgent: false,
        })
    }

    pub(crate) fn urgent(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            urgent: true,
        })
    }
}

#[derive(Debug)]
enum FeederCommand {
    Schedule { job: Arc<Job>, delay: Duration },
    Shutdown,
}

/// Moves jobs into a shared queue once their delay has elapsed.
#[derive(Debug)]
pub(crate) struct Feeder {
    cmd_tx: mpsc::Sender<FeederCommand>,
    handle: JoinHandle<()>,
}

impl Feeder {
    pub(crate) fn spawn(queue: SharedQueue) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(1024);
        let handle = tokio::spawn(feeder_loop(queue, cmd_rx));

        Self { cmd_tx, handle }
    }

    pub(crate) fn schedule(&self, job: Arc<Job>, delay: Duration) {
        debug!(
            job = %job.name,
            delay_ms = delay.as_millis(),
            "schedule delayed job"
        );

        if self
            .cmd_tx
            .try_send(FeederCommand::Schedule { job, delay })
            .is_err()
        {
            warn!("feeder unavailable; job not scheduled");
        }
    }

    pub(crate) async fn shutdown(self) {
        info!("feeder shutdown initiated");

        let _ = self.cmd_tx.send(FeederCommand::Shutdown).await;
        let _ = self.handle.await;

        info!("feeder shutdown complete");
    }
}

async fn feeder_loop(queue: SharedQueue, mut cmd_rx: mpsc::Receiver<FeederCommand>) {
    let mut delay_queue = DelayQueue::<Arc<Job>>::new();

    info!("feeder started");

    loop {
        tokio::select! {
            Some(cmd) = cmd_rx.recv() => {
                match cmd {
                    FeederCommand::Schedule { job, delay } => {
                        delay_queue.insert(job, delay);
                    }

                    FeederCommand::Shutdown => break,
                }
            }

            Some(expired) = delay_queue.next() => {
                let job = expired.into_inner();
                if let Err(QueueError::Frozen) = deliver(&queue, Arc::clone(&job)).await {
                    warn!(
                        job = %job.name,
                        retry_ms = RETRY_DELAY.as_millis(),
                        "queue frozen; retrying delivery"
                    );
                    delay_queue.insert(job, RETRY_DELAY);
                }
            }

            else => {
                break;
            }
        }
    }

    if !delay_queue.is_empty() {
        warn!(pending = delay_queue.len(), "feeder exiting with undelivered jobs");
    }
    info!("feeder exited");
}

async fn deliver(queue: &SharedQueue, job: Arc<Job>) -> Result<(), QueueError> {
    let mut queue = queue.lock().await;
    let name = job.name.clone();
    let urgent = job.urgent;

    if urgent {
        queue.enqueue_head(job)?;
    } else {
        queue.enqueue_tail(job)?;
    }

    debug!(job = %name, urgent, pending = queue.len(), "job delivered");
    Ok(())
}
