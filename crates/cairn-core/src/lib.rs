//! In-process ordered queue with a cooperative frozen state.
//!
//! [`BasicQueue`] keeps an ordered sequence of work items. Items can be added
//! at either end and taken out by position or by identity. While the queue is
//! frozen every such operation is rejected with [`QueueError::Frozen`].

mod ids;
pub mod queue;

pub use ids::QueueId;
pub use queue::{
    BasicQueue, BasicQueueBuilder, FrozenCallback, Identity, Outcome, QueueError, frozen_callback,
};
