//! An ordered work queue with a cooperative "frozen" switch.
//!
//! Every read or write first checks the frozen flag. While it is set the
//! operation returns [`QueueError::Frozen`], leaves the contents alone and
//! notifies the frozen callback, if one is registered.
//!
//! # Destructive reads
//!
//! [`BasicQueue::peek_head`], [`BasicQueue::peek_tail`] and
//! [`BasicQueue::remove_range`] *remove* what they return. Despite the name,
//! there is no non-destructive peek.

mod builder;
mod dynamic;
mod errors;
mod identity;
mod outcome;
mod splice;

use std::{any::Any, collections::VecDeque, fmt, sync::Arc};

use tracing::{debug, info, warn};

use crate::QueueId;

pub use builder::BasicQueueBuilder;
pub use errors::QueueError;
pub use identity::Identity;
pub use outcome::Outcome;

/// Invoked with the queue whenever an operation is attempted while frozen.
pub type FrozenCallback<T> = Arc<dyn Fn(&BasicQueue<T>) + Send + Sync>;

/// Wraps a closure as a [`FrozenCallback`].
pub fn frozen_callback<T, F>(callback: F) -> FrozenCallback<T>
where
    F: Fn(&BasicQueue<T>) + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// Ordered queue of work items, head at index 0.
pub struct BasicQueue<T> {
    id: QueueId,
    items: Vec<T>,
    frozen: bool,
    on_frozen: Option<FrozenCallback<T>>,
}

impl<T> BasicQueue<T> {
    /// Empty, unfrozen, no callback.
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), false, None)
    }

    /// Takes ownership of `items` as the initial contents.
    pub fn with_contents(items: Vec<T>) -> Self {
        Self::from_parts(items, false, None)
    }

    /// Starts a [`BasicQueueBuilder`].
    pub fn builder() -> BasicQueueBuilder<T> {
        BasicQueueBuilder::new()
    }

    fn from_parts(items: Vec<T>, frozen: bool, on_frozen: Option<FrozenCallback<T>>) -> Self {
        let id = QueueId::new();
        debug!(
            queue_id = %id,
            len = items.len(),
            frozen,
            has_callback = on_frozen.is_some(),
            "queue created"
        );

        Self {
            id,
            items,
            frozen,
            on_frozen,
        }
    }

    /// Id attached to this queue's log events.
    pub fn id(&self) -> &QueueId {
        &self.id
    }

    /// Current contents, head first.
    pub fn contents(&self) -> &[T] {
        &self.items
    }

    /// Replaces the whole backing sequence. Not subject to the frozen check.
    pub fn set_contents(&mut self, items: Vec<T>) {
        debug!(queue_id = %self.id, len = items.len(), "contents replaced");
        self.items = items;
    }

    /// Consumes the queue and hands back its contents.
    pub fn into_contents(self) -> Vec<T> {
        self.items
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` while operations are being rejected.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Sets the frozen flag.
    pub fn set_frozen(&mut self, frozen: bool) {
        if self.frozen != frozen {
            info!(queue_id = %self.id, frozen, "frozen state changed");
        }
        self.frozen = frozen;
    }

    /// Accepts only a `bool`; anything else is ignored and `false` returned.
    pub fn set_frozen_dynamic(&mut self, value: &dyn Any) -> bool {
        match dynamic::as_flag(value) {
            Some(frozen) => {
                self.set_frozen(frozen);
                true
            }
            None => {
                warn!(queue_id = %self.id, "ignoring non-boolean frozen value");
                false
            }
        }
    }

    /// Starts rejecting operations.
    pub fn freeze(&mut self) {
        self.set_frozen(true);
    }

    /// Stops rejecting operations.
    pub fn unfreeze(&mut self) {
        self.set_frozen(false);
    }

    /// The registered frozen callback, if any.
    pub fn frozen_callback(&self) -> Option<&FrozenCallback<T>> {
        self.on_frozen.as_ref()
    }

    /// Registers `callback`, replacing any previous one.
    pub fn set_frozen_callback<F>(&mut self, callback: F)
    where
        F: Fn(&BasicQueue<T>) + Send + Sync + 'static,
    {
        self.on_frozen = Some(frozen_callback(callback));
    }

    /// Removes the frozen callback.
    pub fn clear_frozen_callback(&mut self) {
        self.on_frozen = None;
    }

    /// Returns `true` when frozen, after handing `self` to the frozen callback.
    pub fn check_frozen_and_notify(&self) -> bool {
        if !self.frozen {
            return false;
        }

        debug!(queue_id = %self.id, "operation rejected: queue is frozen");
        if let Some(callback) = &self.on_frozen {
            callback(self);
        }

        true
    }

    fn guard(&self) -> Result<(), QueueError> {
        if self.check_frozen_and_notify() {
            return Err(QueueError::Frozen);
        }
        Ok(())
    }

    /// Appends `item` at the tail.
    pub fn enqueue_tail(&mut self, item: T) -> Result<(), QueueError> {
        self.guard()?;
        self.items.push(item);
        debug!(queue_id = %self.id, len = self.items.len(), "enqueued at tail");
        Ok(())
    }

    /// Inserts `item` at the head.
    pub fn enqueue_head(&mut self, item: T) -> Result<(), QueueError> {
        self.guard()?;
        self.items.insert(0, item);
        debug!(queue_id = %self.id, len = self.items.len(), "enqueued at head");
        Ok(())
    }

    /// Removes and returns up to `qty` items from the head, in queue order.
    ///
    /// This is a dequeue: the returned items are no longer in the queue.
    pub fn peek_head(&mut self, qty: usize) -> Result<Vec<T>, QueueError> {
        self.guard()?;
        self.remove_range(0, qty)
    }

    /// Removes up to `qty` items from the tail and returns them tail-first.
    ///
    /// Like [`peek_head`](Self::peek_head) this mutates the queue.
    pub fn peek_tail(&mut self, qty: usize) -> Result<Vec<T>, QueueError> {
        self.guard()?;
        let index = isize::try_from(qty).map_or(isize::MIN, |qty| -qty);
        let mut removed = self.remove_range(index, qty)?;
        removed.reverse();
        Ok(removed)
    }

    /// Removes and returns every item, in queue order.
    pub fn drain_all(&mut self) -> Result<Vec<T>, QueueError> {
        self.guard()?;
        self.remove_range(0, self.items.len())
    }

    /// Removes and returns up to `qty` items starting at `index`.
    ///
    /// A negative `index` counts back from the tail. An index past the end
    /// removes nothing. When the range starts somewhere other than the head
    /// or the last item the queue reads as frozen until the splice is done.
    pub fn remove_range(&mut self, index: isize, qty: usize) -> Result<Vec<T>, QueueError> {
        self.guard()?;

        let removed = if index == 0 || index == -1 {
            splice::splice(&mut self.items, index, qty)
        } else {
            let _hold = splice::FrozenHold::new(&mut self.frozen);
            splice::splice(&mut self.items, index, qty)
        };

        debug!(
            queue_id = %self.id,
            index,
            requested = qty,
            removed = removed.len(),
            remaining = self.items.len(),
            "removed range"
        );
        Ok(removed)
    }

    /// Removes `qty` items starting at `index` and reports how many went.
    ///
    /// Fails with [`QueueError::NothingRemoved`] when the range was empty.
    pub fn remove_at(&mut self, index: isize, qty: usize) -> Result<usize, QueueError> {
        let len = self.items.len();
        let removed = self.remove_range(index, qty)?;
        if removed.is_empty() {
            return Err(QueueError::NothingRemoved { index, len });
        }
        Ok(removed.len())
    }

    /// Removes the first item identical to `item`.
    ///
    /// See [`Identity`] for what "identical" means per type.
    pub fn remove_by_value(&mut self, item: &T) -> Result<(), QueueError>
    where
        T: Identity,
    {
        self.guard()?;

        let position = self
            .items
            .iter()
            .position(|queued| queued.is_same(item))
            .ok_or(QueueError::NotFound)?;
        self.items.remove(position);

        debug!(queue_id = %self.id, position, "removed item by identity");
        Ok(())
    }
}

impl<T: 'static> BasicQueue<T> {
    /// Builds a queue from untyped input. Anything other than a `Vec<T>` or
    /// `VecDeque<T>` becomes an empty queue. A callback that is not callable
    /// leaves the callback unset; see
    /// [`set_frozen_callback_dynamic`](Self::set_frozen_callback_dynamic)
    /// for the accepted forms.
    pub fn from_dynamic(initial: Box<dyn Any>, callback: Option<Box<dyn Any>>) -> Self {
        let items = dynamic::as_sequence(initial).unwrap_or_else(|| {
            warn!("initial contents are not a sequence; starting empty");
            Vec::new()
        });
        let on_frozen = callback.and_then(|callback| {
            let callback = dynamic::as_callback(callback);
            if callback.is_none() {
                warn!("frozen callback is not callable; leaving it unset");
            }
            callback
        });

        Self::from_parts(items, false, on_frozen)
    }

    /// Replaces the contents if `value` is a `Vec<T>` or `VecDeque<T>`;
    /// otherwise keeps the current contents and returns `false`.
    pub fn set_contents_dynamic(&mut self, value: Box<dyn Any>) -> bool {
        match dynamic::as_sequence(value) {
            Some(items) => {
                self.set_contents(items);
                true
            }
            None => {
                warn!(queue_id = %self.id, "ignoring non-sequence contents");
                false
            }
        }
    }

    /// Replaces the callback if `value` is callable; otherwise keeps the
    /// current one and returns `false`.
    ///
    /// Callable means a [`FrozenCallback<T>`], a `fn(&BasicQueue<T>)`
    /// pointer or a `Box<dyn Fn(&BasicQueue<T>) + Send + Sync>`. A bare
    /// closure has an anonymous type that `dyn Any` cannot recognise, so
    /// wrap it with [`frozen_callback`] first. The same goes for a named
    /// `fn` item, which needs a cast to the pointer type.
    pub fn set_frozen_callback_dynamic(&mut self, value: Box<dyn Any>) -> bool {
        match dynamic::as_callback(value) {
            Some(callback) => {
                self.on_frozen = Some(callback);
                true
            }
            None => {
                warn!(queue_id = %self.id, "ignoring non-callable frozen callback");
                false
            }
        }
    }
}

impl<T> Default for BasicQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for BasicQueue<T> {
    fn from(items: Vec<T>) -> Self {
        Self::with_contents(items)
    }
}

impl<T> From<VecDeque<T>> for BasicQueue<T> {
    fn from(items: VecDeque<T>) -> Self {
        Self::with_contents(Vec::from(items))
    }
}

impl<T> FromIterator<T> for BasicQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::with_contents(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for BasicQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicQueue")
            .field("id", &self.id)
            .field("items", &self.items)
            .field("frozen", &self.frozen)
            .field("on_frozen", &self.on_frozen.is_some())
            .finish()
    }
}
