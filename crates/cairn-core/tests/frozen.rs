use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use cairn_core::{BasicQueue, QueueError};

fn counting_queue(items: Vec<Arc<i32>>) -> (BasicQueue<Arc<i32>>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let q = BasicQueue::builder()
        .contents(items)
        .on_frozen(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .build();
    (q, calls)
}

#[test]
fn freeze_and_unfreeze() {
    let mut q: BasicQueue<i32> = BasicQueue::new();
    assert!(!q.is_frozen());

    q.freeze();
    assert!(q.is_frozen());

    q.unfreeze();
    assert!(!q.is_frozen());

    q.set_frozen(true);
    assert!(q.is_frozen());
}

#[test]
fn guard_reports_state() {
    let mut q: BasicQueue<i32> = BasicQueue::new();
    assert!(!q.check_frozen_and_notify());
    q.freeze();
    assert!(q.check_frozen_and_notify());
}

#[test]
fn every_operation_is_rejected_while_frozen() {
    let items: Vec<_> = (1..=5).map(Arc::new).collect();
    let member = Arc::clone(&items[2]);
    let (mut q, calls) = counting_queue(items);
    let before = q.contents().to_vec();
    q.freeze();

    assert_eq!(q.enqueue_tail(Arc::new(6)), Err(QueueError::Frozen));
    assert_eq!(q.enqueue_head(Arc::new(0)), Err(QueueError::Frozen));
    assert_eq!(q.peek_head(1), Err(QueueError::Frozen));
    assert_eq!(q.peek_tail(2), Err(QueueError::Frozen));
    assert_eq!(q.drain_all(), Err(QueueError::Frozen));
    assert_eq!(q.remove_range(2, 2), Err(QueueError::Frozen));
    assert_eq!(q.remove_by_value(&member), Err(QueueError::Frozen));
    assert_eq!(q.remove_at(2, 2), Err(QueueError::Frozen));

    assert_eq!(calls.load(Ordering::SeqCst), 8);
    assert_eq!(q.len(), before.len());
    assert!(
        q.contents()
            .iter()
            .zip(&before)
            .all(|(now, was)| Arc::ptr_eq(now, was))
    );

    q.unfreeze();
    q.remove_by_value(&member).unwrap();
    assert_eq!(q.len(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 8);
}

#[test]
fn callback_receives_the_queue() {
    let observed = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&observed);
    let mut q = BasicQueue::builder()
        .contents(vec![1, 2, 3])
        .frozen(true)
        .on_frozen(move |queue: &BasicQueue<i32>| {
            assert!(queue.is_frozen());
            sink.store(queue.len(), Ordering::SeqCst);
        })
        .build();

    assert!(q.check_frozen_and_notify());
    assert_eq!(observed.load(Ordering::SeqCst), 3);

    assert_eq!(q.enqueue_tail(4), Err(QueueError::Frozen));
    assert_eq!(observed.load(Ordering::SeqCst), 3);
}

#[test]
fn frozen_without_callback_still_rejects() {
    let mut q = BasicQueue::with_contents(vec![1]);
    q.freeze();
    assert_eq!(q.peek_head(1), Err(QueueError::Frozen));
    assert_eq!(q.contents(), &[1]);
}

#[test]
fn setting_callback_replaces_previous() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let mut q: BasicQueue<i32> = BasicQueue::new();
    let f = Arc::clone(&first);
    q.set_frozen_callback(move |_| {
        f.fetch_add(1, Ordering::SeqCst);
    });
    let s = Arc::clone(&second);
    q.set_frozen_callback(move |_| {
        s.fetch_add(1, Ordering::SeqCst);
    });

    q.freeze();
    assert!(q.check_frozen_and_notify());
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);

    q.clear_frozen_callback();
    assert!(q.frozen_callback().is_none());
    assert!(q.check_frozen_and_notify());
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn remove_range_keeps_explicit_freeze_off() {
    let (mut q, calls) = counting_queue((1..=5).map(Arc::new).collect());
    let removed = q.remove_range(1, 2).unwrap();

    assert_eq!(*removed[0], 2);
    assert_eq!(*removed[1], 3);
    assert!(!q.is_frozen());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
