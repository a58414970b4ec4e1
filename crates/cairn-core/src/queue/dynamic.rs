//! Type guards for the dynamically typed entry points. Each returns `None`
//! when the value is not of the accepted kind so the caller can ignore it.

use std::{any::Any, collections::VecDeque, sync::Arc};

use super::{BasicQueue, FrozenCallback};

pub(crate) fn as_sequence<T: 'static>(value: Box<dyn Any>) -> Option<Vec<T>> {
    match value.downcast::<Vec<T>>() {
        Ok(items) => Some(*items),
        Err(value) => value
            .downcast::<VecDeque<T>>()
            .ok()
            .map(|items| Vec::from(*items)),
    }
}

pub(crate) fn as_flag(value: &dyn Any) -> Option<bool> {
    value.downcast_ref::<bool>().copied()
}

/// Accepts a [`FrozenCallback<T>`], a `fn(&BasicQueue<T>)` pointer or a
/// `Box<dyn Fn(&BasicQueue<T>) + Send + Sync>`.
///
/// A bare closure has an anonymous type that `Any` cannot name, so it only
/// gets through once wrapped with [`frozen_callback`](super::frozen_callback).
pub(crate) fn as_callback<T: 'static>(value: Box<dyn Any>) -> Option<FrozenCallback<T>> {
    let value = match value.downcast::<FrozenCallback<T>>() {
        Ok(callback) => return Some(*callback),
        Err(value) => value,
    };

    let value = match value.downcast::<fn(&BasicQueue<T>)>() {
        Ok(callback) => {
            let callback: FrozenCallback<T> = Arc::new(*callback);
            return Some(callback);
        }
        Err(value) => value,
    };

    value
        .downcast::<Box<dyn Fn(&BasicQueue<T>) + Send + Sync>>()
        .ok()
        .map(|callback| FrozenCallback::<T>::from(*callback))
}
