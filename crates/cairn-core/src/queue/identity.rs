use std::{rc::Rc, sync::Arc};

/// Strict-equality test used by [`BasicQueue::remove_by_value`].
///
/// Shared handles match only when they point at the same allocation, so two
/// structurally equal values behind different `Arc`s are different items.
/// Plain scalars and strings match by value.
///
/// [`BasicQueue::remove_by_value`]: crate::BasicQueue::remove_by_value
pub trait Identity {
    /// `true` when `self` and `other` are the same item.
    fn is_same(&self, other: &Self) -> bool;
}

impl<U: ?Sized> Identity for Arc<U> {
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<U: ?Sized> Identity for Rc<U> {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

macro_rules! identity_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                fn is_same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identity_by_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    String, &str,
);
