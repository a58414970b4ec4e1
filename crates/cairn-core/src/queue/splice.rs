/// Resolves a start index with `Array.prototype.splice` rules: negative values
/// count back from the tail and bottom out at 0, anything past the end lands
/// on `len`.
pub(crate) fn resolve_start(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        index.unsigned_abs().min(len)
    }
}

/// Removes up to `qty` elements starting at `index` and returns them in
/// queue order.
pub(crate) fn splice<T>(items: &mut Vec<T>, index: isize, qty: usize) -> Vec<T> {
    let start = resolve_start(index, items.len());
    let end = start + qty.min(items.len() - start);
    items.drain(start..end).collect()
}

/// Holds the frozen flag at `true` until dropped, then puts back whatever
/// value it had before.
pub(crate) struct FrozenHold<'a> {
    flag: &'a mut bool,
    previous: bool,
}

impl<'a> FrozenHold<'a> {
    pub(crate) fn new(flag: &'a mut bool) -> Self {
        let previous = *flag;
        *flag = true;
        Self { flag, previous }
    }
}

impl Drop for FrozenHold<'_> {
    fn drop(&mut self) {
        *self.flag = self.previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_start_counts_from_tail() {
        assert_eq!(resolve_start(-1, 5), 4);
        assert_eq!(resolve_start(-5, 5), 0);
        assert_eq!(resolve_start(-9, 5), 0);
        assert_eq!(resolve_start(isize::MIN, 5), 0);
    }

    #[test]
    fn start_past_end_is_clamped() {
        assert_eq!(resolve_start(2, 5), 2);
        assert_eq!(resolve_start(5, 5), 5);
        assert_eq!(resolve_start(40, 5), 5);
        assert_eq!(resolve_start(0, 0), 0);
    }

    #[test]
    fn splice_clamps_quantity() {
        let mut items = vec![1, 2, 3, 4, 5];
        assert_eq!(splice(&mut items, 3, 10), vec![4, 5]);
        assert_eq!(items, vec![1, 2, 3]);

        assert!(splice(&mut items, 3, 1).is_empty());
        assert!(splice(&mut items, 0, 0).is_empty());
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn splice_from_tail() {
        let mut items = vec![1, 2, 3, 4, 5, 6];
        assert_eq!(splice(&mut items, -2, 2), vec![5, 6]);
        assert_eq!(items, vec![1, 2, 3, 4]);
    }

    #[test]
    fn frozen_hold_restores_previous_value() {
        let mut flag = false;
        {
            let hold = FrozenHold::new(&mut flag);
            assert!(*hold.flag);
        }
        assert!(!flag);

        let mut flag = true;
        drop(FrozenHold::new(&mut flag));
        assert!(flag);
    }
}
