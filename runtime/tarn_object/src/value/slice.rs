//! Slice subscripts and integer index normalisation.
//!
//! Forward slices clamp their bounds the way a host `Array.slice` does:
//! negative bounds count from the end, out-of-range bounds clamp to the
//! sequence. Negative steps swap the inclusive/exclusive ends before
//! slicing, then reverse, then stride.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::errors::{index_out_of_range, index_too_large, zero_slice_step, RtResult};

/// `start:stop:step` with unbounded parts left as `None`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SliceValue {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl SliceValue {
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        SliceValue { start, stop, step }
    }

    /// Select from `items`.
    ///
    /// Fails with `ValueError` on a zero step.
    pub fn apply<T: Clone>(&self, items: &[T]) -> RtResult<Vec<T>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(zero_slice_step());
        }
        if step == 1 {
            return Ok(clamped(items, self.start, self.stop).to_vec());
        }

        let selected: Vec<T> = if step > 0 {
            clamped(items, self.start, self.stop).to_vec()
        } else {
            let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
            let swap = |bound: Option<i64>| match bound {
                Some(-1) => Some(len),
                Some(b) => Some(b.saturating_add(1)),
                None => None,
            };
            let mut reversed = clamped(items, swap(self.stop), swap(self.start)).to_vec();
            reversed.reverse();
            reversed
        };

        let stride = usize::try_from(step.unsigned_abs()).unwrap_or(usize::MAX);
        Ok(selected.into_iter().step_by(stride).collect())
    }

    pub(super) fn repr(&self) -> String {
        let part = |bound: Option<i64>| bound.map_or_else(|| "None".to_string(), |b| b.to_string());
        format!(
            "slice({}, {}, {})",
            part(self.start),
            part(self.stop),
            part(self.step)
        )
    }
}

/// `items[start..stop]` with host clamping rules.
fn clamped<T>(items: &[T], start: Option<i64>, stop: Option<i64>) -> &[T] {
    let len = items.len();
    let from = start.map_or(0, |b| resolve_bound(b, len));
    let to = stop.map_or(len, |b| resolve_bound(b, len));
    if from >= to {
        &[]
    } else {
        &items[from..to]
    }
}

fn resolve_bound(bound: i64, len: usize) -> usize {
    if bound < 0 {
        let back = usize::try_from(bound.unsigned_abs()).unwrap_or(usize::MAX);
        len.saturating_sub(back)
    } else {
        usize::try_from(bound).unwrap_or(usize::MAX).min(len)
    }
}

/// Resolve an integer subscript against a sequence of `len` items.
///
/// Negative indices count from the end. Integers that do not fit an `i64`
/// fail with the index-size `IndexError`; others outside the sequence fail
/// with `"<what> index out of range"`.
pub(super) fn normalize_index(index: &BigInt, len: usize, what: &str) -> RtResult<usize> {
    let index = index.to_i64().ok_or_else(index_too_large)?;
    let resolved = if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).unwrap_or(usize::MAX);
        len.checked_sub(back)
    } else {
        usize::try_from(index).ok()
    };
    match resolved {
        Some(i) if i < len => Ok(i),
        _ => Err(index_out_of_range(what)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ITEMS: [i32; 5] = [0, 1, 2, 3, 4];

    fn slice(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Vec<i32> {
        SliceValue::new(start, stop, step)
            .apply(&ITEMS)
            .unwrap_or_else(|e| panic!("slice failed: {e}"))
    }

    #[test]
    fn forward_slices_clamp_like_host_arrays() {
        assert_eq!(slice(Some(1), Some(3), None), vec![1, 2]);
        assert_eq!(slice(Some(-2), None, None), vec![3, 4]);
        assert_eq!(slice(Some(3), Some(100), None), vec![3, 4]);
        assert_eq!(slice(Some(4), Some(1), None), Vec::<i32>::new());
        assert_eq!(slice(None, None, Some(2)), vec![0, 2, 4]);
    }

    #[test]
    fn negative_steps_reverse_between_swapped_bounds() {
        assert_eq!(slice(Some(3), Some(0), Some(-1)), vec![3, 2, 1]);
        assert_eq!(slice(None, None, Some(-1)), vec![4, 3, 2, 1, 0]);
        assert_eq!(slice(None, None, Some(-2)), vec![4, 2, 0]);
        assert_eq!(slice(Some(1), None, Some(-1)), vec![1, 0]);
        assert_eq!(slice(Some(-2), None, Some(-1)), vec![3, 2, 1, 0]);
        assert_eq!(slice(Some(-1), None, Some(-1)), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn zero_step_is_a_value_error() {
        let err = SliceValue::new(None, None, Some(0)).apply(&ITEMS).err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("ValueError: slice step cannot be zero".to_string())
        );
    }

    #[test]
    fn index_normalisation() {
        assert_eq!(normalize_index(&BigInt::from(-1), 5, "list").ok(), Some(4));
        assert_eq!(normalize_index(&BigInt::from(0), 5, "list").ok(), Some(0));
        let past_end = normalize_index(&BigInt::from(5), 5, "list").err();
        assert_eq!(
            past_end.map(|e| e.message),
            Some("list index out of range".to_string())
        );
        let before_start = normalize_index(&BigInt::from(-6), 5, "list").err();
        assert!(before_start.is_some());
        let huge = BigInt::from(i64::MAX) * 4;
        let err = normalize_index(&huge, 5, "list").err();
        assert_eq!(
            err.map(|e| e.message),
            Some("cannot fit 'int' into an index-sized integer".to_string())
        );
    }
}
