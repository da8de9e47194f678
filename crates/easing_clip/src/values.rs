// SPDX-License-Identifier: MIT OR Apache-2.0
//! Conversion between a chain's stored left/right pairs and a flat value sequence.
//!
//! Adjacent objects of a midpoint chain share their boundary value, so a
//! chain of `n` objects is edited as `n + 1` values. Static easings use a
//! single value and two-point easings use exactly two.

use crate::chain::Chain;
use crate::error::EasingError;
use crate::host::{ObjectIndex, ObjectStore, TrackIndex, TrackScale, TrackState};
use crate::spec::{EasingSpec, TrackMode};
use crate::Result;

/// How a chain's values are laid out as a flat sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// One value
    Static,
    /// The leader's left and right values
    TwoPoint,
    /// One value per chain boundary, `chain.len() + 1` in total
    Chain,
}

impl ValueShape {
    /// Layout for an easing applied to a chain of `chain_len` objects
    pub fn classify(mode: TrackMode, spec: &EasingSpec, chain_len: usize) -> Self {
        if mode.is_static() {
            Self::Static
        } else if spec.is_two_point || chain_len <= 1 {
            Self::TwoPoint
        } else {
            Self::Chain
        }
    }

    /// Number of flat values for a chain of `chain_len` objects
    pub fn value_count(self, chain_len: usize) -> usize {
        match self {
            Self::Static => 1,
            Self::TwoPoint => 2,
            Self::Chain => chain_len + 1,
        }
    }
}

fn read(
    store: &(impl ObjectStore + ?Sized),
    object: ObjectIndex,
    track: TrackIndex,
) -> Result<TrackState> {
    store
        .read_track(object, track)
        .ok_or(EasingError::TrackNotFound { object, track })
}

/// Read a chain's values as a flat sequence
pub fn collect_values(
    store: &(impl ObjectStore + ?Sized),
    chain: &Chain,
    track: TrackIndex,
    shape: ValueShape,
) -> Result<Vec<i32>> {
    let leader = read(store, chain.leader(), track)?;
    match shape {
        ValueShape::Static => Ok(vec![leader.left]),
        ValueShape::TwoPoint => Ok(vec![leader.left, leader.right]),
        ValueShape::Chain => {
            let mut values = Vec::with_capacity(chain.len() + 1);
            values.push(leader.left);
            for &object in chain.objects() {
                values.push(read(store, object, track)?.right);
            }
            Ok(values)
        }
    }
}

/// Write a flat sequence back onto a chain.
///
/// The caller records an undo entry first; this only writes track values.
pub fn apply_values(
    store: &mut (impl ObjectStore + ?Sized),
    chain: &Chain,
    track: TrackIndex,
    shape: ValueShape,
    values: &[i32],
) -> Result<()> {
    let expected = shape.value_count(chain.len());
    if values.len() != expected {
        return Err(EasingError::ValueCountMismatch {
            expected,
            actual: values.len(),
        });
    }

    let leader = chain.leader();
    match shape {
        ValueShape::Static => {
            let right = read(store, leader, track)?.right;
            store.write_track(leader, track, values[0], right);
        }
        ValueShape::TwoPoint => {
            store.write_track(leader, track, values[0], values[1]);
        }
        ValueShape::Chain => {
            let mut carry = values[0];
            for (&object, &right) in chain.objects().iter().zip(&values[1..]) {
                store.write_track(object, track, carry, right);
                carry = right;
            }
        }
    }
    Ok(())
}

/// Displayed number for a host-internal value
pub fn internal_to_display(value: i32, denominator: i32) -> f64 {
    if denominator == 0 {
        return f64::from(value);
    }
    f64::from(value) / f64::from(denominator)
}

/// Convert a displayed number to a host-internal value.
///
/// The number is scaled by `denominator` and rounded half away from zero.
/// When `precision < denominator` the result is snapped to a multiple of
/// `denominator / precision`; an exact half step snaps downward, so `1.25`
/// at denominator 100 and precision 10 becomes `120`. The result is clamped
/// to `[min, max]`.
pub fn convert_display_to_internal(
    display: f64,
    denominator: i32,
    precision: i32,
    min: i32,
    max: i32,
) -> i32 {
    let mut value = (display * f64::from(denominator)).round() as i64;

    if precision > 0 && precision < denominator {
        let step = i64::from(denominator / precision);
        if step > 1 {
            let mut rem = value % step;
            if rem < 0 {
                rem += step;
            }
            if rem * 2 > step {
                rem -= step;
            }
            value -= rem;
        }
    }

    value.clamp(i64::from(min), i64::from(max)) as i32
}

impl TrackScale {
    /// Convert a displayed number to an internal value on this scale
    pub fn to_internal(&self, display: f64) -> i32 {
        convert_display_to_internal(display, self.denominator, self.precision, self.min, self.max)
    }

    /// Convert an internal value to its displayed number
    pub fn to_display(&self, value: i32) -> f64 {
        internal_to_display(value, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeStore;

    const TRACK: TrackIndex = TrackIndex(0);

    fn linked_store(pairs: &[(i32, i32)], mode: TrackMode) -> (FakeStore, Chain) {
        let mut store = FakeStore::with_objects(pairs.len());
        let order: Vec<usize> = (0..pairs.len()).collect();
        if pairs.len() > 1 {
            store.link(&order);
        }
        for (i, &(left, right)) in pairs.iter().enumerate() {
            store.set_track(i, mode, left, right);
        }
        let chain = Chain::collect(&store, ObjectIndex(0)).unwrap();
        (store, chain)
    }

    #[test]
    fn test_classify() {
        let spec = EasingSpec::default();
        assert_eq!(ValueShape::classify(TrackMode::builtin(0), &spec, 4), ValueShape::Static);
        assert_eq!(ValueShape::classify(TrackMode::builtin(1), &spec, 1), ValueShape::TwoPoint);
        assert_eq!(ValueShape::classify(TrackMode::builtin(1), &spec, 3), ValueShape::Chain);
        let two_point = EasingSpec { is_two_point: true, ..spec };
        assert_eq!(
            ValueShape::classify(TrackMode::builtin(4), &two_point, 3),
            ValueShape::TwoPoint
        );
    }

    #[test]
    fn test_collect_general_chain() {
        let (store, chain) = linked_store(&[(10, 20), (20, 30), (30, 40)], TrackMode::builtin(1));
        let values = collect_values(&store, &chain, TRACK, ValueShape::Chain).unwrap();
        assert_eq!(values, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_collect_static_and_two_point() {
        let (store, chain) = linked_store(&[(5, 7), (7, 9)], TrackMode::builtin(0));
        assert_eq!(collect_values(&store, &chain, TRACK, ValueShape::Static).unwrap(), vec![5]);
        assert_eq!(
            collect_values(&store, &chain, TRACK, ValueShape::TwoPoint).unwrap(),
            vec![5, 7]
        );
    }

    #[test]
    fn test_round_trip_leaves_chain_unchanged() {
        for len in 2..6 {
            let pairs: Vec<(i32, i32)> = (0..len).map(|i| (i * 10, (i + 1) * 10)).collect();
            let (mut store, chain) = linked_store(&pairs, TrackMode::builtin(2));
            let before = store.pairs(TRACK);
            let values = collect_values(&store, &chain, TRACK, ValueShape::Chain).unwrap();
            apply_values(&mut store, &chain, TRACK, ValueShape::Chain, &values).unwrap();
            assert_eq!(store.pairs(TRACK), before);
        }
    }

    #[test]
    fn test_apply_carries_shared_boundaries() {
        let (mut store, chain) = linked_store(&[(0, 0), (0, 0), (0, 0)], TrackMode::builtin(1));
        apply_values(&mut store, &chain, TRACK, ValueShape::Chain, &[1, 2, 3, 4]).unwrap();
        assert_eq!(store.pairs(TRACK), vec![(1, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_apply_static_keeps_right() {
        let (mut store, chain) = linked_store(&[(3, 8)], TrackMode::builtin(0));
        apply_values(&mut store, &chain, TRACK, ValueShape::Static, &[42]).unwrap();
        assert_eq!(store.pairs(TRACK), vec![(42, 8)]);
    }

    #[test]
    fn test_apply_two_point_writes_leader_only() {
        let (mut store, chain) = linked_store(&[(1, 2), (2, 3), (3, 4)], TrackMode::builtin(4));
        assert_eq!(chain.len(), 3);
        apply_values(&mut store, &chain, TRACK, ValueShape::TwoPoint, &[70, 80]).unwrap();
        assert_eq!(store.pairs(TRACK), vec![(70, 80), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_apply_rejects_wrong_length() {
        let (mut store, chain) = linked_store(&[(0, 0), (0, 0)], TrackMode::builtin(1));
        let result = apply_values(&mut store, &chain, TRACK, ValueShape::Chain, &[1, 2]);
        assert!(matches!(
            result,
            Err(EasingError::ValueCountMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_convert_display_to_internal() {
        assert_eq!(convert_display_to_internal(1.25, 100, 10, -10000, 10000), 120);
        assert_eq!(convert_display_to_internal(1.26, 100, 10, -10000, 10000), 130);
        assert_eq!(convert_display_to_internal(1.24, 100, 10, -10000, 10000), 120);
        assert_eq!(convert_display_to_internal(-1.24, 100, 10, -10000, 10000), -120);
        assert_eq!(convert_display_to_internal(1.005, 1000, 1000, -10000, 10000), 1005);
        assert_eq!(convert_display_to_internal(500.0, 100, 100, -10000, 10000), 10000);
        assert_eq!(convert_display_to_internal(-500.0, 100, 100, -10000, 10000), -10000);
        assert_eq!(convert_display_to_internal(2.5, 1, 1, -10, 10), 3);
    }

    #[test]
    fn test_scale_round_trip() {
        let scale = TrackScale {
            denominator: 100,
            precision: 100,
            min: -100_000,
            max: 100_000,
        };
        assert_eq!(scale.to_display(1234), 12.34);
        assert_eq!(scale.to_internal(12.34), 1234);
    }
}
