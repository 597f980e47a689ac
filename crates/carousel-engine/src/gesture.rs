//! Snap resolution for released drags.
//!
//! A release is resolved against where momentum would carry the row, not
//! where the pointer let go, so a fast flick can skip past the immediate
//! neighbor. The result is always one whole item position inside the row.

/// Resolved outcome of a released drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureResolution {
    /// Offset the row would reach if momentum were allowed to play out.
    pub predicted_offset: f32,
    pub target_index: usize,
    pub committed_offset: f32,
}

/// Nearest item index for a predicted row offset, clamped into the row.
///
/// Rounds half away from zero. Returns `None` when there is nothing to page:
/// an empty row, a degenerate stride, or a NaN prediction.
pub fn resolve_target_index(predicted_offset: f32, stride: f32, item_count: usize) -> Option<usize> {
    if item_count == 0 || !(stride > 0.0) || !stride.is_finite() {
        return None;
    }
    let raw = (-predicted_offset / stride).round();
    if raw.is_nan() {
        return None;
    }
    let last = (item_count - 1) as f32;
    Some(raw.clamp(0.0, last) as usize)
}

/// Resolve a release that started from `committed_before` and whose
/// momentum would carry it `predicted_translation` further.
pub fn resolve_release(
    committed_before: f32,
    predicted_translation: f32,
    stride: f32,
    item_count: usize,
) -> Option<GestureResolution> {
    let predicted_offset = committed_before + predicted_translation;
    let target_index = resolve_target_index(predicted_offset, stride, item_count)?;
    Some(GestureResolution {
        predicted_offset,
        target_index,
        committed_offset: -(target_index as f32) * stride,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftward_drag_past_half_stride_advances_one_item() {
        let resolution = resolve_release(0.0, -160.0, 150.0, 3).expect("resolvable");
        assert_eq!(resolution.predicted_offset, -160.0);
        assert_eq!(resolution.target_index, 1);
        assert_eq!(resolution.committed_offset, -150.0);
    }

    #[test]
    fn flick_past_the_start_clamps_to_first_item() {
        let resolution = resolve_release(-150.0, 500.0, 150.0, 3).expect("resolvable");
        assert_eq!(resolution.predicted_offset, 350.0);
        assert_eq!(resolution.target_index, 0);
        assert_eq!(resolution.committed_offset, 0.0);
    }

    #[test]
    fn momentum_can_skip_several_items() {
        let resolution = resolve_release(0.0, -620.0, 150.0, 10).expect("resolvable");
        assert_eq!(resolution.target_index, 4);
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(resolve_target_index(-75.0, 150.0, 5), Some(1));
        assert_eq!(resolve_target_index(-225.0, 150.0, 5), Some(2));
        assert_eq!(resolve_target_index(-74.9, 150.0, 5), Some(0));
    }

    #[test]
    fn infinite_predictions_stay_in_bounds() {
        assert_eq!(resolve_target_index(f32::NEG_INFINITY, 150.0, 4), Some(3));
        assert_eq!(resolve_target_index(f32::INFINITY, 150.0, 4), Some(0));
        assert_eq!(resolve_target_index(-f32::MAX, 150.0, 4), Some(3));
        assert_eq!(resolve_target_index(f32::MAX, 1.0e-30, 4), Some(0));
    }

    #[test]
    fn every_prediction_lands_inside_the_row() {
        for count in 1..6 {
            let mut predicted = -5000.0f32;
            while predicted <= 5000.0 {
                let index = resolve_target_index(predicted, 150.0, count).expect("resolvable");
                assert!(index < count);
                predicted += 37.3;
            }
        }
    }

    #[test]
    fn single_item_always_resolves_to_zero() {
        for predicted in [-1000.0, -150.0, 0.0, 150.0, 1000.0] {
            assert_eq!(resolve_target_index(predicted, 150.0, 1), Some(0));
        }
    }

    #[test]
    fn unresolvable_inputs() {
        assert_eq!(resolve_target_index(-150.0, 150.0, 0), None);
        assert_eq!(resolve_target_index(-150.0, 0.0, 3), None);
        assert_eq!(resolve_target_index(-150.0, f32::NAN, 3), None);
        assert_eq!(resolve_target_index(f32::NAN, 150.0, 3), None);
    }
}
