use crate::geom::{FULL_TURN, is_angle_between};
use crate::layout::{Layout, Segment};

/// Finds the item under the pointer, given the wheel's current rotation.
///
/// Returns `None` only for a degenerate layout (no items, or weights summing to zero).
pub fn resolve(layout: &Layout, rotation: f64, pointer_angle: f64) -> Option<usize> {
    if layout.is_degenerate() {
        return None;
    }

    let mut usable = layout.segments().iter().filter(|s| s.width() > 0.0);

    usable
        .clone()
        .find(|s| covers(s, rotation, pointer_angle))
        // float drift can leave a hair-thin gap where the last segment meets the first
        .or_else(|| usable.next_back())
        .map(|s| s.index)
}

fn covers(segment: &Segment, rotation: f64, angle: f64) -> bool {
    segment.width() >= FULL_TURN
        || is_angle_between(
            angle,
            segment.start_angle + rotation,
            segment.end_angle + rotation,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemConfig, Palette, resolve_items};

    fn layout(weights: &[f64]) -> Layout {
        let configs: Vec<_> = weights.iter().map(|&w| ItemConfig::weighted(w)).collect();
        Layout::compute(&resolve_items(&configs, &Palette::default()))
    }

    #[test]
    fn test_pointer_north_unrotated() {
        let l = layout(&[1.0, 1.0, 2.0]);
        assert_eq!(resolve(&l, 0.0, 0.0), Some(0));
        assert_eq!(resolve(&l, 0.0, 90.0), Some(1));
        assert_eq!(resolve(&l, 0.0, 200.0), Some(2));
        assert_eq!(resolve(&l, 0.0, 359.9), Some(2));
    }

    #[test]
    fn test_rotation_moves_segments_under_pointer() {
        let l = layout(&[1.0, 1.0, 2.0]);
        // segment 0 now spans [100, 190)
        assert_eq!(resolve(&l, 100.0, 0.0), Some(2));
        assert_eq!(resolve(&l, 100.0, 100.0), Some(0));
        assert_eq!(resolve(&l, 100.0, 190.0), Some(1));
    }

    #[test]
    fn test_wraparound_segment_at_north() {
        // twenty-degree segments; rotating by 350 puts segment 0 on [350, 10)
        let l = layout(&[1.0; 18]);
        assert_eq!(resolve(&l, 350.0, 0.0), Some(0));
        assert_eq!(resolve(&l, 350.0, 350.0), Some(0));
        assert_eq!(resolve(&l, 350.0, 10.0), Some(1));
        assert_eq!(resolve(&l, -10.0, 0.0), Some(0));
    }

    #[test]
    fn test_single_item_always_wins() {
        let l = layout(&[3.0]);
        for rotation in [0.0, 45.0, 359.99, 720.5] {
            assert_eq!(resolve(&l, rotation, 0.0), Some(0));
        }
    }

    #[test]
    fn test_total_over_many_rotations() {
        let l = layout(&[0.7, 1.3, 2.9, 0.01, 5.0]);
        for step in 0..3600 {
            let rotation = step as f64 * 0.1 + 0.037;
            assert!(resolve(&l, rotation, 0.0).is_some(), "rotation {rotation}");
            assert!(resolve(&l, rotation, 123.4).is_some(), "rotation {rotation}");
        }
    }

    #[test]
    fn test_zero_width_segment_never_wins() {
        let l = layout(&[1.0, 0.0, 1.0]);
        assert_eq!(resolve(&l, 0.0, 180.0), Some(2));
        assert_eq!(resolve(&l, 0.0, 179.9), Some(0));
    }

    #[test]
    fn test_degenerate_layouts_have_no_winner() {
        assert_eq!(resolve(&layout(&[]), 0.0, 0.0), None);
        assert_eq!(resolve(&layout(&[0.0, 0.0]), 0.0, 0.0), None);
    }
}
