use std::collections::BTreeMap;

use super::types::{PointerAction, PointerEvent, PointerState};

/// Resolves mouse and multi-touch streams into one pointer.
///
/// Rules:
/// - mouse moves update the position 1:1, mouse presses/releases map directly
///   to down/up;
/// - a touch start that makes exactly one touch active is a down at that
///   touch's own coordinates (not routed through the shared position);
/// - with two or more touches active, touch starts and moves reposition the
///   pointer to the arithmetic mean of all active touches — multi-touch means
///   repositioning, never activation;
/// - a touch end that leaves no touch active is an up; otherwise the position
///   becomes the mean of the remaining touches.
///
/// Touch is inherently multi-point while the contract is single-pointer;
/// averaging gives a stable single point, and single-touch keeps precise
/// down/up semantics.
#[derive(Debug, Default)]
pub struct PointerUnifier {
    position: PointerState,
    touches: BTreeMap<u64, (f64, f64)>,
}

impl PointerUnifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current resolved pointer position.
    #[inline]
    pub fn position(&self) -> PointerState {
        self.position
    }

    /// Applies one input event, returning the activation edge it produced,
    /// if any.
    pub fn apply(&mut self, event: PointerEvent) -> Option<PointerAction> {
        match event {
            PointerEvent::MouseMoved { x, y } => {
                self.position.set(x, y);
                None
            }

            PointerEvent::MousePressed { x, y } => Some(PointerAction::Down { x, y }),

            PointerEvent::MouseReleased => Some(PointerAction::Up),

            PointerEvent::TouchStarted { id, x, y } => {
                self.touches.insert(id, (x, y));
                if self.touches.len() == 1 {
                    Some(PointerAction::Down { x, y })
                } else {
                    self.reposition_to_mean();
                    None
                }
            }

            PointerEvent::TouchMoved { id, x, y } => {
                self.touches.insert(id, (x, y));
                self.reposition_to_mean();
                None
            }

            PointerEvent::TouchEnded { id } => {
                self.touches.remove(&id);
                if self.touches.is_empty() {
                    Some(PointerAction::Up)
                } else {
                    self.reposition_to_mean();
                    None
                }
            }
        }
    }

    fn reposition_to_mean(&mut self) {
        let count = self.touches.len();
        if count == 0 {
            return;
        }

        let (mut sx, mut sy) = (0.0, 0.0);
        for &(x, y) in self.touches.values() {
            sx += x;
            sy += y;
        }
        self.position.set(sx / count as f64, sy / count as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(u: &PointerUnifier) -> (f64, f64) {
        let p = u.position();
        (p.x, p.y)
    }

    // ── mouse ─────────────────────────────────────────────────────────────

    #[test]
    fn mouse_move_updates_position_one_to_one() {
        let mut u = PointerUnifier::new();
        assert_eq!(u.apply(PointerEvent::MouseMoved { x: 120.0, y: 60.0 }), None);
        assert_eq!(pos(&u), (120.0, 60.0));
    }

    #[test]
    fn mouse_press_and_release_are_edge_triggered() {
        let mut u = PointerUnifier::new();
        assert_eq!(
            u.apply(PointerEvent::MousePressed { x: 100.0, y: 50.0 }),
            Some(PointerAction::Down { x: 100.0, y: 50.0 })
        );
        assert_eq!(u.apply(PointerEvent::MouseReleased), Some(PointerAction::Up));
    }

    #[test]
    fn mouse_press_does_not_move_the_shared_position() {
        let mut u = PointerUnifier::new();
        u.apply(PointerEvent::MouseMoved { x: 5.0, y: 6.0 });
        u.apply(PointerEvent::MousePressed { x: 100.0, y: 50.0 });
        assert_eq!(pos(&u), (5.0, 6.0));
    }

    // ── touch start ───────────────────────────────────────────────────────

    #[test]
    fn single_touch_start_is_a_down_at_its_own_coordinates() {
        let mut u = PointerUnifier::new();
        assert_eq!(
            u.apply(PointerEvent::TouchStarted { id: 7, x: 30.0, y: 40.0 }),
            Some(PointerAction::Down { x: 30.0, y: 40.0 })
        );
        // Direct call, not routed through the shared position.
        assert_eq!(pos(&u), (0.0, 0.0));
    }

    #[test]
    fn second_touch_start_repositions_to_the_mean_without_a_down() {
        let mut u = PointerUnifier::new();
        u.apply(PointerEvent::TouchStarted { id: 1, x: 10.0, y: 20.0 });
        assert_eq!(
            u.apply(PointerEvent::TouchStarted { id: 2, x: 30.0, y: 60.0 }),
            None
        );
        assert_eq!(pos(&u), (20.0, 40.0));
    }

    // ── touch move ────────────────────────────────────────────────────────

    #[test]
    fn touch_move_tracks_the_mean_of_all_active_touches() {
        let mut u = PointerUnifier::new();
        u.apply(PointerEvent::TouchStarted { id: 1, x: 0.0, y: 0.0 });
        u.apply(PointerEvent::TouchStarted { id: 2, x: 100.0, y: 100.0 });
        u.apply(PointerEvent::TouchMoved { id: 1, x: 50.0, y: 10.0 });
        assert_eq!(pos(&u), (75.0, 55.0));
    }

    #[test]
    fn single_touch_move_follows_that_touch() {
        let mut u = PointerUnifier::new();
        u.apply(PointerEvent::TouchStarted { id: 1, x: 10.0, y: 10.0 });
        u.apply(PointerEvent::TouchMoved { id: 1, x: 42.0, y: 43.0 });
        assert_eq!(pos(&u), (42.0, 43.0));
    }

    // ── touch end ─────────────────────────────────────────────────────────

    #[test]
    fn last_touch_ending_is_exactly_one_up() {
        let mut u = PointerUnifier::new();
        u.apply(PointerEvent::TouchStarted { id: 1, x: 10.0, y: 10.0 });
        assert_eq!(u.apply(PointerEvent::TouchEnded { id: 1 }), Some(PointerAction::Up));
        // A stray end with nothing active still resolves by the
        // zero-remaining rule.
        assert_eq!(u.apply(PointerEvent::TouchEnded { id: 1 }), Some(PointerAction::Up));
    }

    #[test]
    fn touch_end_with_remaining_touches_repositions_without_an_up() {
        let mut u = PointerUnifier::new();
        u.apply(PointerEvent::TouchStarted { id: 1, x: 10.0, y: 20.0 });
        u.apply(PointerEvent::TouchStarted { id: 2, x: 30.0, y: 60.0 });
        u.apply(PointerEvent::TouchStarted { id: 3, x: 50.0, y: 10.0 });

        assert_eq!(u.apply(PointerEvent::TouchEnded { id: 3 }), None);
        assert_eq!(pos(&u), (20.0, 40.0));
    }
}
