use glam::Vec2;

/// In-progress press-drag. Only the pointer that started it may extend it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    pub pointer_id: i32,
    pub last: Vec2,
}

#[derive(Clone, Debug, Default)]
pub struct InputRouter {
    gesture: Option<Gesture>,
}

/// Client (viewport) coordinates to surface-local logical coordinates.
#[inline]
pub fn local_point(client: Vec2, surface_origin: Vec2) -> Vec2 {
    client - surface_origin
}

impl InputRouter {
    #[inline]
    pub fn gesture(&self) -> Option<Gesture> {
        self.gesture
    }

    #[inline]
    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Begin a gesture. Refused while clearing or while another pointer
    /// already owns the stroke. A repeated press from the owner (its release
    /// was never delivered) re-anchors the stroke at `point`.
    pub fn press(&mut self, pointer_id: i32, point: Vec2, clearing: bool) -> bool {
        if clearing {
            return false;
        }
        match self.gesture.as_mut() {
            Some(g) if g.pointer_id != pointer_id => return false,
            Some(g) => g.last = point,
            None => {
                self.gesture = Some(Gesture {
                    pointer_id,
                    last: point,
                })
            }
        }
        true
    }

    /// Advance the gesture to `point`, yielding the segment to draw.
    ///
    /// While clearing the move is not simply dropped: nothing is drawn, but
    /// the last point keeps following the pointer so that drawing resumes
    /// from where the finger is once the dissolve ends, instead of jumping
    /// back to where it was when the dissolve started.
    pub fn drag(&mut self, pointer_id: i32, point: Vec2, clearing: bool) -> Option<(Vec2, Vec2)> {
        let g = self.gesture.as_mut().filter(|g| g.pointer_id == pointer_id)?;
        let from = std::mem::replace(&mut g.last, point);
        (!clearing).then_some((from, point))
    }

    /// End (or cancel) the gesture owned by `pointer_id`.
    pub fn release(&mut self, pointer_id: i32) -> bool {
        match self.gesture {
            Some(g) if g.pointer_id == pointer_id => {
                self.gesture = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any gesture regardless of owner.
    pub fn reset(&mut self) -> bool {
        self.gesture.take().is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    BlowWind,
    Clear,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "w" | "W" => Some(KeyAction::BlowWind),
        "c" | "C" => Some(KeyAction::Clear),
        _ => None,
    }
}
