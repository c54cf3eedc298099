use bevy::prelude::*;

/// Screen-space movement (pixels per frame) below which a pointer counts as
/// stationary.
pub const MOVE_THRESHOLD_PX: f32 = 2.0;

/// Pointer id used for the left mouse button when it stands in for a touch.
pub const MOUSE_POINTER_ID: u64 = u64::MAX;

/// Seconds a status line stays on screen.
pub const STATUS_DURATION: f32 = 3.0;

#[derive(Resource, Default)]
pub struct StatusMessage {
    pub text: String,
    pub timer: f32,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) {
        self.text = text.into();
        self.timer = STATUS_DURATION;
        self.is_error = is_error;
    }

    pub fn active(&self) -> bool {
        self.timer > 0.0
    }
}

/// One active pointer this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub id: u64,
    pub position: Vec2,
    /// Position at the end of the previous frame; equal to `position` on the
    /// frame the pointer went down.
    pub previous: Vec2,
    pub began: bool,
}

impl PointerSample {
    pub fn delta(&self) -> Vec2 {
        self.position - self.previous
    }
}

/// Frame-to-frame pointer tracking shared by the floor adapter and the camera.
///
/// `Touches` only refreshes a touch's previous position when new touch
/// events arrive, so a finger that stops moving keeps reporting its last
/// delta. This tracker compares against the previous frame instead.
#[derive(Resource, Debug, Default)]
pub struct PointerTracker {
    samples: Vec<PointerSample>,
    primary: Option<u64>,
    released: bool,
}

impl PointerTracker {
    /// Record this frame's active pointers as `(id, screen position)`.
    pub fn update(&mut self, mut points: Vec<(u64, Vec2)>) {
        points.sort_by_key(|(id, _)| *id);
        let samples: Vec<PointerSample> = points
            .into_iter()
            .map(|(id, position)| match self.samples.iter().find(|s| s.id == id) {
                Some(last) => PointerSample {
                    id,
                    position,
                    previous: last.position,
                    began: false,
                },
                None => PointerSample {
                    id,
                    position,
                    previous: position,
                    began: true,
                },
            })
            .collect();

        self.released = !self.samples.is_empty() && samples.is_empty();
        let primary_alive = self
            .primary
            .is_some_and(|primary| samples.iter().any(|s| s.id == primary));
        if !primary_alive {
            self.primary = samples.first().map(|s| s.id);
        }
        self.samples = samples;
    }

    /// Active pointers, ordered by id.
    pub fn samples(&self) -> &[PointerSample] {
        &self.samples
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    /// The pointer that went down first and is still down.
    pub fn primary(&self) -> Option<&PointerSample> {
        let primary = self.primary?;
        self.samples.iter().find(|s| s.id == primary)
    }

    /// Whether the last pointer lifted this frame.
    pub fn just_released(&self) -> bool {
        self.released
    }
}
