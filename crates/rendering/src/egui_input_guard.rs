//! Keeps taps on egui panels from reaching the floor.
//!
//! While egui is handling the pointer (catalog, selection buttons, room-size
//! panel), the pointer tracker reports no pointers, so the floor neither
//! selects nor drags and the camera does not pan underneath the UI.

use bevy_egui::EguiContexts;

/// Returns `true` when the pointer is over an egui area or egui is in the
/// middle of a click or drag.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}
