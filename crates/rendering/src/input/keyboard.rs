use bevy::prelude::*;
use bevy_egui::EguiContexts;

use floor::FloorCommand;

// ---------------------------------------------------------------------------
// Keyboard shortcuts for the selection buttons
// ---------------------------------------------------------------------------

pub fn shortcut_command(key: KeyCode) -> Option<FloorCommand> {
    match key {
        KeyCode::KeyR => Some(FloorCommand::Rotate),
        KeyCode::Delete | KeyCode::Backspace => Some(FloorCommand::Delete),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(FloorCommand::Confirm),
        KeyCode::KeyC => Some(FloorCommand::CancelMovement),
        KeyCode::Escape => Some(FloorCommand::Dismiss),
        _ => None,
    }
}

/// R rotates, Delete removes, Enter confirms, C cancels the move and Escape
/// dismisses the selection. Skipped while an egui text field has focus.
pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut commands: EventWriter<FloorCommand>,
) {
    if keys.get_just_pressed().next().is_none() {
        return;
    }
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }
    for key in keys.get_just_pressed() {
        if let Some(command) = shortcut_command(*key) {
            commands.send(command);
        }
    }
}
