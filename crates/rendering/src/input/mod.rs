//! Input handling for the planner.
//!
//! Split into sub-modules by concern:
//! - `types`: pointer tracking and the status line resource
//! - `pointer`: touch/mouse collection and resolution into a `PointerFrame`
//! - `keyboard`: shortcuts for the selection buttons
//! - `status`: status line feed from floor events

mod keyboard;
mod pointer;
mod status;
mod types;


pub use types::{
    PointerSample, PointerTracker, StatusMessage, MOUSE_POINTER_ID, MOVE_THRESHOLD_PX,
};

pub use pointer::{
    ground_hit, pick_furniture, resolve_pointer_frame, sample_phase, track_pointers,
};

pub use keyboard::{keyboard_shortcuts, shortcut_command};

pub use status::{refusal_message, report_floor_feedback, tick_status_message};
