use crate::data::error::VolumeError;
use crate::data::model::SliceAxis;

// ---------------------------------------------------------------------------
// Toolkit-independent input vocabulary
// ---------------------------------------------------------------------------

/// Direction of a catalog navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Other,
}

/// Input callbacks the display layer delivers to the viewer.
///
/// Navigation can fail when the next volume cannot be loaded; such errors are
/// fatal to the session and are returned to the caller untouched.
pub trait ViewerEvents {
    fn on_navigate(&mut self, step: Step) -> Result<(), VolumeError>;

    fn on_threshold_change(&mut self, value: u8);

    /// `x`, `y` are image coordinates (column, row) inside `view`.
    fn on_pointer_drag(&mut self, button: PointerButton, view: SliceAxis, x: f64, y: f64);

    fn on_key_press(&mut self, key: Key) -> Result<(), VolumeError>;
}
