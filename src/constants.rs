/// DOM hooks expected in `index.html`.
///
/// The texture canvas sits underneath the drawing canvas; only the drawing
/// canvas receives pointer events.
pub const TEXTURE_CANVAS_ID: &str = "sand-texture";
pub const DRAWING_CANVAS_ID: &str = "sand-drawing";
pub const WIND_BUTTON_ID: &str = "wind-button";

// Pointer samples use this id when the event carries none (mouse).
pub const MOUSE_POINTER_ID: i32 = 1;
