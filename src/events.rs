//! Pointer events on the canvas turned into status messages.

/// Kind of pointer event delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    /// The pointer moved over the scene.
    Moved,
    /// A button was pressed.
    Pressed,
    /// A button was released.
    Released,
    /// Anything else the host forwards.
    Other,
}

/// Result of observing an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Whether the event should stop propagating. Always `false`: the adapter only observes.
    pub consumed: bool,
    /// Status text to show, if any.
    pub message: Option<String>,
}

/// Describe a pointer event at scene coordinates `(x, y)`.
///
/// Only moves on our own canvas produce a message; the y value is flipped back
/// to the model's upward axis.
///
/// # Examples
/// ```
/// use trussview::{handle_pointer_event, PointerEventKind};
///
/// let outcome = handle_pointer_event(true, PointerEventKind::Moved, 1.234, 5.0);
/// assert!(!outcome.consumed);
/// assert_eq!(outcome.message.as_deref(), Some("Mouse: x=1.23, y=-5.00"));
/// ```
#[must_use]
pub fn handle_pointer_event(is_ours: bool, kind: PointerEventKind, x: f64, y: f64) -> EventOutcome {
    if !is_ours || kind != PointerEventKind::Moved {
        return EventOutcome::default();
    }
    EventOutcome {
        consumed: false,
        message: Some(format!(
            "Mouse: x={:.2}, y={:.2}",
            without_negative_zero(x),
            without_negative_zero(-y)
        )),
    }
}

/// Values that would print as `-0.00` print as `0.00` instead.
fn without_negative_zero(value: f64) -> f64 {
    if value.abs() < 0.005 {
        0.0
    } else {
        value
    }
}
