//! Shared traits for finance primitives.

/// Converts an entity into a short user-facing label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
