pub mod event;
pub mod session;
pub mod view;

/// Normalize a user-supplied optional string: trims whitespace and maps
/// blank values to `None` so downstream code never sees `Some("")`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
