//! Element highlighting
//!
//! Applies a visible outline and background to elements of a [`Page`] and
//! restores them afterwards. The prior style is captured before any change,
//! so restoring a [`StyleSnapshot`] gives back exactly what was there.

use serde::{Deserialize, Serialize};

use crate::page::{ElementId, Page};

const OUTLINE: &str = "outline";
const OUTLINE_OFFSET: &str = "outline-offset";
const BACKGROUND_COLOR: &str = "background-color";

/// Style applied to highlighted elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    /// Outline (default: "3px solid red")
    pub outline: String,
    /// Outline offset (default: "2px")
    pub outline_offset: String,
    /// Background color (default: "rgba(255, 0, 0, 0.2)")
    pub background_color: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            outline: "3px solid red".to_string(),
            outline_offset: "2px".to_string(),
            background_color: "rgba(255, 0, 0, 0.2)".to_string(),
        }
    }
}

/// Style properties of an element as they were before highlighting
///
/// `None` means the property was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    pub outline: Option<String>,
    pub outline_offset: Option<String>,
    pub background_color: Option<String>,
}

/// Highlights an element
///
/// Skips elements that do not exist or already have an outline, which
/// makes a second call on the same element a no-op.
///
/// # Returns
/// The snapshot needed to undo the highlight, `None` if nothing changed
pub fn highlight(
    page: &mut Page,
    id: ElementId,
    style: &HighlightStyle,
) -> Option<StyleSnapshot> {
    let mut current = page.style(id)?;
    if current.get(OUTLINE).is_some_and(|v| !v.is_empty()) {
        return None;
    }

    let snapshot = StyleSnapshot {
        outline: current.get(OUTLINE).map(str::to_string),
        outline_offset: current.get(OUTLINE_OFFSET).map(str::to_string),
        background_color: current.get(BACKGROUND_COLOR).map(str::to_string),
    };

    current.set(OUTLINE, &style.outline);
    current.set(OUTLINE_OFFSET, &style.outline_offset);
    current.set(BACKGROUND_COLOR, &style.background_color);
    page.set_style(id, current);

    Some(snapshot)
}

/// Restores an element from the snapshot taken by [`highlight`]
///
/// Returns `false` if the element does not exist.
pub fn unhighlight(page: &mut Page, id: ElementId, snapshot: &StyleSnapshot) -> bool {
    let Some(mut current) = page.style(id) else {
        return false;
    };

    current.set(OUTLINE, snapshot.outline.as_deref().unwrap_or(""));
    current.set(OUTLINE_OFFSET, snapshot.outline_offset.as_deref().unwrap_or(""));
    current.set(BACKGROUND_COLOR, snapshot.background_color.as_deref().unwrap_or(""));
    page.set_style(id, current)
}
