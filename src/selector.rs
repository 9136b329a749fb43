//! The Selector Resolver (C4): given a selector string and kind, returns
//! the matching live element (or an ordered list, up to a limit).
//!
//! The resolver never waits; callers implement their own deadline loop
//! (§4.1).

use crate::constants::ACCESSIBILITY_ID_SHORTCUTS;
use crate::driver::{AppHandle, ElementHandle, SelectorKind};
use crate::error::Result;

/// Resolve a single element. For `accessibilityId`, probes the ordered
/// element-type shortcut list before falling back to a generic
/// `identifier == S OR label == S` query — cheap typed queries before an
/// expensive descendants-matching-any search (§4.1 step 1).
pub async fn find_one(
    app: &dyn AppHandle,
    kind: SelectorKind,
    selector: &str,
) -> Result<Option<Box<dyn ElementHandle>>> {
    if kind == SelectorKind::AccessibilityId {
        for shortcut in ACCESSIBILITY_ID_SHORTCUTS {
            if let Some(found) = app.find_by_shortcut(shortcut, selector).await? {
                return Ok(Some(found));
            }
        }
        // No typed shortcut matched; fall back to a generic
        // `identifier == S OR label == S` query (§4.1 step 1).
        return app.find_one(SelectorKind::AccessibilityId, selector).await;
    }
    app.find_one(kind, selector).await
}

/// Resolve an ordered list of elements, up to `limit` (0 = unlimited)
/// (§4.1 step 4).
pub async fn find_many(
    app: &dyn AppHandle,
    kind: SelectorKind,
    selector: &str,
    limit: usize,
) -> Result<Vec<Box<dyn ElementHandle>>> {
    app.find_many(kind, selector, limit).await
}

#[cfg(test)]
mod selector_test;
