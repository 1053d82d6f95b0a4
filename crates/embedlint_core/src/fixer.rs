//! Applying mapped autofixes to source content.
//!
//! Fixes are applied from the end of the file to the beginning so earlier
//! offsets stay valid while later spans are rewritten.

use tracing::{debug, warn};

use crate::{Fix, MappedDiagnostic};

/// Result of applying fixes to one file's content.
#[derive(Debug)]
pub struct FixerResult {
    /// Number of fixes applied.
    pub fixes_applied: usize,
    /// The fixed content.
    pub fixed_content: String,
    /// Whether the content was modified.
    pub modified: bool,
}

impl FixerResult {
    fn unchanged(content: String) -> Self {
        Self {
            fixes_applied: 0,
            fixed_content: content,
            modified: false,
        }
    }
}

/// Applies every fix carried by `diagnostics` to `content`.
///
/// Overlapping fixes are resolved by keeping the one that starts later and
/// skipping the overlapped one; out-of-bounds or non-boundary spans are
/// skipped with a warning rather than failing the file.
pub fn apply_fixes_to_content(content: &str, diagnostics: &[MappedDiagnostic]) -> FixerResult {
    let fixes: Vec<&Fix> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();

    if fixes.is_empty() {
        return FixerResult::unchanged(content.to_string());
    }

    let mut sorted_fixes = fixes;
    sorted_fixes.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    let sorted_fixes = filter_overlapping_fixes(sorted_fixes);

    let mut result = content.to_string();
    let mut applied = 0;

    for fix in &sorted_fixes {
        let start = fix.span.start as usize;
        let end = fix.span.end as usize;

        if start > result.len() || end > result.len() || start > end {
            warn!(
                "Invalid fix span: start={}, end={}, content_len={}",
                start,
                end,
                result.len()
            );
            continue;
        }
        if !result.is_char_boundary(start) || !result.is_char_boundary(end) {
            warn!("Fix span [{start}..{end}] does not fall on character boundaries");
            continue;
        }

        debug!("Applying fix: replace [{start}..{end}] with '{}'", fix.text);
        result.replace_range(start..end, &fix.text);
        applied += 1;
    }

    FixerResult {
        fixes_applied: applied,
        modified: applied > 0,
        fixed_content: result,
    }
}

/// Filters out overlapping fixes, keeping the one that starts later.
///
/// Expects `fixes` sorted by `span.start` descending; because of that order,
/// a candidate can only overlap the most recently accepted fix.
fn filter_overlapping_fixes(fixes: Vec<&Fix>) -> Vec<&Fix> {
    if fixes.len() <= 1 {
        return fixes;
    }

    let mut result: Vec<&Fix> = Vec::with_capacity(fixes.len());

    for fix in fixes {
        let overlaps = result
            .last()
            .is_some_and(|last| fix.span.end > last.span.start && fix.span.start < last.span.end);

        if overlaps {
            warn!(
                "Skipping overlapping fix at [{}, {}]",
                fix.span.start, fix.span.end
            );
        } else {
            result.push(fix);
        }
    }

    result
}
