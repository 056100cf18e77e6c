//! Trim window selection from detected silence regions.
//!
//! A pure rule set mapping paired silence intervals to the single content
//! window worth keeping. Desynchronized sequences never reach this point;
//! pairing rejects them first.

use crate::models::{SilenceInterval, TrimWindow};

/// Select the content window to keep, by precedence:
///
/// 1. No silence detected: keep the entire asset.
/// 2. Exactly one region: if it touches the start, cut leading silence only.
///    A region whose end sits at 0s is degenerate and leaves the asset
///    untrimmed. Otherwise the window is the region itself, wherever it sits.
/// 3. Two or more regions: end of the first region (presumed leading
///    silence) through start of the last region (presumed trailing silence);
///    interior regions are ignored.
pub fn select_trim_window(intervals: &[SilenceInterval]) -> TrimWindow {
    match intervals {
        [] => TrimWindow::keep_all(),
        [only] => {
            if only.start_secs == 0.0 {
                TrimWindow {
                    start_secs: Some(only.end_secs),
                    end_secs: None,
                }
            } else if only.end_secs == 0.0 {
                // A silence end at 0s that is not also the start has no
                // sensible trim policy; keep the asset whole.
                tracing::warn!(
                    "single silence region ends at 0s (start {}s); leaving asset untrimmed",
                    only.start_secs
                );
                TrimWindow::keep_all()
            } else {
                TrimWindow {
                    start_secs: Some(only.start_secs),
                    end_secs: Some(only.end_secs),
                }
            }
        }
        [first, .., last] => TrimWindow {
            start_secs: Some(first.end_secs),
            end_secs: Some(last.start_secs),
        },
    }
}
