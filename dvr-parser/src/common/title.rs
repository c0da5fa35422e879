//! Title acceptance rules for catalog searches.
//!
//! Recorder firmware truncates or pads titles when it transcodes a recording
//! for the media server, so a search accepts substring matches in either
//! direction. Both sides are compared after trimming surrounding whitespace.

/// Which rule accepted a candidate title.
///
/// Variants are ordered by strength: `Exact` is the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TitleMatch {
    /// The candidate title equals the target
    Exact,
    /// The target contains the candidate title
    TargetContainsTitle,
    /// The candidate title contains the target
    TitleContainsTarget,
}

impl TitleMatch {
    /// Evaluate the acceptance rules in order; the first satisfied rule wins.
    ///
    /// An empty (or whitespace-only) target or title never matches, since
    /// every string contains the empty string.
    pub fn evaluate(target: &str, title: &str) -> Option<Self> {
        let target = target.trim();
        let title = title.trim();
        if target.is_empty() || title.is_empty() {
            return None;
        }

        if target == title {
            Some(TitleMatch::Exact)
        } else if target.contains(title) {
            Some(TitleMatch::TargetContainsTitle)
        } else if title.contains(target) {
            Some(TitleMatch::TitleContainsTarget)
        } else {
            None
        }
    }

    pub fn is_exact(self) -> bool {
        self == TitleMatch::Exact
    }
}
