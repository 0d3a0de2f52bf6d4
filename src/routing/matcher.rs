//! Route matching logic.
//!
//! # Responsibilities
//! - Match a request path against a route's path pattern
//! - Optional case-insensitive comparison
//!
//! # Design Decisions
//! - Exact string match only: no parameterized segments, no prefix matching
//! - Query string and fragment are never part of the matched path
//! - No regex to keep matching O(len)

/// Trait for matching a location path against a route condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches one exact path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactPathMatcher {
    path: &'static str,
    case_insensitive: bool,
}

impl ExactPathMatcher {
    /// Create a case-sensitive matcher for `path`.
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            case_insensitive: false,
        }
    }

    /// Create a matcher that ignores ASCII case.
    pub fn case_insensitive(path: &'static str) -> Self {
        Self {
            path,
            case_insensitive: true,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        if self.case_insensitive {
            self.path.eq_ignore_ascii_case(path)
        } else {
            self.path == path
        }
    }
}
