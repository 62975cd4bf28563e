//! Resource limits applied while parsing.
//!
//! The parser descends recursively, one native stack frame per nested array
//! or object, so deeply nested input is bounded by [`Limits::max_nesting_depth`].

/// Nesting depth used by [`Limits::default`].
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of arrays/objects open at the same time
    pub max_nesting_depth: usize,
}

impl Limits {
    pub const fn new(max_nesting_depth: usize) -> Self {
        Self { max_nesting_depth }
    }

    /// No depth limit. Only use this on trusted input.
    pub const fn unlimited() -> Self {
        Self {
            max_nesting_depth: usize::MAX,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NESTING_DEPTH)
    }
}
