//! Types for use as [crate::Read::Cfg].

use crate::Error;

/// Default maximum nesting of types, collections, pairs, and propositions.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum number of elements in a single collection (the wire format stores counts as
/// `u16`).
pub const DEFAULT_MAX_ITEMS: usize = u16::MAX as usize;

/// Limits applied while decoding untrusted input.
///
/// # Examples
///
/// ```
/// use sigma_codec::Config;
///
/// let cfg = Config::default().with_max_depth(2);
/// let child = cfg.nested().unwrap();
/// let grandchild = child.nested().unwrap();
/// assert!(grandchild.nested().is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Config {
    /// Remaining levels of nesting allowed below the current one.
    pub max_depth: usize,

    /// Maximum number of elements accepted in any one collection.
    pub max_items: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl Config {
    /// Returns a copy with a different depth limit.
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    /// Returns a copy with a different collection size limit.
    pub fn with_max_items(self, max_items: usize) -> Self {
        Self { max_items, ..self }
    }

    /// Returns the configuration to use one level further down, or an error if no levels remain.
    pub fn nested(&self) -> Result<Self, Error> {
        let max_depth = self.max_depth.checked_sub(1).ok_or(Error::DepthExceeded)?;
        Ok(Self { max_depth, ..*self })
    }

    /// Checks a decoded element count against the collection size limit.
    pub fn check_items(&self, items: usize) -> Result<(), Error> {
        if items > self.max_items {
            return Err(Error::LengthExceeded(items, self.max_items));
        }
        Ok(())
    }
}
