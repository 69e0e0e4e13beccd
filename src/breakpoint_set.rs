use std::fmt;

use crate::responsive::{Breakpoint, ScreenSize};

/// The match state of the four breakpoint queries.
///
/// Each flag is derived from its own query, so nothing forces exactly one to
/// be set. `None` means the runtime has no viewport to ask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakpointSet {
    #[cfg_attr(feature = "serde", serde(rename = "isXSmall"))]
    pub is_xsmall: Option<bool>,
    #[cfg_attr(feature = "serde", serde(rename = "isSmall"))]
    pub is_small: Option<bool>,
    #[cfg_attr(feature = "serde", serde(rename = "isMedium"))]
    pub is_medium: Option<bool>,
    #[cfg_attr(feature = "serde", serde(rename = "isLarge"))]
    pub is_large: Option<bool>,
}

impl BreakpointSet {
    /// All four flags unknown.
    pub const fn unknown() -> Self {
        Self {
            is_xsmall: None,
            is_small: None,
            is_medium: None,
            is_large: None,
        }
    }

    /// Evaluate the fixed breakpoint queries against `width` directly.
    pub fn from_width(width: f64) -> Self {
        Self::from_fn(|bp| Some(bp.query().matches(width)))
    }

    pub(crate) fn from_fn(mut f: impl FnMut(Breakpoint) -> Option<bool>) -> Self {
        Self {
            is_xsmall: f(Breakpoint::XSmall),
            is_small: f(Breakpoint::Small),
            is_medium: f(Breakpoint::Medium),
            is_large: f(Breakpoint::Large),
        }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> Option<bool> {
        match breakpoint {
            Breakpoint::XSmall => self.is_xsmall,
            Breakpoint::Small => self.is_small,
            Breakpoint::Medium => self.is_medium,
            Breakpoint::Large => self.is_large,
        }
    }

    /// True when every flag has a value.
    pub fn is_known(&self) -> bool {
        Breakpoint::ALL.iter().all(|bp| self.get(*bp).is_some())
    }

    /// The narrowest breakpoint whose query matches.
    pub fn active(&self) -> Option<Breakpoint> {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| self.get(*bp) == Some(true))
    }

    /// Whether any matching breakpoint is part of `size`.
    pub fn matches(&self, size: ScreenSize) -> bool {
        Breakpoint::ALL
            .into_iter()
            .any(|bp| self.get(bp) == Some(true) && size.contains(bp))
    }
}

impl fmt::Display for BreakpointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for bp in Breakpoint::ALL {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match self.get(bp) {
                Some(true) => write!(f, "{bp}"),
                Some(false) => write!(f, "!{bp}"),
                None => write!(f, "?{bp}"),
            }?;
        }
        Ok(())
    }
}
