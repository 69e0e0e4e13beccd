use std::{
    fmt,
    ops::{BitOr, Bound, RangeBounds},
};

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::media_query::{LARGE_QUERY, MEDIUM_QUERY, MediaQuery, SMALL_QUERY, XSMALL_QUERY};

bitflags! {
  #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash)]
  #[must_use]
  pub struct SizeFlags: u8 {
    const XS = 1;
    const SM = 2;
    const MD = 4;
    const LG = 8;
  }
}

/// A named viewport-width range.
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Breakpoint {
    XSmall,
    Small,
    Medium,
    Large,
}

impl Breakpoint {
    /// All breakpoints, narrowest first.
    pub const ALL: [Breakpoint; 4] = [
        Breakpoint::XSmall,
        Breakpoint::Small,
        Breakpoint::Medium,
        Breakpoint::Large,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Breakpoint::XSmall => "xsmall",
            Breakpoint::Small => "small",
            Breakpoint::Medium => "medium",
            Breakpoint::Large => "large",
        }
    }

    /// The media query a host evaluates for this breakpoint.
    pub const fn query(self) -> MediaQuery {
        match self {
            Breakpoint::XSmall => XSMALL_QUERY,
            Breakpoint::Small => SMALL_QUERY,
            Breakpoint::Medium => MEDIUM_QUERY,
            Breakpoint::Large => LARGE_QUERY,
        }
    }

    pub const fn flag(self) -> SizeFlags {
        match self {
            Breakpoint::XSmall => SizeFlags::XS,
            Breakpoint::Small => SizeFlags::SM,
            Breakpoint::Medium => SizeFlags::MD,
            Breakpoint::Large => SizeFlags::LG,
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn next(flags: SizeFlags) -> SizeFlags {
    SizeFlags::from_bits_truncate(flags.bits() << 1)
}

fn prev(flags: SizeFlags) -> SizeFlags {
    SizeFlags::from_bits_truncate(flags.bits() >> 1)
}

/// Build the [`ScreenSize`] covering every breakpoint between the bounds.
///
/// An empty range (for example `..ScreenSize::XS`) yields a size that
/// contains no breakpoint.
pub fn range<R: RangeBounds<ScreenSize>>(range: R) -> ScreenSize {
    let start = match range.start_bound() {
        Bound::Included(i) => i.flags,
        Bound::Excluded(e) => next(e.flags),
        Bound::Unbounded => SizeFlags::XS,
    };
    let end = match range.end_bound() {
        Bound::Included(i) => i.flags,
        Bound::Excluded(e) => prev(e.flags),
        Bound::Unbounded => SizeFlags::LG,
    };
    // Lowest flag of the start and highest flag of the end, so unions with
    // several flags set still produce a contiguous run.
    let (Some(lowest_start), Some(highest_end)) = (start.iter().next(), end.iter().last()) else {
        return ScreenSize::EMPTY;
    };
    if highest_end.bits() < lowest_start.bits() {
        return ScreenSize::EMPTY;
    }

    let mask = highest_end.bits() - lowest_start.bits();
    ScreenSize::new(SizeFlags::from_bits_truncate(
        highest_end.bits() | mask | lowest_start.bits(),
    ))
}

/// A set of breakpoints, used to ask "is the viewport in any of these".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenSize {
    flags: SizeFlags,
}

impl ScreenSize {
    pub const XS: ScreenSize = ScreenSize::new(SizeFlags::XS);
    pub const SM: ScreenSize = ScreenSize::new(SizeFlags::SM);
    pub const MD: ScreenSize = ScreenSize::new(SizeFlags::MD);
    pub const LG: ScreenSize = ScreenSize::new(SizeFlags::LG);
    pub const EMPTY: ScreenSize = ScreenSize::new(SizeFlags::empty());

    const fn new(flags: SizeFlags) -> Self {
        Self { flags }
    }

    pub const fn not(size: ScreenSize) -> Self {
        let flags = SizeFlags::all().difference(size.flags);
        Self { flags }
    }

    pub const fn flags(&self) -> SizeFlags {
        self.flags
    }

    pub const fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub const fn contains(&self, breakpoint: Breakpoint) -> bool {
        self.flags.contains(breakpoint.flag())
    }

    pub fn breakpoints(&self) -> SmallVec<[Breakpoint; 4]> {
        Breakpoint::ALL
            .into_iter()
            .filter(|bp| self.contains(*bp))
            .collect()
    }
}

impl From<Breakpoint> for ScreenSize {
    fn from(breakpoint: Breakpoint) -> Self {
        Self::new(breakpoint.flag())
    }
}

impl BitOr for ScreenSize {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::new(self.flags | rhs.flags)
    }
}
