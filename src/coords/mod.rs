//! Type-safe coordinate system wrappers
//!
//! Splice window arithmetic mixes three sources of off-by-one errors: 0-based
//! vs 1-based positions, half-open vs closed intervals and forward vs reverse
//! strand. This module makes all three explicit.
//!
//! | Type | Basis | Use Cases |
//! |------|-------|-----------|
//! | [`ZeroBasedPos`] | 0-based | Array indexing, window arithmetic, BED |
//! | [`OneBasedPos`] | 1-based | VCF POS, GFF/GTF |
//! | [`GenomicRegion`] | either, tagged | Everything that lives on a contig |
//!
//! # Design Principles
//!
//! 1. **No implicit conversion**: Must call explicit methods to convert
//! 2. **Self-documenting**: Type signature shows coordinate system
//! 3. **Normalize before comparing**: region comparisons first bring the other
//!    operand to the receiver's strand and coordinate system
//!
//! # Examples
//!
//! ```
//! use ferro_splice::coords::{ZeroBasedPos, OneBasedPos};
//!
//! let zb = ZeroBasedPos::new(99);  // index 99
//! let ob = zb.to_one_based();      // position 100
//! assert_eq!(ob.value(), 100);
//! assert_eq!(ob.to_zero_based(), zb);
//! ```

mod region;
mod variant;

pub use region::GenomicRegion;
pub use variant::{reverse_complement, GenomicVariant, VariantType};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared plumbing for the two position newtypes
macro_rules! position {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Raw coordinate
            #[inline]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

position!(
    /// Offset of a base from the contig start; also an interbase point
    ZeroBasedPos
);

position!(
    /// VCF-style base number, never 0
    OneBasedPos
);

impl ZeroBasedPos {
    #[inline]
    pub const fn new(pos: u64) -> Self {
        Self(pos)
    }

    /// Same base, counted from 1
    #[inline]
    pub const fn to_one_based(self) -> OneBasedPos {
        OneBasedPos(self.0 + 1)
    }
}

impl OneBasedPos {
    /// # Panics
    ///
    /// On `0`, which names no base.
    #[inline]
    pub fn new(pos: u64) -> Self {
        assert!(pos != 0, "1-based position cannot be 0");
        Self(pos)
    }

    /// Same base, counted from 0
    #[inline]
    pub const fn to_zero_based(self) -> ZeroBasedPos {
        ZeroBasedPos(self.0 - 1)
    }
}

/// Start/end pair; the basis comes from the position type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval<P> {
    pub start: P,
    pub end: P,
}

/// A 0-based half-open interval [start, end)
///
/// Exons and introns of a [`crate::reference::TranscriptModel`] are stored
/// this way. An empty interval (`start == end`) denotes the point between two
/// bases.
///
/// ```
/// use ferro_splice::coords::ZeroBasedInterval;
///
/// let exon = ZeroBasedInterval::from_raw(100, 200);
/// assert_eq!(exon.len(), 100);
/// assert!(exon.overlaps(&ZeroBasedInterval::from_raw(199, 250)));
/// assert!(!exon.overlaps(&ZeroBasedInterval::from_raw(200, 250)));
/// ```
pub type ZeroBasedInterval = Interval<ZeroBasedPos>;

/// A 1-based closed interval [start, end]
pub type OneBasedInterval = Interval<OneBasedPos>;

impl ZeroBasedInterval {
    pub const fn new(start: ZeroBasedPos, end: ZeroBasedPos) -> Self {
        Self { start, end }
    }

    pub const fn from_raw(start: u64, end: u64) -> Self {
        Self::new(ZeroBasedPos(start), ZeroBasedPos(end))
    }

    /// The same bases as a closed 1-based interval.
    ///
    /// # Panics
    ///
    /// On an empty interval, which has no closed form.
    pub fn to_one_based_closed(self) -> OneBasedInterval {
        assert!(!self.is_empty(), "empty interval has no 1-based closed form");
        OneBasedInterval::new(self.start.to_one_based(), OneBasedPos(self.end.0))
    }

    #[inline]
    pub const fn len(&self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end.0 <= self.start.0
    }

    /// Whether the two intervals share at least one base.
    ///
    /// An empty interval overlaps a non-empty one when it lies strictly
    /// inside it.
    #[inline]
    pub fn overlaps(&self, other: &ZeroBasedInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely within this interval
    #[inline]
    pub fn contains(&self, other: &ZeroBasedInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl OneBasedInterval {
    pub fn new(start: OneBasedPos, end: OneBasedPos) -> Self {
        Self { start, end }
    }

    pub fn to_zero_based_half_open(self) -> ZeroBasedInterval {
        ZeroBasedInterval::new(self.start.to_zero_based(), ZeroBasedPos(self.end.0))
    }

    /// Number of bases, both ends included
    #[inline]
    pub const fn len(&self) -> u64 {
        (self.end.0 + 1).saturating_sub(self.start.0)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end.0 < self.start.0
    }
}

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Strand {
    /// The other strand
    #[inline]
    pub const fn opposite(self) -> Strand {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strand::Plus => "+",
            Strand::Minus => "-",
        })
    }
}

/// Coordinate system tag carried by every [`GenomicRegion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystem {
    /// 0-based, half-open: [start, end)
    #[default]
    ZeroBased,
    /// 1-based, closed: [start, end]
    OneBased,
}

impl CoordinateSystem {
    /// How much must be subtracted from a start in this system to get a 0-based start.
    #[inline]
    const fn start_delta(self) -> u64 {
        match self {
            CoordinateSystem::ZeroBased => 0,
            CoordinateSystem::OneBased => 1,
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CoordinateSystem::ZeroBased => "0-based",
            CoordinateSystem::OneBased => "1-based",
        })
    }
}

/// A named reference sequence with a known length.
///
/// The length is required to mirror coordinates onto the opposite strand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contig {
    pub name: String,
    pub length: u64,
}

impl Contig {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

impl fmt::Display for Contig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
