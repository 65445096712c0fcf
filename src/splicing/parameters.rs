//! Donor/acceptor window geometry

use serde::{Deserialize, Serialize};

use crate::coords::{GenomicRegion, ZeroBasedInterval};
use crate::error::FerroError;

/// Which side of an intron a splice site sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpliceSiteKind {
    /// Exon→intron boundary (5' splice site)
    Donor,
    /// Intron→exon boundary (3' splice site)
    Acceptor,
}

/// Number of bases on each side of a boundary forming the fixed-width
/// donor and acceptor windows.
///
/// These must match the positional weight matrices used for scoring and stay
/// fixed for the lifetime of an annotator.
///
/// ```
/// use ferro_splice::splicing::{SpliceSiteKind, SplicingParameters};
///
/// let params = SplicingParameters::default();
/// assert_eq!(params.window_len(SpliceSiteKind::Donor), 9);
/// assert_eq!(params.window_len(SpliceSiteKind::Acceptor), 27);
///
/// // donor boundary between bases 99 and 100: [97, 106)
/// let w = params.window_interval(100, SpliceSiteKind::Donor).unwrap();
/// assert_eq!((w.start.value(), w.end.value()), (97, 106));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplicingParameters {
    pub donor_exonic: u64,
    pub donor_intronic: u64,
    pub acceptor_exonic: u64,
    pub acceptor_intronic: u64,
}

impl Default for SplicingParameters {
    fn default() -> Self {
        Self {
            donor_exonic: 3,
            donor_intronic: 6,
            acceptor_exonic: 2,
            acceptor_intronic: 25,
        }
    }
}

impl SplicingParameters {
    pub fn new(
        donor_exonic: u64,
        donor_intronic: u64,
        acceptor_exonic: u64,
        acceptor_intronic: u64,
    ) -> Result<Self, FerroError> {
        let params = Self {
            donor_exonic,
            donor_intronic,
            acceptor_exonic,
            acceptor_intronic,
        };
        params.validate()?;
        Ok(params)
    }

    /// All four extents must be positive.
    pub fn validate(&self) -> Result<(), FerroError> {
        let named = [
            ("donor_exonic", self.donor_exonic),
            ("donor_intronic", self.donor_intronic),
            ("acceptor_exonic", self.acceptor_exonic),
            ("acceptor_intronic", self.acceptor_intronic),
        ];
        if let Some((name, _)) = named.iter().find(|(_, v)| *v == 0) {
            return Err(FerroError::config(format!(
                "splicing parameter {} must be positive",
                name
            )));
        }
        Ok(())
    }

    pub fn donor_len(&self) -> usize {
        (self.donor_exonic + self.donor_intronic) as usize
    }

    pub fn acceptor_len(&self) -> usize {
        (self.acceptor_exonic + self.acceptor_intronic) as usize
    }

    pub fn window_len(&self, kind: SpliceSiteKind) -> usize {
        match kind {
            SpliceSiteKind::Donor => self.donor_len(),
            SpliceSiteKind::Acceptor => self.acceptor_len(),
        }
    }

    /// Widest of the two windows
    pub fn max_window_len(&self) -> usize {
        self.donor_len().max(self.acceptor_len())
    }

    /// Bases (upstream, downstream) of the boundary covered by a window
    pub fn flanks(&self, kind: SpliceSiteKind) -> (u64, u64) {
        match kind {
            SpliceSiteKind::Donor => (self.donor_exonic, self.donor_intronic),
            SpliceSiteKind::Acceptor => (self.acceptor_intronic, self.acceptor_exonic),
        }
    }

    /// Window around the 0-based interbase `boundary`, or `None` when it
    /// would start before position 0.
    pub fn window_interval(&self, boundary: u64, kind: SpliceSiteKind) -> Option<ZeroBasedInterval> {
        let (up, down) = self.flanks(kind);
        let start = boundary.checked_sub(up)?;
        let end = boundary.checked_add(down)?;
        Some(ZeroBasedInterval::from_raw(start, end))
    }

    /// Window around a zero-length boundary region, or `None` when it falls
    /// off the contig.
    pub fn window_region(&self, boundary: &GenomicRegion, kind: SpliceSiteKind) -> Option<GenomicRegion> {
        let (up, down) = self.flanks(kind);
        boundary.extended(up, down)
    }
}
