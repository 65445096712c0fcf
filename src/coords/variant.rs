//! Genomic variants in VCF-like allele representation

use serde::Serialize;
use std::fmt;

use super::{CoordinateSystem, GenomicRegion, Strand};
use crate::error::FerroError;

/// Variant class, derived from the alleles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VariantType {
    /// Single base substitution
    Snp,
    /// Multi-base substitution of equal length
    Mnv,
    /// Alternate allele extends the reference allele
    Insertion,
    /// Reference allele extends the alternate allele
    Deletion,
    /// Length-changing replacement without a shared padding base
    Delins,
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VariantType::Snp => "SNP",
            VariantType::Mnv => "MNV",
            VariantType::Insertion => "INS",
            VariantType::Deletion => "DEL",
            VariantType::Delins => "DELINS",
        };
        write!(f, "{}", s)
    }
}

/// A sequence variant: the region spanned by the reference allele plus both
/// alleles, oriented on the region's strand.
///
/// Alleles are never empty; insertions and deletions carry the padding base
/// used by VCF (`A>AGG`, `AGG>A`).
///
/// ```
/// use ferro_splice::coords::{Contig, GenomicRegion, GenomicVariant, Strand, VariantType};
///
/// let chr = Contig::new("chr1", 1_000);
/// let variant = GenomicVariant::from_vcf(chr, 101, "A", "AGG").unwrap();
/// assert_eq!(variant.variant_type(), VariantType::Insertion);
/// assert_eq!(variant.region().len(), 1);
///
/// let minus = variant.with_strand(Strand::Minus);
/// assert_eq!(minus.ref_allele(), "T");
/// assert_eq!(minus.alt_allele(), "CCT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GenomicVariant {
    region: GenomicRegion,
    ref_allele: String,
    alt_allele: String,
}

impl GenomicVariant {
    /// Create a variant, validating that the alleles are non-empty nucleotide
    /// strings and that the region spans exactly the reference allele.
    pub fn new(
        region: GenomicRegion,
        ref_allele: impl AsRef<str>,
        alt_allele: impl AsRef<str>,
    ) -> Result<Self, FerroError> {
        let ref_allele = normalize_allele(ref_allele.as_ref())?;
        let alt_allele = normalize_allele(alt_allele.as_ref())?;
        if region.len() != ref_allele.len() as u64 {
            return Err(FerroError::InvalidVariant {
                msg: format!(
                    "region {} spans {} bases but reference allele {} has {}",
                    region,
                    region.len(),
                    ref_allele,
                    ref_allele.len()
                ),
            });
        }
        Ok(Self {
            region,
            ref_allele,
            alt_allele,
        })
    }

    /// Create a forward-strand variant from a VCF record's CHROM/POS/REF/ALT.
    pub fn from_vcf(
        contig: super::Contig,
        pos: u64,
        ref_allele: &str,
        alt_allele: &str,
    ) -> Result<Self, FerroError> {
        let end = pos
            .checked_add(ref_allele.len() as u64)
            .and_then(|e| e.checked_sub(1))
            .ok_or_else(|| FerroError::InvalidVariant {
                msg: format!("cannot place {} at position {}", ref_allele, pos),
            })?;
        let region = GenomicRegion::one_based(contig, Strand::Plus, pos, end)?;
        Self::new(region, ref_allele, alt_allele)
    }

    pub fn region(&self) -> &GenomicRegion {
        &self.region
    }

    pub fn contig_name(&self) -> &str {
        self.region.contig_name()
    }

    pub fn strand(&self) -> Strand {
        self.region.strand()
    }

    pub fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    pub fn alt_allele(&self) -> &str {
        &self.alt_allele
    }

    /// Length of the longer allele
    pub fn max_allele_len(&self) -> usize {
        self.ref_allele.len().max(self.alt_allele.len())
    }

    /// Change in sequence length caused by the variant (positive for net insertions)
    pub fn length_change(&self) -> i64 {
        self.alt_allele.len() as i64 - self.ref_allele.len() as i64
    }

    /// Variant class, derived from the alleles
    pub fn variant_type(&self) -> VariantType {
        let (r, a) = (self.ref_allele.len(), self.alt_allele.len());
        match r.cmp(&a) {
            std::cmp::Ordering::Equal if r == 1 => VariantType::Snp,
            std::cmp::Ordering::Equal => VariantType::Mnv,
            std::cmp::Ordering::Less if self.alt_allele.starts_with(&self.ref_allele) => {
                VariantType::Insertion
            }
            std::cmp::Ordering::Greater if self.ref_allele.starts_with(&self.alt_allele) => {
                VariantType::Deletion
            }
            _ => VariantType::Delins,
        }
    }

    /// The same variant seen from `strand`: the region is mirrored and both
    /// alleles are reverse-complemented.
    pub fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.strand() {
            return self.clone();
        }
        Self {
            region: self.region.with_strand(strand),
            ref_allele: reverse_complement(&self.ref_allele),
            alt_allele: reverse_complement(&self.alt_allele),
        }
    }

    /// The same variant expressed in another coordinate system
    pub fn with_coordinate_system(&self, system: CoordinateSystem) -> Self {
        Self {
            region: self.region.with_coordinate_system(system),
            ref_allele: self.ref_allele.clone(),
            alt_allele: self.alt_allele.clone(),
        }
    }

    /// Variant expressed on `other`'s strand and coordinate system
    pub fn normalized_to(&self, other: &GenomicRegion) -> Self {
        self.with_strand(other.strand())
            .with_coordinate_system(other.coordinate_system())
    }
}

impl fmt::Display for GenomicVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}>{}", self.region, self.ref_allele, self.alt_allele)
    }
}

fn normalize_allele(allele: &str) -> Result<String, FerroError> {
    if allele.is_empty() {
        return Err(FerroError::InvalidVariant {
            msg: "alleles must not be empty".to_string(),
        });
    }
    let upper = allele.to_ascii_uppercase();
    if let Some(c) = upper
        .chars()
        .find(|c| !matches!(c, 'A' | 'C' | 'G' | 'T' | 'N'))
    {
        return Err(FerroError::InvalidVariant {
            msg: format!("invalid base '{}' in allele {}", c, allele),
        });
    }
    Ok(upper)
}

/// Reverse complement of a nucleotide string; case is preserved and unknown
/// characters become `N`.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| match c {
            'A' => 'T',
            'T' => 'A',
            'G' => 'C',
            'C' => 'G',
            'a' => 't',
            't' => 'a',
            'g' => 'c',
            'c' => 'g',
            'N' => 'N',
            'n' => 'n',
            _ => 'N',
        })
        .collect()
}
