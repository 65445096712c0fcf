//! Splice-site geometry: window parameters, variant location and allele
//! rendering
//!
//! # Example
//!
//! ```
//! use ferro_splice::reference::{MockProvider, ReferenceProvider};
//! use ferro_splice::coords::GenomicVariant;
//! use ferro_splice::splicing::{SplicingLocator, SplicingParameters, SplicingPositionType};
//!
//! let provider = MockProvider::with_test_data();
//! let tx = provider.transcript_by_accession("NM_SPLICE.1").unwrap();
//! let chr = provider.contig("chrT").unwrap();
//!
//! let variant = GenomicVariant::from_vcf(chr, 201, "G", "A").unwrap();
//! let location = SplicingLocator::new(SplicingParameters::default()).locate(&variant, &tx);
//! assert_eq!(location.position_type(), SplicingPositionType::Donor);
//! ```

pub mod allele;
pub mod location;
pub mod locator;
pub mod parameters;

pub use allele::AlleleGenerator;
pub use location::{SpliceSite, SplicingLocationData, SplicingPositionType};
pub use locator::SplicingLocator;
pub use parameters::{SpliceSiteKind, SplicingParameters};
