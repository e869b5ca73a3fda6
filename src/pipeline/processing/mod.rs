// Pipeline processing: filtering, segmentation, normalization, expansion and indexing

pub mod expand;
pub mod filter;
pub mod index;
pub mod normalize;
pub mod quality_gate;
pub mod rank;
pub mod segment;

pub use expand::expand_facts;
pub use filter::filter_noise;
pub use index::{build_index, ArtifactIndex};
pub use normalize::normalize_block;
pub use quality_gate::{DefaultQualityGate, QualityAssessment, QualityGate};
pub use segment::segment_blocks;
