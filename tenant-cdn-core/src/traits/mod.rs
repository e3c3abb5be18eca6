//! Storage and randomness abstraction trait definitions

mod distribution_repository;
mod suffix_source;

pub use distribution_repository::DistributionRecordRepository;
pub use suffix_source::{RandomSuffixSource, SuffixSource, SUFFIX_LEN};
