pub mod composer;
pub mod correlation;
pub mod normalizer;
pub mod tiers;
pub mod weights;

pub use composer::{compose_index, ClassifiedRow, IndexReport};
pub use normalizer::{min_max_normalize, min_max_scale_values, ValueRange};
pub use tiers::{classify, Tier, TierCounts, LOW_UPPER_BOUND, MEDIUM_UPPER_BOUND};
pub use weights::{estimate_weights, FeatureWeight, WeightVector};
