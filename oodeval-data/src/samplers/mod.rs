pub mod sequential_sampler;
pub mod subset;
pub mod traits;

pub use sequential_sampler::SequentialSampler;
pub use subset::{block_subset, random_subset, select_subset, SUBSET_SEED};
pub use traits::Sampler;
