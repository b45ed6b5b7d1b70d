// Information theory over discrete distributions: entropy, KL divergence,
// mutual information. Everything is measured in bits (log base 2).

pub mod distribution;
pub mod metrics;

pub use distribution::{validate_distribution, validate_joint, InformationError};
pub use metrics::{
    entropy, joint_entropy, kl_divergence, marginals, mutual_information, outer_product,
};
