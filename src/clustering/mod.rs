pub mod flow;
pub mod kmeans;

pub use kmeans::{k_means, k_means_with_solver};
