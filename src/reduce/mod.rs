pub mod pca;

pub use pca::PCA;
