pub mod frame;
pub mod merger;
pub mod normalizer;
