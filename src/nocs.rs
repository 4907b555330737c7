pub mod material;
pub mod normalizer;
pub mod operator;
