pub mod attributes;
pub mod document;
pub mod material;
pub mod mesh;
pub mod object;
