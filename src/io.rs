pub mod config;
pub mod document;
pub mod obj_loader;
pub mod ply_export;
