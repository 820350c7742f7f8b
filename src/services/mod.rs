pub mod archive;
pub mod config;
pub mod container;
pub mod repack;
pub mod scanner;
