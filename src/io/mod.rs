pub mod loader;
pub mod export;
