pub mod registry;

pub use registry::SearchCountRegistry;
