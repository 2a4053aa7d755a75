pub mod state;

pub use state::{ResourceState, ResourceStatus};
