pub mod appwrite;
pub mod memory;

pub use appwrite::AppwriteSearchCountStore;
pub use memory::InMemorySearchCountStore;
