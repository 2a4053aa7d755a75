pub mod models;
pub mod query;
pub mod store;

pub use query::Query;
pub use store::AppwriteSearchCountStore;
