pub mod home;
pub mod movies;
pub mod resource;
pub mod search_count;
