pub mod atlas;
pub mod library;
pub mod preprocess;
pub mod source;
