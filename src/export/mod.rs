pub mod page;
pub mod sink;
