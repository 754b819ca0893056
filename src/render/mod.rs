pub(crate) mod composite;
pub mod scene;
pub mod surface;
