pub mod footprint;
pub mod overlap;
pub mod session;
