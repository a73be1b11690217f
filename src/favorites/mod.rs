pub mod actions;
pub mod model;
pub mod slice;
