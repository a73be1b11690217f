pub mod item_detail;
pub mod login;
pub mod pages;
pub mod router;

pub use pages::{render, Landmark, Screen};
pub use router::{Route, Viewport};
