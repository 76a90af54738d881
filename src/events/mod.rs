pub mod pointer;
pub mod viewport;

pub use pointer::wire_mousemove;
pub use viewport::{wire_resize, wire_scroll};
