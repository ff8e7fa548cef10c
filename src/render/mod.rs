pub mod compositor;
pub(crate) mod decorate;
pub mod spec;
pub mod surface;
pub mod theme;
