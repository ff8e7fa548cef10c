pub mod blend;
pub(crate) mod blur;
pub(crate) mod color;
pub mod params;
pub mod pipeline;
