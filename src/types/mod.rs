pub mod feature;
pub mod geom;
pub mod landmark;
