pub mod column;
pub mod group;
pub mod ingredient;
pub mod matrix;
pub mod preference;
pub mod rule;
