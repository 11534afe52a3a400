pub mod column;
pub mod station;
