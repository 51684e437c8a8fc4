pub mod stations;

pub use stations::*;
