mod postgres;
mod stations;

pub use postgres::*;
pub use stations::*;
