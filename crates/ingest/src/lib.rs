mod coerce;
mod coordinates;
mod outcome;
mod utils;

pub mod climate;
pub mod kml;
pub mod mosmix;

pub use coerce::*;
pub use coordinates::*;
pub use outcome::*;
pub use utils::*;
