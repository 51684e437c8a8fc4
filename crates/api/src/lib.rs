mod startup;
mod utils;

pub mod db;
pub mod routes;

pub use db::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
