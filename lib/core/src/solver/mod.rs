pub use self::api::*;
pub use self::types::*;
pub use self::varisat::*;

mod api;
mod types;
mod varisat;
