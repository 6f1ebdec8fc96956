mod host;
mod vulnerability;

pub use host::*;
pub use vulnerability::*;
