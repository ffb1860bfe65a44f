pub mod person;
pub mod preferences;
pub mod roster;
pub mod group;
pub mod config;
pub mod errors;

pub use person::*;
pub use preferences::*;
pub use roster::*;
pub use group::*;
pub use config::*;
pub use errors::*;
