pub mod auth;
mod errors;
pub mod responses;

pub use auth::*;
pub use errors::*;
pub use responses::*;
