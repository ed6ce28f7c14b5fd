pub mod access;
mod bounded;
pub mod error;
pub mod request;
pub mod session;

pub use access::role::Role;
pub use access::{evaluate, Decision};
pub use error::AccessError;
pub use request::AccessRequest;
pub use session::Session;
