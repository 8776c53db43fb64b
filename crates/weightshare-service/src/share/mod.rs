//! Share management: allocate, persist, and serve read-only snapshots.

pub mod access;
pub mod error;
pub mod link;
pub mod service;

pub use access::AccessService;
pub use error::ShareError;
pub use link::LinkService;
pub use service::ShareService;
