//! Administrative command surface.
//!
//! Every role answers the same set of named operations ([`AdminOp`]). Which of
//! them a role actually implements is declared up front as [`Capabilities`];
//! [`AdminDispatcher`] refuses everything outside that set with
//! [`AdminError::Unsupported`] before the handler is ever called.
mod capability;
pub use capability::Capabilities;

mod dispatcher;
pub use dispatcher::AdminDispatcher;

mod error;
pub use error::AdminError;

mod handler;
pub use handler::AdminHandler;

mod op;
pub use op::{AdminOp, AdminRequest};
