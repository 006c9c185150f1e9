mod base;
mod tcp;

pub use base::{AcceptedConnection, WriteFailure};
pub use tcp::ReuseTcpServer;
