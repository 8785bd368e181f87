//! The host's process and TCP socket tables.
//!
//! Processes come from [`sysinfo`], sockets and their owning pids from
//! [`netstat2`].

mod processes;
mod sockets;

pub use processes::fetch_processes;
pub use sockets::fetch_connections;
