pub mod common;
pub use common::{ConnectionRecord, ProcessEntry, ProcessRecord, TcpState, Unavailable};
