//! Errors raised while reading the OS process and connection tables.

/// Failures of the OS table providers.
///
/// A process disappearing mid-enumeration is not an error; providers report
/// it as [`crate::model::ProcessEntry::Unavailable`].
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Failed to enumerate system sockets.
    #[error("Failed to enumerate sockets: {0}")]
    SocketEnum(String),
}
