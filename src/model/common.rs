use std::fmt;

/// A live process as reported by the OS process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
}

/// Why a process listed in the snapshot could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// The process has exited but is still listed.
    Exited,
    Zombie,
}

/// One row of a process snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEntry {
    Live(ProcessRecord),
    Unavailable { pid: u32, reason: Unavailable },
}

impl ProcessEntry {
    pub fn live(pid: u32, name: impl Into<String>) -> Self {
        ProcessEntry::Live(ProcessRecord {
            pid,
            name: name.into(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcpState {
    Closed,
    Listen,
    SynSent,
    SynReceived,
    Established,
    FinWait1,
    FinWait2,
    CloseWait,
    Closing,
    LastAck,
    TimeWait,
    Unknown,
}

impl fmt::Display for TcpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TcpState::Closed => "CLOSED",
            TcpState::Listen => "LISTEN",
            TcpState::SynSent => "SYN_SENT",
            TcpState::SynReceived => "SYN_RECV",
            TcpState::Established => "ESTABLISHED",
            TcpState::FinWait1 => "FIN_WAIT1",
            TcpState::FinWait2 => "FIN_WAIT2",
            TcpState::CloseWait => "CLOSE_WAIT",
            TcpState::Closing => "CLOSING",
            TcpState::LastAck => "LAST_ACK",
            TcpState::TimeWait => "TIME_WAIT",
            TcpState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// A socket from the OS connection table.
///
/// `pid` is `None` when the owning process could not be determined.
/// `local_ip` holds the canonical text form of the address and is compared
/// verbatim against the requested bind address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub pid: Option<u32>,
    pub local_ip: String,
    pub local_port: u16,
    pub status: TcpState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_print_in_netstat_form() {
        assert_eq!(TcpState::Listen.to_string(), "LISTEN");
        assert_eq!(TcpState::SynReceived.to_string(), "SYN_RECV");
        assert_eq!(TcpState::Unknown.to_string(), "UNKNOWN");
    }
}
