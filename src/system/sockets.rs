use crate::error::QueryError;
use crate::model::{ConnectionRecord, TcpState};

use log::debug;
use netstat2::{AddressFamilyFlags, ProtocolFlags, ProtocolSocketInfo, get_sockets_info};
use std::net::IpAddr;

pub fn fetch_connections() -> Result<Vec<ConnectionRecord>, QueryError> {
    let af_flags = AddressFamilyFlags::IPV4 | AddressFamilyFlags::IPV6;
    let proto_flags = ProtocolFlags::TCP;

    let sockets = get_sockets_info(af_flags, proto_flags)
        .map_err(|e| QueryError::SocketEnum(e.to_string()))?;

    let mut connections = Vec::new();
    for socket in sockets {
        if let ProtocolSocketInfo::Tcp(tcp) = &socket.protocol_socket_info {
            connections.extend(connection_records(
                tcp.local_addr,
                tcp.local_port,
                tcp_state(&tcp.state),
                &socket.associated_pids,
            ));
        }
    }

    debug!(
        "socket table has {} tcp entries, {} with a known owner",
        connections.len(),
        connections.iter().filter(|c| c.pid.is_some()).count()
    );
    Ok(connections)
}

/// One record per owning process, or a single unowned record.
fn connection_records(
    local_addr: IpAddr,
    local_port: u16,
    status: TcpState,
    pids: &[u32],
) -> Vec<ConnectionRecord> {
    let record = |pid| ConnectionRecord {
        pid,
        local_ip: local_addr.to_string(),
        local_port,
        status,
    };

    if pids.is_empty() {
        vec![record(None)]
    } else {
        pids.iter().map(|&pid| record(Some(pid))).collect()
    }
}

fn tcp_state(state: &netstat2::TcpState) -> TcpState {
    match state {
        netstat2::TcpState::Closed => TcpState::Closed,
        netstat2::TcpState::Listen => TcpState::Listen,
        netstat2::TcpState::SynSent => TcpState::SynSent,
        netstat2::TcpState::SynReceived => TcpState::SynReceived,
        netstat2::TcpState::Established => TcpState::Established,
        netstat2::TcpState::FinWait1 => TcpState::FinWait1,
        netstat2::TcpState::FinWait2 => TcpState::FinWait2,
        netstat2::TcpState::CloseWait => TcpState::CloseWait,
        netstat2::TcpState::Closing => TcpState::Closing,
        netstat2::TcpState::LastAck => TcpState::LastAck,
        netstat2::TcpState::TimeWait => TcpState::TimeWait,
        _ => TcpState::Unknown,
    }
}
