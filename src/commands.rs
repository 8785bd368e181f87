use crate::error::QueryError;
use crate::model::{ConnectionRecord, ProcessEntry, ProcessRecord, TcpState};

use log::{debug, trace};
use std::collections::HashSet;

use crate::system;

/// Source of process snapshots.
pub trait ProcessSource {
    fn processes(&self) -> Result<Vec<ProcessEntry>, QueryError>;
}

/// Source of TCP connection table snapshots.
pub trait ConnectionSource {
    fn connections(&self) -> Result<Vec<ConnectionRecord>, QueryError>;
}

/// The live tables of the host operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTables;

impl ProcessSource for SystemTables {
    fn processes(&self) -> Result<Vec<ProcessEntry>, QueryError> {
        system::fetch_processes()
    }
}

impl ConnectionSource for SystemTables {
    fn connections(&self) -> Result<Vec<ConnectionRecord>, QueryError> {
        system::fetch_connections()
    }
}

/// Live processes in `entries` named exactly `name`.
///
/// Entries that exited or turned into zombies since the snapshot are skipped.
fn matching<'a>(entries: &'a [ProcessEntry], name: &'a str) -> impl Iterator<Item = &'a ProcessRecord> {
    entries.iter().filter_map(move |entry| match entry {
        ProcessEntry::Live(record) if record.name == name => Some(record),
        ProcessEntry::Live(_) => None,
        ProcessEntry::Unavailable { pid, reason } => {
            debug!("skipping pid {pid}: {reason:?}");
            None
        }
    })
}

/// Returns whether at least one live process is named exactly `name`.
pub fn is_proc_running(processes: &impl ProcessSource, name: &str) -> Result<bool, QueryError> {
    let entries = processes.processes()?;
    Ok(matching(&entries, name).next().is_some())
}

/// Returns the local ports on which processes named `name` listen at `addr`.
///
/// The connection table is only read when such a process exists. `addr` is
/// compared verbatim with the socket's local IP, so `127.0.0.1` does not
/// match `::ffff:127.0.0.1`. Ports keep the table's order.
pub fn proc_port(
    processes: &impl ProcessSource,
    connections: &impl ConnectionSource,
    name: &str,
    addr: &str,
) -> Result<Vec<u16>, QueryError> {
    let entries = processes.processes()?;
    let pids: HashSet<u32> = matching(&entries, name).map(|p| p.pid).collect();
    if pids.is_empty() {
        debug!("no process named {name:?}");
        return Ok(Vec::new());
    }
    trace!("{name:?} is running as {pids:?}");

    let ports = connections
        .connections()?
        .into_iter()
        .filter(|c| c.status == TcpState::Listen)
        .filter(|c| c.pid.is_some_and(|pid| pids.contains(&pid)))
        .filter(|c| c.local_ip == addr)
        .inspect(|c| trace!("{}:{} {} owned by {:?}", c.local_ip, c.local_port, c.status, c.pid))
        .map(|c| c.local_port)
        .collect();

    Ok(ports)
}
