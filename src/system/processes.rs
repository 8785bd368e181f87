use crate::error::QueryError;
use crate::model::{ProcessEntry, Unavailable};

use log::debug;
use std::ffi::{OsStr, OsString};
use sysinfo::{ProcessRefreshKind, ProcessStatus, RefreshKind, System, UpdateKind};

/// Length at which Linux truncates a process name.
const COMM_LEN: usize = 15;

pub fn fetch_processes() -> Result<Vec<ProcessEntry>, QueryError> {
    let system = System::new_with_specifics(
        RefreshKind::nothing()
            .with_processes(ProcessRefreshKind::nothing().with_cmd(UpdateKind::OnlyIfNotSet)),
    );

    let mut entries: Vec<ProcessEntry> = system
        .processes()
        .iter()
        // Linux lists threads alongside processes.
        .filter(|(_, process)| process.thread_kind().is_none())
        .map(|(pid, process)| {
            process_entry(pid.as_u32(), process.name(), process.cmd(), process.status())
        })
        .collect();
    entries.sort_unstable_by_key(|entry| match entry {
        ProcessEntry::Live(record) => record.pid,
        ProcessEntry::Unavailable { pid, .. } => *pid,
    });

    debug!("process table has {} entries", entries.len());
    Ok(entries)
}

fn process_entry(pid: u32, name: &OsStr, cmd: &[OsString], status: ProcessStatus) -> ProcessEntry {
    match status {
        ProcessStatus::Zombie => ProcessEntry::Unavailable {
            pid,
            reason: Unavailable::Zombie,
        },
        ProcessStatus::Dead => ProcessEntry::Unavailable {
            pid,
            reason: Unavailable::Exited,
        },
        _ => ProcessEntry::live(pid, untruncated_name(&name.to_string_lossy(), cmd)),
    }
}

/// Recovers a name cut to [`COMM_LEN`] bytes from the first command argument.
///
/// Processes that rewrite their title put the whole command line into one
/// space-separated argument; only its first word is the program.
fn untruncated_name(name: &str, cmd: &[OsString]) -> String {
    if name.len() < COMM_LEN {
        return name.to_string();
    }
    let Some(arg0) = cmd.first().map(|arg| arg.to_string_lossy()) else {
        return name.to_string();
    };
    let arg0 = if cmd.len() == 1 {
        arg0.split(' ').next().unwrap_or_default()
    } else {
        &*arg0
    };

    let base = arg0.rsplit('/').next().unwrap_or_default();
    if base.starts_with(name) {
        base.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn short_names_are_kept() {
        assert_eq!(untruncated_name("wav_process.py", &args(&["python3", "wav_process.py"])), "wav_process.py");
        assert_eq!(untruncated_name("echo_server", &[]), "echo_server");
    }

    #[test]
    fn truncated_name_is_completed_from_the_first_argument() {
        let cmd = args(&["/usr/sbin/long_daemon_name", "--foreground"]);
        assert_eq!(untruncated_name("long_daemon_nam", &cmd), "long_daemon_name");
    }

    #[test]
    fn retitled_command_line_is_split_on_spaces() {
        let cmd = args(&["/usr/sbin/long_daemon_name --foreground"]);
        assert_eq!(untruncated_name("long_daemon_nam", &cmd), "long_daemon_name");
    }

    #[test]
    fn unrelated_first_argument_keeps_the_truncated_name() {
        let cmd = args(&["/usr/bin/python3", "x"]);
        assert_eq!(untruncated_name("python3.12-conf", &cmd), "python3.12-conf");
        assert_eq!(untruncated_name("kworker/0:0-eve", &[]), "kworker/0:0-eve");
    }

    #[test]
    fn zombie_and_dead_processes_are_unavailable() {
        let name = OsStr::new("wav_process.py");

        assert_eq!(
            process_entry(12, name, &[], ProcessStatus::Zombie),
            ProcessEntry::Unavailable {
                pid: 12,
                reason: Unavailable::Zombie,
            }
        );
        assert_eq!(
            process_entry(13, name, &[], ProcessStatus::Dead),
            ProcessEntry::Unavailable {
                pid: 13,
                reason: Unavailable::Exited,
            }
        );
        assert_eq!(
            process_entry(14, name, &[], ProcessStatus::Sleep),
            ProcessEntry::live(14, "wav_process.py")
        );
    }

    #[test]
    fn current_process_is_listed_as_live() {
        let own = std::process::id();
        let entries = fetch_processes().unwrap();

        assert!(
            entries
                .iter()
                .any(|entry| matches!(entry, ProcessEntry::Live(record) if record.pid == own))
        );
    }
}
