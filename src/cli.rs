use clap::Parser;
use std::ffi::OsString;

pub const DEFAULT_NAME: &str = "wav_process.py";
pub const DEFAULT_ADDR: &str = "127.0.10.10";

/// Check whether a process is running, or list the ports it listens on.
#[derive(Parser, Debug)]
#[command(name = "proc_query", version, about)]
pub struct Cli {
    /// "running" or "port"
    #[arg(long = "type", value_name = "TYPE", default_value = "running")]
    pub lookup: String,

    /// Address expected to be bound to
    #[arg(long, value_name = "IP_STRING", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Name of the process to search on
    #[arg(default_value = DEFAULT_NAME)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    Port,
}

impl Cli {
    /// Anything other than `port` is a running check.
    pub fn mode(&self) -> Mode {
        match self.lookup.as_str() {
            "port" => Mode::Port,
            _ => Mode::Running,
        }
    }
}

const LONG_FLAGS: [&str; 2] = ["type", "addr"];

/// Rewrites single-dash long options into their `--` form.
///
/// Accepts `-type`, `-addr`, `-type=port` and any non-empty prefix such as
/// `-t` or `-ad`. Arguments after a bare `--` are left alone.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut out: Vec<OsString> = args.next().into_iter().collect();
    let mut positional_only = false;

    for arg in args {
        if positional_only || arg == "--" {
            positional_only = true;
            out.push(arg);
            continue;
        }
        out.push(expand_flag(&arg).unwrap_or(arg));
    }

    out
}

fn expand_flag(arg: &OsString) -> Option<OsString> {
    let body = arg.to_str()?.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }

    let (key, value) = match body.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (body, None),
    };
    if key.is_empty() {
        return None;
    }
    let flag = LONG_FLAGS.iter().find(|flag| flag.starts_with(key))?;

    let expanded = match value {
        Some(value) => format!("--{flag}={value}"),
        None => format!("--{flag}"),
    };
    Some(expanded.into())
}
