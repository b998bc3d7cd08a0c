use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::{info, warn};

use super::process::{ProcessRecord, ProcessTree, build_tree};

/// Everything the viewer needs from one capture: the aggregated tree plus
/// the system memory headline for the header.
pub struct SystemSnapshot {
    pub memory_total: u64,
    pub memory_used: u64,
    pub tree: ProcessTree,
}

/// Source of raw per-process facts. The OS-backed implementation lives in
/// [`Collector`]; tests inject an in-memory one.
pub trait ProcessSource {
    /// One unordered snapshot of the live processes. Items whose retrieval
    /// fails mid-enumeration are omitted, never returned partially filled.
    fn processes(&mut self) -> Vec<ProcessRecord>;

    fn memory_total(&self) -> u64 {
        0
    }

    fn memory_used(&self) -> u64 {
        0
    }
}

/// Capture a snapshot from `source` and build the aggregated tree.
///
/// The only fatal condition in the program: a source that cannot enumerate
/// a single process.
pub fn capture(source: &mut dyn ProcessSource) -> Result<SystemSnapshot> {
    let records = source.processes();
    if records.is_empty() {
        return Err(eyre!(
            "process source returned no processes; cannot enumerate this system"
        ));
    }
    info!(count = records.len(), "captured process snapshot");
    let tree = build_tree(records);
    Ok(SystemSnapshot {
        memory_total: source.memory_total(),
        memory_used: source.memory_used(),
        tree,
    })
}

/// sysinfo-backed process source.
pub struct Collector {
    sys: System,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        Collector { sys: System::new() }
    }
}

impl ProcessSource for Collector {
    fn processes(&mut self) -> Vec<ProcessRecord> {
        self.sys.refresh_memory();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_memory()
                .with_cmd(UpdateKind::Always)
                .with_user(UpdateKind::Always),
        );

        let mut records = Vec::with_capacity(self.sys.processes().len());
        for (pid, process) in self.sys.processes() {
            let pid_u32 = pid.as_u32();
            let name = process.name().to_string_lossy().to_string();
            if name.is_empty() {
                // A process that vanished mid-enumeration leaves a husk with
                // no readable fields. Drop it rather than insert partial data.
                warn!(pid = pid_u32, "dropping process with unreadable fields");
                continue;
            }
            let command = process
                .cmd()
                .iter()
                .map(|s| s.to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join(" ");
            let user = process
                .user_id()
                .map(|uid| format!("{uid:?}"))
                .unwrap_or_default();

            records.push(ProcessRecord {
                pid: pid_u32,
                ppid: process.parent().map(|p| p.as_u32()).unwrap_or(0),
                name,
                memory_bytes: process.memory(),
                user,
                command,
            });
        }
        records
    }

    fn memory_total(&self) -> u64 {
        self.sys.total_memory()
    }

    fn memory_used(&self) -> u64 {
        self.sys.used_memory()
    }
}
