use std::collections::HashMap;

use tracing::debug;

/// Reserved pid of the synthetic root node.
pub const ROOT_PID: u32 = 0;

/// One raw fact from the process source. A record whose retrieval partially
/// failed is omitted by the source and never reaches the builder.
#[derive(Clone, Debug)]
pub struct ProcessRecord {
    pub pid: u32,
    pub ppid: u32,
    pub name: String,
    pub memory_bytes: u64,
    pub user: String,
    pub command: String,
}

/// One process in the snapshot, or the synthetic root.
///
/// `children` and `parent` hold pids into the owning [`ProcessTree`] arena,
/// never references, so the acyclic invariant holds by construction.
#[derive(Clone, Debug)]
pub struct ProcessNode {
    pub pid: u32,
    pub name: String,
    pub command: String,
    pub user: String,
    pub self_memory: u64,
    /// Derived: `self_memory` plus the totals of all descendants. Written
    /// only by [`ProcessTree::aggregate_memory`].
    pub total_memory: u64,
    pub children: Vec<u32>,
    pub parent: Option<u32>,
}

impl ProcessNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Owned arena of nodes keyed by pid, rooted at [`ROOT_PID`].
#[derive(Clone, Debug)]
pub struct ProcessTree {
    pub nodes: HashMap<u32, ProcessNode>,
}

/// Build the tree from one snapshot of raw facts.
///
/// First pass inserts every record into the arena (a later record for the
/// same pid replaces the earlier one, so the result is deterministic in
/// input order). Second pass links each node under its parent; a ppid that
/// is 0, unknown, or the node's own pid reattaches the node under the
/// synthetic root. Nothing here is fatal.
pub fn build_tree(records: Vec<ProcessRecord>) -> ProcessTree {
    let mut nodes: HashMap<u32, ProcessNode> = HashMap::with_capacity(records.len() + 1);
    let mut ppids: HashMap<u32, u32> = HashMap::with_capacity(records.len());

    nodes.insert(ROOT_PID, synthetic_root());

    for record in records {
        if record.pid == ROOT_PID {
            debug!(pid = record.pid, "ignoring record claiming the root pid");
            continue;
        }
        let command = if record.command.is_empty() {
            record.name.clone()
        } else {
            record.command
        };
        ppids.insert(record.pid, record.ppid);
        nodes.insert(
            record.pid,
            ProcessNode {
                pid: record.pid,
                name: record.name,
                command,
                user: record.user,
                self_memory: record.memory_bytes,
                total_memory: record.memory_bytes,
                children: Vec::new(),
                parent: None,
            },
        );
    }

    let mut pids: Vec<u32> = nodes.keys().copied().filter(|&p| p != ROOT_PID).collect();
    pids.sort_unstable();

    for pid in pids {
        let ppid = ppids.get(&pid).copied().unwrap_or(ROOT_PID);
        // Self-parenting in raw data is never trusted.
        let parent = if ppid != pid && nodes.contains_key(&ppid) {
            ppid
        } else {
            if ppid != ROOT_PID {
                debug!(pid, ppid, "parent not in snapshot, reattaching under root");
            }
            ROOT_PID
        };
        if let Some(node) = nodes.get_mut(&pid) {
            node.parent = Some(parent);
        }
        if let Some(parent_node) = nodes.get_mut(&parent) {
            parent_node.children.push(pid);
        }
    }

    let mut tree = ProcessTree { nodes };
    tree.aggregate_memory();
    tree
}

fn synthetic_root() -> ProcessNode {
    ProcessNode {
        pid: ROOT_PID,
        name: "System".to_string(),
        command: "System".to_string(),
        user: "root".to_string(),
        self_memory: 0,
        total_memory: 0,
        children: Vec::new(),
        parent: None,
    }
}

impl ProcessTree {
    pub fn get(&self, pid: u32) -> Option<&ProcessNode> {
        self.nodes.get(&pid)
    }

    pub fn root(&self) -> &ProcessNode {
        &self.nodes[&ROOT_PID]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Recompute `total_memory` for every node, children before parents.
    ///
    /// Iterative post-order with an explicit work stack so a pathologically
    /// deep tree cannot overflow the call stack. Idempotent: only
    /// `self_memory` and `children` are read.
    pub fn aggregate_memory(&mut self) {
        let mut order: Vec<u32> = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![ROOT_PID];
        while let Some(pid) = stack.pop() {
            order.push(pid);
            if let Some(node) = self.nodes.get(&pid) {
                stack.extend(node.children.iter().copied());
            }
        }

        // Reverse pre-order visits every child before its parent.
        for &pid in order.iter().rev() {
            let children_sum: u64 = self.nodes[&pid]
                .children
                .iter()
                .map(|child| self.nodes.get(child).map_or(0, |c| c.total_memory))
                .sum();
            if let Some(node) = self.nodes.get_mut(&pid) {
                node.total_memory = node.self_memory + children_sum;
            }
        }
    }

    /// Children of `pid` ordered for display: total memory descending, ties
    /// broken by ascending pid so the ordering is deterministic.
    pub fn sorted_children(&self, pid: u32) -> Vec<u32> {
        let Some(node) = self.nodes.get(&pid) else {
            return Vec::new();
        };
        let mut pids: Vec<u32> = node
            .children
            .iter()
            .copied()
            .filter(|c| self.nodes.contains_key(c))
            .collect();
        pids.sort_by(|a, b| {
            let ta = self.nodes[a].total_memory;
            let tb = self.nodes[b].total_memory;
            tb.cmp(&ta).then_with(|| a.cmp(b))
        });
        pids
    }
}
