use tracing::info;

use crate::system::process::{ProcessTree, ROOT_PID};

/// Drill-down cursor over the process tree. Holds the pid of the node whose
/// children are currently on screen; starts at the synthetic root.
#[derive(Debug, Clone, Copy)]
pub struct Navigator {
    current: u32,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Navigator { current: ROOT_PID }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn at_root(&self) -> bool {
        self.current == ROOT_PID
    }

    /// Enter `target` if it is a child of the current node and has children
    /// of its own. A leaf has nothing to drill into, so the transition is a
    /// no-op rather than an error. Returns whether the view changed.
    pub fn descend(&mut self, tree: &ProcessTree, target: u32) -> bool {
        let Some(current) = tree.get(self.current) else {
            return false;
        };
        if !current.children.contains(&target) {
            return false;
        }
        match tree.get(target) {
            Some(node) if node.has_children() => {
                self.current = target;
                info!(pid = target, name = %node.name, "descended");
                true
            }
            _ => false,
        }
    }

    /// Move back to the parent. No-op at the root. Returns whether the view
    /// changed.
    pub fn ascend(&mut self, tree: &ProcessTree) -> bool {
        match tree.get(self.current).and_then(|n| n.parent) {
            Some(parent) => {
                self.current = parent;
                info!(pid = parent, "ascended");
                true
            }
            None => false,
        }
    }

    /// After a re-snapshot the current pid may be gone; fall back to root so
    /// navigation always resumes from a node that exists.
    pub fn revalidate(&mut self, tree: &ProcessTree) {
        if tree.get(self.current).is_none() {
            info!(pid = self.current, "current node gone after refresh, back to root");
            self.current = ROOT_PID;
        }
    }

    /// The ordered sibling group to display: children of the current node,
    /// total memory descending, ties by ascending pid.
    pub fn visible_rows(&self, tree: &ProcessTree) -> Vec<u32> {
        tree.sorted_children(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::process::{ProcessRecord, build_tree};

    fn tree_fixture() -> ProcessTree {
        let record = |pid: u32, ppid: u32, mem: u64| ProcessRecord {
            pid,
            ppid,
            name: format!("proc{pid}"),
            memory_bytes: mem,
            user: "tester".to_string(),
            command: String::new(),
        };
        build_tree(vec![
            record(1, 0, 100),
            record(2, 1, 50),
            record(3, 1, 0),
            record(4, 2, 25),
        ])
    }

    #[test]
    fn starts_at_root() {
        let nav = Navigator::new();
        assert!(nav.at_root());
    }

    #[test]
    fn descend_into_child_with_children() {
        let tree = tree_fixture();
        let mut nav = Navigator::new();

        assert!(nav.descend(&tree, 1));
        assert_eq!(nav.current(), 1);
        assert!(nav.descend(&tree, 2));
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn descend_into_leaf_is_noop() {
        let tree = tree_fixture();
        let mut nav = Navigator::new();
        nav.descend(&tree, 1);

        // pid 3 is a leaf under pid 1.
        assert!(!nav.descend(&tree, 3));
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn descend_into_non_child_is_noop() {
        let tree = tree_fixture();
        let mut nav = Navigator::new();

        // pid 2 has children but is not a child of root.
        assert!(!nav.descend(&tree, 2));
        assert!(nav.at_root());
    }

    #[test]
    fn ascend_walks_back_to_root_then_noops() {
        let tree = tree_fixture();
        let mut nav = Navigator::new();
        nav.descend(&tree, 1);
        nav.descend(&tree, 2);

        assert!(nav.ascend(&tree));
        assert_eq!(nav.current(), 1);
        assert!(nav.ascend(&tree));
        assert!(nav.at_root());
        assert!(!nav.ascend(&tree));
        assert!(nav.at_root());
    }

    #[test]
    fn revalidate_falls_back_to_root_when_node_vanishes() {
        let tree = tree_fixture();
        let mut nav = Navigator::new();
        nav.descend(&tree, 1);

        let rebuilt = build_tree(vec![ProcessRecord {
            pid: 9,
            ppid: 0,
            name: "survivor".to_string(),
            memory_bytes: 1,
            user: String::new(),
            command: String::new(),
        }]);
        nav.revalidate(&rebuilt);
        assert!(nav.at_root());
    }

    #[test]
    fn visible_rows_sorted_by_total_descending() {
        let tree = tree_fixture();
        let mut nav = Navigator::new();
        nav.descend(&tree, 1);

        // pid 2 totals 75 (50 + child 25), pid 3 totals 0.
        assert_eq!(nav.visible_rows(&tree), vec![2, 3]);
    }
}
