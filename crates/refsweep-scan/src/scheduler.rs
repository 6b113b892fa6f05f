//! Incremental scan scheduler.
//!
//! Drives the traversal engine over every tree and template in a project a
//! bounded batch at a time, so the host's scheduling thread stays
//! responsive regardless of project size. The host owns the timer or idle
//! callback and calls [`ScanScheduler::tick`] from it; the scheduler never
//! spawns threads or performs asynchronous work.

use indexmap::IndexMap;
use tracing::{debug, warn};

use refsweep_core::{AssetId, AssetPath, ProjectHost, ReferenceRecord, ScanConfig, TreeHandle};

use crate::engine::GraphScanner;
use crate::progress::ScanProgress;

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanState {
    /// Work remains; `progress` is the completed fraction in `0.0..=1.0`.
    Running { progress: f32 },
    /// All trees and templates have been scanned. Returned idempotently by
    /// every subsequent tick.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Trees,
    Templates,
    Done,
}

struct OpenTree {
    path: AssetPath,
    handle: Box<dyn TreeHandle>,
}

/// Stateful driver over a [`ProjectHost`]'s trees and templates.
///
/// Lifecycle: [`start`](Self::start), then [`tick`](Self::tick) until it
/// returns [`ScanState::Complete`]. [`abort`](Self::abort) unloads whatever
/// tree is currently open and returns to the idle state. Results stay
/// readable until the next `start`.
pub struct ScanScheduler<H: ProjectHost> {
    host: H,
    config: ScanConfig,
    scanner: GraphScanner,

    phase: Phase,
    tree_ids: Vec<AssetId>,
    template_ids: Vec<AssetId>,
    tree_index: usize,
    template_index: usize,
    root_index: usize,
    open_tree: Option<OpenTree>,

    scanned: u64,
    total_work: u64,
    dangling: u64,
    results: IndexMap<AssetPath, Vec<ReferenceRecord>>,
}

impl<H: ProjectHost> ScanScheduler<H> {
    /// Create a scheduler over `host`.
    pub fn new(host: H, config: ScanConfig) -> Self {
        let scanner = GraphScanner::new(&config);
        Self {
            host,
            config,
            scanner,
            phase: Phase::Idle,
            tree_ids: Vec::new(),
            template_ids: Vec::new(),
            tree_index: 0,
            template_index: 0,
            root_index: 0,
            open_tree: None,
            scanned: 0,
            total_work: 0,
            dangling: 0,
            results: IndexMap::new(),
        }
    }

    /// Enumerate the project's work and begin a new run, discarding any
    /// previous results. Root-object counts are unknown until each tree is
    /// opened, so `total_work` starts at the template count and grows as
    /// trees are loaded.
    pub fn start(&mut self) {
        self.close_open_tree();

        self.tree_ids = self.host.tree_ids();
        self.template_ids = self.host.template_ids();
        self.tree_index = 0;
        self.template_index = 0;
        self.root_index = 0;
        self.scanned = 0;
        self.total_work = self.template_ids.len() as u64;
        self.dangling = 0;
        self.results.clear();
        self.phase = Phase::Trees;

        debug!(
            trees = self.tree_ids.len(),
            templates = self.template_ids.len(),
            "scan started"
        );
    }

    /// Perform up to `batch_size` work units and report the run state.
    ///
    /// # Panics
    ///
    /// Panics if called while idle, i.e. before [`start`](Self::start) or
    /// after [`abort`](Self::abort) without a new `start`. That is a caller
    /// bug, not a data condition.
    pub fn tick(&mut self) -> ScanState {
        match self.phase {
            Phase::Idle => panic!("ScanScheduler::tick called while idle; call start() first"),
            Phase::Done => return ScanState::Complete,
            Phase::Trees | Phase::Templates => {}
        }

        let mut budget = self.config.batch_size;
        while budget > 0 {
            match self.phase {
                Phase::Trees => self.step_trees(&mut budget),
                Phase::Templates => self.step_templates(&mut budget),
                Phase::Done => break,
                Phase::Idle => unreachable!("idle phase inside a running tick"),
            }
        }

        match self.phase {
            Phase::Done => ScanState::Complete,
            _ => ScanState::Running {
                progress: self.progress().fraction(),
            },
        }
    }

    /// Stop the run, unloading whatever tree is currently open. A new
    /// [`start`](Self::start) is required before ticking again; results
    /// collected so far stay readable.
    pub fn abort(&mut self) {
        self.close_open_tree();
        self.phase = Phase::Idle;
        debug!(scanned = self.scanned, "scan aborted");
    }

    /// Read-only view of the aggregate, keyed by asset path in insertion
    /// order. Only assets that produced at least one record have an entry.
    pub fn results(&self) -> &IndexMap<AssetPath, Vec<ReferenceRecord>> {
        &self.results
    }

    /// Running count of dangling references and missing components found.
    pub fn dangling_count(&self) -> u64 {
        self.dangling
    }

    /// Snapshot of the current progress counters.
    pub fn progress(&self) -> ScanProgress {
        ScanProgress {
            scanned: self.scanned,
            total_work: self.total_work,
            dangling_found: self.dangling,
        }
    }

    /// Whether the last run finished.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Access the underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }

    fn step_trees(&mut self, budget: &mut usize) {
        if self.open_tree.is_none() && !self.open_next_tree(budget) {
            return;
        }

        let mut tree_exhausted = false;
        if let Some(open) = &self.open_tree {
            let roots = open.handle.root_objects();
            let mut batch = Vec::new();
            while *budget > 0 && self.root_index < roots.len() {
                batch.extend(self.scanner.scan(&roots[self.root_index]));
                self.root_index += 1;
                self.scanned += 1;
                *budget -= 1;
            }
            if !batch.is_empty() {
                self.dangling += batch.len() as u64;
                // A tree can have several contributing root objects; they
                // accumulate under the tree's path.
                self.results
                    .entry(open.path.clone())
                    .or_default()
                    .extend(batch);
            }
            tree_exhausted = self.root_index >= roots.len();
        }

        if tree_exhausted {
            self.close_open_tree();
            self.tree_index += 1;
        }
    }

    /// Open the next tree, skipping unloadable ones. Returns false when the
    /// tree phase is over or a skip consumed the step.
    fn open_next_tree(&mut self, budget: &mut usize) -> bool {
        if self.tree_index >= self.tree_ids.len() {
            self.phase = Phase::Templates;
            return false;
        }

        let id = self.tree_ids[self.tree_index].clone();
        let path = self.host.resolve_path(&id);
        match self.host.open_tree(&path) {
            Ok(handle) => {
                let root_count = handle.root_objects().len() as u64;
                self.total_work += root_count;
                self.root_index = 0;
                debug!(%path, roots = root_count, "opened tree");
                self.open_tree = Some(OpenTree { path, handle });
                true
            }
            Err(err) => {
                // One bad asset never aborts the scan. The skipped tree is
                // one work unit so completion still lands on
                // scanned == total_work.
                warn!(%path, error = %err, "skipping unloadable tree");
                self.total_work += 1;
                self.scanned += 1;
                self.tree_index += 1;
                *budget -= 1;
                false
            }
        }
    }

    fn step_templates(&mut self, budget: &mut usize) {
        if self.template_index >= self.template_ids.len() {
            self.phase = Phase::Done;
            debug!(
                scanned = self.scanned,
                dangling = self.dangling,
                "scan complete"
            );
            return;
        }

        let id = self.template_ids[self.template_index].clone();
        let path = self.host.resolve_path(&id);
        match self.host.load_template(&path) {
            Ok(root) => {
                // Transient object: scanned once, then dropped.
                let records = self.scanner.scan(&root);
                if !records.is_empty() {
                    self.dangling += records.len() as u64;
                    self.results.insert(path, records);
                }
            }
            Err(err) => {
                warn!(%path, error = %err, "skipping unloadable template");
            }
        }

        self.template_index += 1;
        self.scanned += 1;
        *budget -= 1;
    }

    fn close_open_tree(&mut self) {
        if let Some(open) = self.open_tree.take() {
            debug!(path = %open.path, "closing tree");
            self.host.close_tree(open.handle);
        }
    }
}
