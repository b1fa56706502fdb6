//! Work Scheduler
//!
//! Owns one render root: the pending and committed fiber trees, the deletion
//! queue and the update signal shared with hook setters. The host drives it
//! by calling `work_loop` from its idle callback; the only suspension state
//! between calls is `next_unit`.

use std::fmt;
use std::rc::Rc;

use crate::commit::{self, CommitSummary};
use crate::config::Config;
use crate::deadline::{CountdownDeadline, Deadline, Unbounded};
use crate::element::{Element, Props};
use crate::error::RenderResult;
use crate::fiber::{EffectTag, Fiber, FiberArena, FiberId, FiberKind};
use crate::hooks::{Hook, HookContext, UpdateSignal};
use crate::host::RenderTarget;
use crate::reconcile::reconcile_children;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pending root
    Idle,
    /// Pending root being walked one fiber per slot
    Walking,
    /// Applying effects; never observed across calls
    Committing,
}

/// Result of one idle callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOutcome {
    /// Nothing to do
    Idle,
    /// Deadline hit with fibers left to walk
    Yielded { walked: usize },
    /// Walk finished and the tree was committed
    Committed { walked: usize, summary: CommitSummary },
}

/// Reconciler for one render root
pub struct Reconciler<T: RenderTarget> {
    config: Config,
    fibers: FiberArena<T::Node>,
    pending_root: Option<FiberId>,
    committed_root: Option<FiberId>,
    next_unit: Option<FiberId>,
    deletions: Vec<FiberId>,
    signal: UpdateSignal,
    phase: Phase,
    pass: u64,
}

impl<T: RenderTarget> Reconciler<T> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            fibers: FiberArena::new(),
            pending_root: None,
            committed_root: None,
            next_unit: None,
            deletions: Vec::new(),
            signal: UpdateSignal::new(),
            phase: Phase::Idle,
            pass: 0,
        }
    }

    /// Start a new pass rendering `element` into `container`
    ///
    /// Replaces any pending root; its unfinished walk is dropped.
    pub fn render(&mut self, element: Element, container: T::Node) {
        tracing::info!(?container, "render requested");
        self.begin_pass(Rc::new(Props::from_children(vec![element])), container);
    }

    fn begin_pass(&mut self, props: Rc<Props>, container: T::Node) {
        if self.next_unit.is_some() {
            tracing::debug!(pass = self.pass, "discarding unfinished walk");
        }
        self.pass += 1;
        let mut root = Fiber::new(FiberKind::Root, props, self.pass);
        root.node = Some(container);
        root.previous = self.committed_root;
        let id = self.fibers.alloc(root);

        self.pending_root = Some(id);
        self.next_unit = Some(id);
        self.deletions.clear();
        self.phase = Phase::Walking;
    }

    /// Turn raised state updates into a fresh pending root
    ///
    /// Before the first commit there is no tree holding the updated hook
    /// cells, so the signal stays raised until the first walk commits.
    fn absorb_updates(&mut self) -> RenderResult<()> {
        if !self.signal.is_raised() {
            return Ok(());
        }
        let Some(source) = self.committed_root else {
            if self.pending_root.is_none() {
                let requests = self.signal.take();
                tracing::debug!(requests, "state update with nothing rendered yet");
            }
            return Ok(());
        };
        let requests = self.signal.take();
        let fiber = self.fibers.fiber(source)?;
        let props = fiber.props.clone();
        let Some(container) = fiber.node.clone() else {
            tracing::warn!(?source, "root fiber has no container");
            return Ok(());
        };
        tracing::debug!(requests, "state update, restarting from last committed root");
        self.begin_pass(props, container);
        Ok(())
    }

    /// Run one idle callback: walk fibers until the deadline asks to yield,
    /// committing if the walk completes
    pub fn work_loop(&mut self, target: &mut T, deadline: &dyn Deadline) -> RenderResult<WorkOutcome> {
        self.absorb_updates()?;

        let mut walked = 0;
        while let Some(unit) = self.next_unit {
            self.next_unit = self.perform_unit_of_work(target, unit)?;
            walked += 1;
            self.absorb_updates()?;
            if deadline.time_remaining() < self.config.yield_threshold {
                break;
            }
        }

        if self.next_unit.is_some() {
            tracing::debug!(walked, "yielding to host");
            return Ok(WorkOutcome::Yielded { walked });
        }
        if self.pending_root.is_some() {
            let summary = self.commit_root(target)?;
            return Ok(WorkOutcome::Committed { walked, summary });
        }
        Ok(WorkOutcome::Idle)
    }

    /// Walk a single fiber (committing if it was the last one)
    pub fn step(&mut self, target: &mut T) -> RenderResult<WorkOutcome> {
        self.work_loop(target, &CountdownDeadline::slots(1))
    }

    /// Walk and commit without yielding
    pub fn flush(&mut self, target: &mut T) -> RenderResult<WorkOutcome> {
        self.work_loop(target, &Unbounded)
    }

    fn perform_unit_of_work(&mut self, target: &mut T, id: FiberId) -> RenderResult<Option<FiberId>> {
        let fiber = self.fibers.fiber(id)?;
        let kind = fiber.kind.clone();
        let props = fiber.props.clone();
        let previous = fiber.previous;
        let has_node = fiber.node.is_some();
        tracing::trace!(?id, ?kind, "performing unit of work");

        match &kind {
            FiberKind::Component(component) => {
                let previous_hooks: Vec<Hook> = previous
                    .and_then(|prev| self.fibers.get(prev))
                    .map(|prev| prev.hooks.clone())
                    .unwrap_or_default();
                let mut cx = HookContext::new(&previous_hooks, &self.signal);
                let child = component.render(&mut cx, &props);
                let hooks = cx.into_hooks();
                self.fibers.fiber_mut(id)?.hooks = hooks;
                reconcile_children(
                    &mut self.fibers,
                    &mut self.deletions,
                    id,
                    std::slice::from_ref(&child),
                    self.pass,
                )?;
            }
            FiberKind::Root | FiberKind::Host(_) | FiberKind::Text => {
                if !has_node {
                    let node = commit::create_node(target, &kind, &props)?;
                    self.fibers.fiber_mut(id)?.node = node;
                }
                reconcile_children(
                    &mut self.fibers,
                    &mut self.deletions,
                    id,
                    props.children(),
                    self.pass,
                )?;
            }
        }

        self.next_fiber(id)
    }

    /// Pre-order successor: first child, else the nearest next sibling
    /// walking up through ancestors
    fn next_fiber(&self, id: FiberId) -> RenderResult<Option<FiberId>> {
        if let Some(child) = self.fibers.fiber(id)?.child {
            return Ok(Some(child));
        }
        let mut current = Some(id);
        while let Some(fiber_id) = current {
            let fiber = self.fibers.fiber(fiber_id)?;
            if let Some(sibling) = fiber.sibling {
                return Ok(Some(sibling));
            }
            current = fiber.parent;
        }
        Ok(None)
    }

    fn commit_root(&mut self, target: &mut T) -> RenderResult<CommitSummary> {
        let Some(root) = self.pending_root else {
            return Ok(CommitSummary::default());
        };
        self.phase = Phase::Committing;

        let result = self.apply_effects(target, root);

        let deletions = std::mem::take(&mut self.deletions);
        self.pending_root = None;
        self.next_unit = None;
        self.phase = Phase::Idle;

        let mut summary = result?;
        summary.deleted = deletions.len();
        self.committed_root = Some(root);
        let reclaimed = self.fibers.retain_pass(self.pass);
        tracing::debug!(
            pass = self.pass,
            added = summary.added,
            updated = summary.updated,
            deleted = summary.deleted,
            reclaimed,
            "committed"
        );
        Ok(summary)
    }

    fn apply_effects(&self, target: &mut T, root: FiberId) -> RenderResult<CommitSummary> {
        for &id in &self.deletions {
            commit::commit_deletion(&self.fibers, target, id)?;
        }
        commit::commit_tree(&self.fibers, target, root)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_pending_work(&self) -> bool {
        self.pending_root.is_some() || self.signal.is_raised()
    }

    pub fn pending_root(&self) -> Option<FiberId> {
        self.pending_root
    }

    pub fn committed_root(&self) -> Option<FiberId> {
        self.committed_root
    }

    pub fn fiber(&self, id: FiberId) -> Option<&Fiber<T::Node>> {
        self.fibers.get(id)
    }

    pub fn fibers(&self) -> &FiberArena<T::Node> {
        &self.fibers
    }

    /// Effect a fiber will have at commit, including queued deletions
    pub fn effect_of(&self, id: FiberId) -> Option<EffectTag> {
        if self.deletions.contains(&id) {
            return Some(EffectTag::Delete);
        }
        self.fibers.get(id).and_then(|f| f.effect)
    }

    /// Fibers queued for deletion in the pending pass
    pub fn pending_deletions(&self) -> &[FiberId] {
        &self.deletions
    }

    /// Signal shared with state setters; raising it schedules a re-render
    pub fn update_signal(&self) -> &UpdateSignal {
        &self.signal
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<T: RenderTarget> Default for Reconciler<T> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<T: RenderTarget> fmt::Debug for Reconciler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("phase", &self.phase)
            .field("pass", &self.pass)
            .field("pending_root", &self.pending_root)
            .field("committed_root", &self.committed_root)
            .field("next_unit", &self.next_unit)
            .field("deletions", &self.deletions.len())
            .field("fibers", &self.fibers.len())
            .finish()
    }
}
