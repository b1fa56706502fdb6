//! Runtime - Main entry point

use sprig_core::{Config, Deadline, Element, Reconciler, WorkOutcome};
use sprig_dom::{Document, NodeId};

use crate::{IdleLoop, RuntimeError, RuntimeResult};

/// One document plus the reconciler that keeps it in sync
pub struct Runtime {
    config: Config,
    document: Document,
    reconciler: Reconciler<Document>,
}

impl Runtime {
    /// Create a runtime with an empty document
    pub fn new(config: Config) -> Self {
        tracing::info!("sprig {} initialized", crate::VERSION);
        Self {
            reconciler: Reconciler::new(config.clone()),
            document: Document::new(),
            config,
        }
    }

    /// Render `element` into the document body
    pub fn render(&mut self, element: Element) {
        let body = self.document.body();
        self.render_into(element, body);
    }

    /// Render `element` into an arbitrary container node
    pub fn render_into(&mut self, element: Element, container: NodeId) {
        self.reconciler.render(element, container);
    }

    /// Idle callback: walk until `deadline` asks to yield
    pub fn on_idle(&mut self, deadline: &dyn Deadline) -> RuntimeResult<WorkOutcome> {
        Ok(self.reconciler.work_loop(&mut self.document, deadline)?)
    }

    /// Walk exactly one fiber
    pub fn step(&mut self) -> RuntimeResult<WorkOutcome> {
        Ok(self.reconciler.step(&mut self.document)?)
    }

    /// Tick the idle loop until nothing is pending, returning the tick count
    pub fn run_until_idle(&mut self) -> RuntimeResult<usize> {
        let mut idle = IdleLoop::new(&self.config);
        for tick in 0..self.config.max_idle_ticks {
            if !self.has_pending_work() {
                return Ok(tick);
            }
            idle.tick(self)?;
        }
        if self.has_pending_work() {
            tracing::warn!(ticks = self.config.max_idle_ticks, "runtime did not settle");
            return Err(RuntimeError::Stalled {
                ticks: self.config.max_idle_ticks,
            });
        }
        Ok(self.config.max_idle_ticks)
    }

    /// Pending render or raised state update
    pub fn has_pending_work(&self) -> bool {
        self.reconciler.has_pending_work()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn reconciler(&self) -> &Reconciler<Document> {
        &self.reconciler
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
