//! sprig core - fiber reconciler
//!
//! Turns element trees into render target mutations. A render pass walks a
//! new fiber tree one fiber at a time, diffing each fiber's children against
//! the last committed pass, then commits every effect in one synchronous
//! step.
//!
//! # Example
//! ```rust,ignore
//! use sprig_core::{Config, Element, Reconciler};
//!
//! let mut reconciler = Reconciler::new(Config::default());
//! reconciler.render(Element::host("h1").attr("title", "t").child("Hi").build(), container);
//! reconciler.flush(&mut document)?;
//! ```

mod arena;
mod commit;
mod config;
mod deadline;
mod element;
mod error;
mod event;
mod fiber;
mod hooks;
mod host;
mod props;
mod reconcile;
mod scheduler;

#[cfg(test)]
mod testing;

pub use arena::{GenArena, GenIndex};
pub use commit::CommitSummary;
pub use config::Config;
pub use deadline::{CountdownDeadline, Deadline, InstantDeadline, Unbounded};
pub use element::{
    CHILDREN, Child, Component, Element, ElementBuilder, ElementType, NODE_VALUE, PropValue, Props,
    RenderFn, create_element, validate,
};
pub use error::{RenderError, RenderResult};
pub use event::{Event, EventHandler};
pub use fiber::{Children as FiberChildren, EffectTag, Fiber, FiberArena, FiberId, FiberKind};
pub use hooks::{Hook, HookContext, SetStateAction, StateSetter, UpdateSignal};
pub use host::RenderTarget;
pub use props::{PropChange, PropKind, apply_changes, diff_props, sync_props};
pub use scheduler::{Phase, Reconciler, WorkOutcome};
