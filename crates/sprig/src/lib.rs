//! sprig
//!
//! A minimal declarative UI runtime: describe the UI as an element tree,
//! and sprig keeps a document in sync with it, a few fibers per idle tick.
//!
//! # Example
//! ```rust,ignore
//! use sprig::{Config, Element, Runtime};
//!
//! let mut runtime = Runtime::new(Config::default());
//! runtime.render(Element::host("h1").attr("title", "t").child("Hi").build());
//! runtime.run_until_idle()?;
//! assert_eq!(runtime.document().body_html(), r#"<h1 title="t">Hi</h1>"#);
//! ```

mod error;
mod idle;
mod runtime;
pub mod todo;

pub use error::{RuntimeError, RuntimeResult};
pub use idle::IdleLoop;
pub use runtime::Runtime;

pub use sprig_core::{
    Child, CommitSummary, Component, Config, CountdownDeadline, Deadline, EffectTag, Element,
    ElementBuilder, ElementType, Event, EventHandler, HookContext, InstantDeadline, Phase,
    PropValue, Props, Reconciler, RenderError, RenderTarget, SetStateAction, StateSetter,
    Unbounded, WorkOutcome, create_element,
};

// Re-export sub-crates for advanced usage
pub use sprig_dom as dom;

/// Runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
