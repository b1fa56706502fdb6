//! Hook Store
//!
//! Per-component persistent state keyed by call order. A component fiber's
//! hooks are handed to the next render of the same position, and each
//! `use_state` call claims the slot at its cursor. State cells are shared
//! between generations, so a setter captured during any render mutates the
//! value the next render reads.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

type StateCell = Rc<RefCell<Box<dyn Any>>>;

/// One state slot of a component
#[derive(Clone)]
pub struct Hook {
    state: StateCell,
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("state", &Rc::as_ptr(&self.state))
            .finish()
    }
}

/// Re-render request flag shared between setters and their reconciler
#[derive(Debug, Clone, Default)]
pub struct UpdateSignal(Rc<Cell<u64>>);

impl UpdateSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a re-render
    pub fn raise(&self) {
        self.0.set(self.0.get() + 1);
    }

    /// Whether a request is waiting
    pub fn is_raised(&self) -> bool {
        self.0.get() > 0
    }

    /// Consume pending requests, returning how many were raised
    pub fn take(&self) -> u64 {
        self.0.replace(0)
    }
}

/// Hook access for one component render
pub struct HookContext<'a> {
    previous: &'a [Hook],
    hooks: Vec<Hook>,
    cursor: usize,
    signal: &'a UpdateSignal,
}

impl<'a> HookContext<'a> {
    pub(crate) fn new(previous: &'a [Hook], signal: &'a UpdateSignal) -> Self {
        Self {
            previous,
            hooks: Vec::with_capacity(previous.len()),
            cursor: 0,
            signal,
        }
    }

    /// Persistent state slot seeded with `initial` on first render
    pub fn use_state<T: Clone + 'static>(&mut self, initial: T) -> (T, StateSetter<T>) {
        self.use_state_with(move || initial)
    }

    /// Like `use_state`, but the initial value is only computed when seeding
    pub fn use_state_with<T, F>(&mut self, init: F) -> (T, StateSetter<T>)
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
    {
        let index = self.cursor;
        self.cursor += 1;

        let reused = self.previous.get(index).and_then(|hook| {
            let value = hook.state.borrow().downcast_ref::<T>().cloned();
            if value.is_none() {
                tracing::warn!(index, "state hook changed type between renders, reseeding");
            }
            value.map(|v| (hook.state.clone(), v))
        });

        let (state, value) = match reused {
            Some(pair) => pair,
            None => {
                let value = init();
                let cell: StateCell = Rc::new(RefCell::new(Box::new(value.clone())));
                (cell, value)
            }
        };

        self.hooks.push(Hook { state: state.clone() });
        let setter = StateSetter {
            state,
            signal: self.signal.clone(),
            _marker: PhantomData,
        };
        (value, setter)
    }

    /// Number of hooks called so far in this render
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn into_hooks(self) -> Vec<Hook> {
        self.hooks
    }
}

/// New state for a setter: a value, or a function of the previous value
pub enum SetStateAction<T> {
    Value(T),
    Update(Box<dyn FnOnce(&T) -> T>),
}

impl<T> From<T> for SetStateAction<T> {
    fn from(value: T) -> Self {
        SetStateAction::Value(value)
    }
}

/// Updater returned by `use_state`
pub struct StateSetter<T> {
    state: StateCell,
    signal: UpdateSignal,
    _marker: PhantomData<fn(T)>,
}

impl<T> Clone for StateSetter<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            signal: self.signal.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for StateSetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSetter")
            .field("state", &Rc::as_ptr(&self.state))
            .finish()
    }
}

impl<T: 'static> StateSetter<T> {
    /// Replace the state
    pub fn set(&self, value: T) {
        *self.state.borrow_mut() = Box::new(value);
        self.signal.raise();
    }

    /// Derive the state from its previous value
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        {
            let mut slot = self.state.borrow_mut();
            match slot.downcast_mut::<T>() {
                Some(current) => {
                    let next = f(current);
                    *current = next;
                }
                None => {
                    tracing::warn!("state setter used with a mismatched type, update dropped");
                    return;
                }
            }
        }
        self.signal.raise();
    }

    pub fn dispatch(&self, action: impl Into<SetStateAction<T>>) {
        match action.into() {
            SetStateAction::Value(value) => self.set(value),
            SetStateAction::Update(f) => self.update(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_then_reuse() {
        let signal = UpdateSignal::new();

        let mut first = HookContext::new(&[], &signal);
        let (count, set_count) = first.use_state(1);
        let (label, _) = first.use_state(String::from("a"));
        assert_eq!((count, label.as_str()), (1, "a"));
        let hooks = first.into_hooks();

        set_count.update(|n| n + 1);
        set_count.dispatch(SetStateAction::Update(Box::new(|n: &i32| n * 10)));
        assert_eq!(signal.take(), 2);

        let mut second = HookContext::new(&hooks, &signal);
        let (count, _) = second.use_state(1);
        let (label, _) = second.use_state(String::from("ignored"));
        assert_eq!(count, 20);
        assert_eq!(label, "a");
        assert_eq!(second.cursor(), 2);
    }

    #[test]
    fn test_type_change_reseeds() {
        let signal = UpdateSignal::new();
        let mut first = HookContext::new(&[], &signal);
        first.use_state(5u8);
        let hooks = first.into_hooks();

        let mut second = HookContext::new(&hooks, &signal);
        let (value, _) = second.use_state(String::from("fresh"));
        assert_eq!(value, "fresh");
    }

    #[test]
    fn test_lazy_init_runs_once() {
        let signal = UpdateSignal::new();
        let calls = Cell::new(0);

        let mut first = HookContext::new(&[], &signal);
        first.use_state_with(|| {
            calls.set(calls.get() + 1);
            vec![1, 2]
        });
        let hooks = first.into_hooks();

        let mut second = HookContext::new(&hooks, &signal);
        let (v, _) = second.use_state_with(|| {
            calls.set(calls.get() + 1);
            Vec::<i32>::new()
        });
        assert_eq!(v, vec![1, 2]);
        assert_eq!(calls.get(), 1);
    }
}
