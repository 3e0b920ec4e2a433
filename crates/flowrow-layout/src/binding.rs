//! Write-back channels and deferred delivery of layout output.
//!
//! Output is never written into host-observable state while a layout pass
//! is running. Passes post to an [`Outbox`]; the host drains it on the next
//! turn of its event loop.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::compute::LayoutResult;

type Observer<T> = Box<dyn FnMut(&T)>;

struct BindingInner<T> {
    value: T,
    constant: bool,
    observer: Option<Observer<T>>,
}

/// Shared value written by the layout and read by the host.
///
/// Writing the value it already holds is a no-op: the observer only runs
/// on change.
pub struct Binding<T> {
    inner: Rc<RefCell<BindingInner<T>>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Binding")
            .field("value", &inner.value)
            .field("constant", &inner.constant)
            .finish_non_exhaustive()
    }
}

impl<T: Default + Clone + PartialEq> Default for Binding<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq> Binding<T> {
    pub fn new(value: T) -> Self {
        Self::with_inner(value, false)
    }

    /// A binding that ignores writes.
    pub fn constant(value: T) -> Self {
        Self::with_inner(value, true)
    }

    fn with_inner(value: T, constant: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BindingInner {
                value,
                constant,
                observer: None,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Register the callback run after each change. Replaces any previous one.
    pub fn on_change(&self, observer: impl FnMut(&T) + 'static) {
        self.inner.borrow_mut().observer = Some(Box::new(observer));
    }

    /// Store `value`. Returns whether the stored value changed.
    pub fn set(&self, value: T) -> bool {
        let observer = {
            let mut inner = self.inner.borrow_mut();
            if inner.constant || inner.value == value {
                return false;
            }
            inner.value = value.clone();
            inner.observer.take()
        };

        // The borrow is released so the observer may read the binding.
        if let Some(mut observer) = observer {
            observer(&value);
            let mut inner = self.inner.borrow_mut();
            if inner.observer.is_none() {
                inner.observer = Some(observer);
            }
        }
        true
    }
}

/// A computed layout waiting to be applied.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Commit {
    /// Increases with every posted pass
    pub(crate) generation: u64,
    pub(crate) result: LayoutResult,
}

/// Output drained from the outbox in one turn.
#[derive(Debug, Default)]
pub(crate) struct Delivery {
    pub(crate) commit: Option<Commit>,
    pub(crate) line_count: Option<usize>,
}

/// Pending output of layout passes. A newer pass supersedes anything still
/// pending from an older one.
#[derive(Debug, Default)]
pub(crate) struct Outbox {
    commit: Option<Commit>,
    line_count: Option<usize>,
    generation: u64,
}

impl Outbox {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a computed layout. Returns its generation.
    pub(crate) fn post(&mut self, result: LayoutResult) -> u64 {
        self.generation += 1;
        if let Some(stale) = self.commit.take() {
            tracing::debug!(
                stale = stale.generation,
                current = self.generation,
                "pending layout superseded"
            );
        }
        self.commit = Some(Commit {
            generation: self.generation,
            result,
        });
        self.generation
    }

    pub(crate) fn post_line_count(&mut self, line_count: usize) {
        self.line_count = Some(line_count);
    }

    /// Take everything pending.
    pub(crate) fn drain(&mut self) -> Delivery {
        Delivery {
            commit: self.commit.take(),
            line_count: self.line_count.take(),
        }
    }
}
