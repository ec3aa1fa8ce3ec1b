use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

/// A cloneable, single-threaded handle to one shared value.
///
/// Clones point at the same value. Borrowing follows [`RefCell`] rules, so
/// holding a [`get`](Self::get) guard across a call that needs
/// [`get_mut`](Self::get_mut) on the same handle panics.
///
/// ```
/// use voxelize::core::StSystem;
///
/// let registry = StSystem::new(Vec::<u32>::new());
/// let shared = registry.clone();
///
/// shared.get_mut().push(7);
/// assert_eq!(registry.get().as_slice(), &[7]);
/// ```
pub struct StSystem<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> StSystem<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Shared borrow of the value.
    pub fn get(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    /// Exclusive borrow of the value.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }
}

impl<T> Clone for StSystem<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}
