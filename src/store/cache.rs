use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

/// Time-boxed read cache.
///
/// Writers must call [`ReadCache::invalidate`] right after a successful write, otherwise readers
/// observe the stale value until it expires.
#[derive(Debug)]
pub struct ReadCache<T> {
    ttl: Duration,
    entry: RefCell<Option<Entry<T>>>,
}

#[derive(Debug)]
struct Entry<T> {
    loaded_at: Instant,
    value: Rc<T>,
}

impl<T> ReadCache<T> {
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, entry: RefCell::new(None) }
    }

    /// Cached value if it is still fresh, otherwise load a new one.
    ///
    /// Failed loads are not cached.
    pub fn get_or_try_load<E>(&self, load: impl FnOnce() -> Result<T, E>) -> Result<Rc<T>, E> {
        if let Some(entry) = self.entry.borrow().as_ref()
            && entry.loaded_at.elapsed() < self.ttl
        {
            return Ok(Rc::clone(&entry.value));
        }
        let value = Rc::new(load()?);
        *self.entry.borrow_mut() = Some(Entry { loaded_at: Instant::now(), value: Rc::clone(&value) });
        Ok(value)
    }

    pub fn invalidate(&self) {
        self.entry.borrow_mut().take();
    }
}
