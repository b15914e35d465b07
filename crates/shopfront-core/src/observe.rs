//! A minimal owned value with change notification.
//!
//! Stores hold their state in an [`Observable`] and callers register
//! callbacks for the views that must be refreshed when it changes. Delivery
//! is synchronous and follows subscription order.

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

pub struct Observable<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(Subscription, Callback<T>)>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and notifies every subscriber.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutates the value in place, then notifies. Returns the closure's result.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value);
        self.notify();
        out
    }

    pub fn subscribe(&mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` when the subscription was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(id, _)| *id != subscription);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&self) {
        for (_, callback) in &self.subscribers {
            callback(&self.value);
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
