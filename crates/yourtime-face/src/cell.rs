//! Single-writer value cell with change notification.

use std::fmt;

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A value with one owner that writes it and any number of subscribers that
/// are told whenever it is replaced.
///
/// `set` never compares old and new values: every write notifies. Subscribers
/// run synchronously, in subscription order, on the writer's thread.
pub struct Observable<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self { value, next_id: 0, subscribers: Vec::new() }
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and notifies every subscriber once.
    pub fn set(&mut self, value: T) {
        self.value = value;
        for (_, f) in &mut self.subscribers {
            f(&self.value);
        }
    }

    pub fn subscribe(&mut self, f: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Removes a subscriber. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    #[inline]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<i32>>>, impl FnMut(&i32) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |v: &i32| sink.borrow_mut().push(*v))
    }

    #[test]
    fn set_replaces_and_notifies_once() {
        let mut cell = Observable::new(1);
        let (log, f) = recorder();
        cell.subscribe(f);

        cell.set(2);
        assert_eq!(*cell.get(), 2);
        assert_eq!(*log.borrow(), vec![2]);
    }

    #[test]
    fn equal_value_still_notifies() {
        let mut cell = Observable::new(5);
        let (log, f) = recorder();
        cell.subscribe(f);

        cell.set(5);
        cell.set(5);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn subscribers_run_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut cell = Observable::new(0);
        for tag in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            cell.subscribe(move |_| order.borrow_mut().push(tag));
        }

        cell.set(1);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn unsubscribed_callback_is_not_invoked() {
        let mut cell = Observable::new(0);
        let (kept, f1) = recorder();
        let (dropped, f2) = recorder();
        cell.subscribe(f1);
        let id = cell.subscribe(f2);

        assert!(cell.unsubscribe(id));
        assert!(!cell.unsubscribe(id));
        assert_eq!(cell.subscriber_count(), 1);

        cell.set(7);
        assert_eq!(*kept.borrow(), vec![7]);
        assert!(dropped.borrow().is_empty());
    }
}
