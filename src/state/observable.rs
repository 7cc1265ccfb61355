use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Inner<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

impl<T> Inner<T> {
    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers.iter().any(|(sid, _)| *sid == id)
    }
}

/// A single-threaded value cell that replays its current value to every new
/// subscriber and then pushes each later value, in subscription order.
///
/// Subscribers must not subscribe to, or set, the observable that is currently
/// notifying them.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replace the value and notify every live subscriber before returning.
    pub fn set(&self, value: T) {
        let subscribers = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.subscribers.clone()
        };
        let value = self.get();

        for (id, callback) in subscribers {
            // A subscriber released by an earlier callback in this round must not hear it.
            if self.inner.borrow().is_subscribed(id) {
                (callback.borrow_mut())(&value);
            }
        }
    }

    /// Register `callback`; it is invoked right away with the current value.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        let (id, value) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Rc::clone(&callback)));
            (id, inner.value.clone())
        };

        (callback.borrow_mut())(&value);

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: Default + Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Handle to one registration. Releasing it (or dropping it) stops delivery.
#[must_use = "dropping a Subscription releases it immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

/// Every subscription a view instance holds, released together on teardown.
#[derive(Default)]
pub struct SubscriptionScope {
    handles: Vec<Subscription>,
}

impl SubscriptionScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, subscription: Subscription) {
        self.handles.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Release every handle; returns how many were held.
    pub fn release_all(&mut self) -> usize {
        let released = self.handles.len();
        for handle in self.handles.drain(..) {
            handle.unsubscribe();
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn new_subscriber_gets_the_current_value_first() {
        let currency = Observable::new("USD".to_string());
        currency.set("EUR".to_string());

        let (seen, callback) = recorder::<String>();
        let _sub = currency.subscribe(callback);

        assert_eq!(*seen.borrow(), vec!["EUR".to_string()]);
    }

    #[test]
    fn set_reaches_current_and_late_subscribers() {
        let currency = Observable::new("USD".to_string());
        let (early, callback) = recorder::<String>();
        let _early = currency.subscribe(callback);

        currency.set("GBP".to_string());

        let (late, callback) = recorder::<String>();
        let _late = currency.subscribe(callback);

        assert_eq!(*early.borrow(), vec!["USD".to_string(), "GBP".to_string()]);
        assert_eq!(*late.borrow(), vec!["GBP".to_string()]);
    }

    #[test]
    fn subscribers_are_notified_in_subscription_order() {
        let value = Observable::new(0u32);
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut subs = Vec::new();
        for name in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            subs.push(value.subscribe(move |v: &u32| order.borrow_mut().push((name, *v))));
        }
        order.borrow_mut().clear();

        value.set(1);
        value.set(2);

        assert_eq!(
            *order.borrow(),
            vec![
                ("first", 1),
                ("second", 1),
                ("third", 1),
                ("first", 2),
                ("second", 2),
                ("third", 2),
            ]
        );
    }

    #[test]
    fn unsubscribed_callback_is_never_called_again() {
        let value = Observable::new(0u32);
        let (seen, callback) = recorder::<u32>();
        let sub = value.subscribe(callback);

        sub.unsubscribe();
        value.set(5);

        assert_eq!(*seen.borrow(), vec![0]);
        assert_eq!(value.subscriber_count(), 0);
    }

    #[test]
    fn dropping_the_handle_releases_it() {
        let value = Observable::new(0u32);
        {
            let _sub = value.subscribe(|_| {});
            assert_eq!(value.subscriber_count(), 1);
        }
        assert_eq!(value.subscriber_count(), 0);
    }

    #[test]
    fn release_during_notification_stops_later_delivery() {
        let value = Observable::new(0u32);
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let killer = {
            let victim = Rc::clone(&victim);
            value.subscribe(move |v: &u32| {
                if *v == 1 {
                    if let Some(sub) = victim.borrow_mut().take() {
                        sub.unsubscribe();
                    }
                }
            })
        };
        let (seen, callback) = recorder::<u32>();
        *victim.borrow_mut() = Some(value.subscribe(callback));

        value.set(1);

        assert_eq!(*seen.borrow(), vec![0]);
        drop(killer);
    }

    #[test]
    fn scope_releases_every_handle() {
        let a = Observable::new(1u8);
        let b = Observable::new("x".to_string());
        let mut scope = SubscriptionScope::new();

        scope.add(a.subscribe(|_| {}));
        scope.add(a.subscribe(|_| {}));
        scope.add(b.subscribe(|_| {}));
        assert_eq!(scope.len(), 3);

        assert_eq!(scope.release_all(), 3);
        assert!(scope.is_empty());
        assert_eq!(a.subscriber_count(), 0);
        assert_eq!(b.subscriber_count(), 0);
    }

    #[test]
    fn handle_outliving_the_observable_is_harmless() {
        let value = Observable::new(0u8);
        let sub = value.subscribe(|_| {});
        drop(value);
        sub.unsubscribe();
    }
}
