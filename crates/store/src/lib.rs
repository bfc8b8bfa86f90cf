//! Unidirectional state container for chart views.
//!
//! UI code receives a [`StatePort`] instead of reaching for a global store.
//! Drawing helpers never see it: callers read the state and pass plain
//! values (rotation, selection) down.

/// Handle returned by [`StatePort::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener<S> = Box<dyn FnMut(&S)>;

/// Read, observe and update application state.
pub trait StatePort<S, A> {
    fn get_state(&self) -> &S;
    fn subscribe(&mut self, listener: Box<dyn FnMut(&S)>) -> Subscription;
    /// Returns `false` when the subscription was already gone.
    fn unsubscribe(&mut self, subscription: Subscription) -> bool;
    fn dispatch(&mut self, action: A);
}

/// In-memory store driven by a pure reducer.
pub struct Store<S, A> {
    state: S,
    reducer: fn(&S, &A) -> S,
    listeners: Vec<(Subscription, Listener<S>)>,
    next_id: u64,
}

impl<S, A> Store<S, A> {
    pub fn new(initial: S, reducer: fn(&S, &A) -> S) -> Self {
        Self {
            state: initial,
            reducer,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<S, A> StatePort<S, A> for Store<S, A> {
    fn get_state(&self) -> &S {
        &self.state
    }

    fn subscribe(&mut self, listener: Box<dyn FnMut(&S)>) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((subscription, listener));
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        before != self.listeners.len()
    }

    /// Reduce, then notify listeners in subscription order.
    fn dispatch(&mut self, action: A) {
        self.state = (self.reducer)(&self.state, &action);
        tracing::trace!(listeners = self.listeners.len(), "state dispatched");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

/// View state the chart helpers are parameterised with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartViewState {
    pub selected_train: Option<usize>,
    /// Space on Y (`false`) or space on X (`true`).
    pub rotate: bool,
    /// Cursor position as (time in seconds, position in metres).
    pub cursor: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartViewAction {
    SelectTrain(usize),
    ClearSelection,
    ToggleRotation,
    MoveCursor { time: f64, position: f64 },
    HideCursor,
}

pub fn chart_view_reducer(state: &ChartViewState, action: &ChartViewAction) -> ChartViewState {
    let mut next = state.clone();
    match action {
        ChartViewAction::SelectTrain(index) => next.selected_train = Some(*index),
        ChartViewAction::ClearSelection => next.selected_train = None,
        ChartViewAction::ToggleRotation => next.rotate = !state.rotate,
        ChartViewAction::MoveCursor { time, position } => next.cursor = Some((*time, *position)),
        ChartViewAction::HideCursor => next.cursor = None,
    }
    next
}

/// Store preloaded with the chart view reducer.
pub fn chart_view_store() -> Store<ChartViewState, ChartViewAction> {
    Store::new(ChartViewState::default(), chart_view_reducer)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn dispatch_reduces_and_notifies_in_order() {
        let mut store = chart_view_store();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        store.subscribe(Box::new(move |s: &ChartViewState| {
            first.borrow_mut().push(("first", s.rotate))
        }));
        let second = Rc::clone(&seen);
        store.subscribe(Box::new(move |s: &ChartViewState| {
            second.borrow_mut().push(("second", s.rotate))
        }));

        store.dispatch(ChartViewAction::ToggleRotation);
        assert!(store.get_state().rotate);
        assert_eq!(*seen.borrow(), vec![("first", true), ("second", true)]);
    }

    #[test]
    fn unsubscribed_listeners_stop_receiving() {
        let mut store = chart_view_store();
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let sub = store.subscribe(Box::new(move |_: &ChartViewState| *counter.borrow_mut() += 1));

        store.dispatch(ChartViewAction::SelectTrain(2));
        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.dispatch(ChartViewAction::ClearSelection);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.listener_count(), 0);
        assert_eq!(store.get_state().selected_train, None);
    }

    #[test]
    fn cursor_moves_and_hides() {
        let state = chart_view_reducer(
            &ChartViewState::default(),
            &ChartViewAction::MoveCursor {
                time: 3_600.0,
                position: 12_000.0,
            },
        );
        assert_eq!(state.cursor, Some((3_600.0, 12_000.0)));
        let state = chart_view_reducer(&state, &ChartViewAction::HideCursor);
        assert_eq!(state.cursor, None);
    }
}
