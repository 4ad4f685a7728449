/// Receives events and optionally answers with an action.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` asks the
/// producer for something specific and `None` lets it continue unchanged.
///
/// Closures automatically implement `Observer`, and `()` is a no-op observer.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_observe() {
        let mut seen = Vec::new();
        let mut observer = |e: &i32| {
            seen.push(*e);
            (*e > 2).then_some("stop")
        };
        assert_eq!(observer.observe(&1), None);
        assert_eq!(observer.observe(&3), Some("stop"));
        assert_eq!(seen, vec![1, 3]);
    }

    #[test]
    fn unit_ignores_everything() {
        let mut observer = ();
        assert_eq!(Observer::<i32, ()>::observe(&mut observer, &5), None);
    }
}
