use std::sync::atomic::{AtomicBool, Ordering};

/// A value that should be acted on at most once, such as a "navigate to the
/// add-task screen" notification.
///
/// The first `take_if_unhandled` call yields the content; every later call
/// returns `None`, so duplicate delivery is suppressed without any external
/// lifecycle machinery. `peek` never consumes the event.
#[derive(Debug)]
pub struct OneShotEvent<T> {
    content: T,
    handled: AtomicBool,
}

impl<T: Clone> OneShotEvent<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            handled: AtomicBool::new(false),
        }
    }

    pub fn take_if_unhandled(&self) -> Option<T> {
        if self.handled.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(self.content.clone())
        }
    }

    pub fn peek(&self) -> &T {
        &self.content
    }

    pub fn is_handled(&self) -> bool {
        self.handled.load(Ordering::Acquire)
    }
}
