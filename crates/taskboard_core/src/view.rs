use crate::event::OneShotEvent;
use crate::model::TaskFilter;
use std::sync::{Arc, PoisonError, RwLock};

/// Single-writer observable value. The cell owner is the only writer;
/// `subscribe` hands out read-only views that always see the latest value.
#[derive(Debug)]
pub struct StateCell<T> {
    inner: Arc<RwLock<T>>,
}

#[derive(Debug, Clone)]
pub struct StateReader<T> {
    inner: Arc<RwLock<T>>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    pub fn set(&self, value: T) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = value;
    }

    pub fn get(&self) -> T {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscribe(&self) -> StateReader<T> {
        StateReader {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> StateReader<T> {
    pub fn get(&self) -> T {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Observable state for the task-list screen: the current filter plus a
/// one-shot "new task requested" event.
#[derive(Debug)]
pub struct TasksView {
    filtering: StateCell<TaskFilter>,
    new_task_event: StateCell<Option<Arc<OneShotEvent<()>>>>,
}

impl TasksView {
    pub fn new(initial: TaskFilter) -> Self {
        Self {
            filtering: StateCell::new(initial),
            new_task_event: StateCell::new(None),
        }
    }

    pub fn set_filtering(&self, filter: TaskFilter) {
        self.filtering.set(filter);
    }

    pub fn current_filter(&self) -> TaskFilter {
        self.filtering.get()
    }

    pub fn filter_label(&self) -> &'static str {
        self.current_filter().label()
    }

    /// The add-task entry point is only offered on the unfiltered list.
    pub fn add_view_visible(&self) -> bool {
        self.current_filter() == TaskFilter::AllTasks
    }

    /// Arms a fresh one-shot event; the previous event, handled or not, is
    /// replaced.
    pub fn add_new_task(&self) {
        self.new_task_event
            .set(Some(Arc::new(OneShotEvent::new(()))));
    }

    pub fn new_task_event(&self) -> Option<Arc<OneShotEvent<()>>> {
        self.new_task_event.get()
    }

    pub fn subscribe_filter(&self) -> StateReader<TaskFilter> {
        self.filtering.subscribe()
    }

    pub fn subscribe_new_task(&self) -> StateReader<Option<Arc<OneShotEvent<()>>>> {
        self.new_task_event.subscribe()
    }
}

impl Default for TasksView {
    fn default() -> Self {
        Self::new(TaskFilter::AllTasks)
    }
}

#[cfg(test)]
mod tests {
    use super::{StateCell, TasksView};
    use crate::model::TaskFilter;

    #[test]
    fn state_cell_readers_observe_writes() {
        let cell = StateCell::new(1u32);
        let reader = cell.subscribe();

        assert_eq!(reader.get(), 1);
        cell.set(2);
        assert_eq!(reader.get(), 2);
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn add_new_task_arms_unhandled_event() {
        let view = TasksView::default();
        assert!(view.new_task_event().is_none());

        view.add_new_task();

        let event = view.new_task_event().expect("event armed");
        assert!(!event.is_handled());
        assert_eq!(event.take_if_unhandled(), Some(()));
        assert_eq!(event.take_if_unhandled(), None);
    }

    #[test]
    fn add_new_task_replaces_previous_event() {
        let view = TasksView::default();

        view.add_new_task();
        view.new_task_event().expect("first event").take_if_unhandled();

        view.add_new_task();
        let second = view.new_task_event().expect("second event");
        assert!(!second.is_handled());
    }

    #[test]
    fn all_tasks_filter_shows_add_view() {
        let view = TasksView::default();

        view.set_filtering(TaskFilter::AllTasks);

        assert!(view.add_view_visible());
        assert_eq!(view.filter_label(), "All tasks");
    }

    #[test]
    fn narrowed_filters_hide_add_view() {
        let view = TasksView::default();

        view.set_filtering(TaskFilter::ActiveTasks);
        assert!(!view.add_view_visible());

        view.set_filtering(TaskFilter::CompletedTasks);
        assert!(!view.add_view_visible());
    }

    #[test]
    fn filter_subscribers_track_changes() {
        let view = TasksView::default();
        let reader = view.subscribe_filter();

        view.set_filtering(TaskFilter::CompletedTasks);

        assert_eq!(reader.get(), TaskFilter::CompletedTasks);
        assert_eq!(view.current_filter(), TaskFilter::CompletedTasks);
    }

    #[test]
    fn event_subscribers_see_the_armed_event() {
        let view = TasksView::default();
        let reader = view.subscribe_new_task();
        assert!(reader.get().is_none());

        view.add_new_task();

        let event = reader.get().expect("event visible to subscriber");
        assert_eq!(event.take_if_unhandled(), Some(()));
        // Consumption is shared: the owner sees the same event as handled.
        assert!(view.new_task_event().expect("same event").is_handled());
    }
}
