//! The single-writer event reducer.
//!
//! One event is processed to completion, including all its awaited store
//! calls and every emission it produces, before the next one is looked at.
//! Nothing else ever writes container state.

use rust_decimal::Decimal;
use tokio::sync::mpsc;

use crate::error::RecordError;
use crate::record::FinanceRecord;
use crate::service::RecordService;

use super::event::RecordEvent;
use super::filter::FilterCriteria;
use super::handle::ContainerHandle;
use super::state::{ContainerState, InFlight, LoadedView, OperationKind};

const EVENT_QUEUE_CAPACITY: usize = 32;

pub struct RecordStateContainer {
    service: RecordService,
    state: ContainerState,
    subscribers: Vec<mpsc::UnboundedSender<ContainerState>>,
}

impl RecordStateContainer {
    pub fn new(service: RecordService) -> Self {
        Self {
            service,
            state: ContainerState::Initial,
            subscribers: Vec::new(),
        }
    }

    /// The current state snapshot, for pull-based callers.
    pub fn state(&self) -> &ContainerState {
        &self.state
    }

    /// Register a new emission stream. Every state emitted from now on is
    /// pushed to the returned receiver, in dispatch order.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ContainerState> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Process one event to completion, emitting its ordered state
    /// sequence.
    pub async fn dispatch(&mut self, event: RecordEvent) {
        match event {
            RecordEvent::Load => self.load(false).await,
            RecordEvent::Refresh => self.load(true).await,
            RecordEvent::Add {
                title,
                amount,
                is_expense,
            } => self.add(title, amount, is_expense).await,
            RecordEvent::Update { record } => self.update(record).await,
            RecordEvent::Delete { id } => self.delete(id).await,
            RecordEvent::ClearAll => self.clear_all().await,
            RecordEvent::Search { query } => self.apply_filters(|filters| {
                let query = query.trim();
                filters.query = if query.is_empty() {
                    None
                } else {
                    Some(query.to_string())
                };
            }),
            RecordEvent::FilterByDateRange { start, end } => {
                self.apply_filters(|filters| filters.date_range = Some((start, end)))
            }
            RecordEvent::FilterByType { is_expense } => {
                self.apply_filters(|filters| filters.is_expense = is_expense)
            }
            RecordEvent::ClearFilters => {
                self.apply_filters(|filters| *filters = FilterCriteria::default())
            }
        }
    }

    /// Drain events from `receiver` until every handle is dropped.
    pub async fn run(mut self, mut events: mpsc::Receiver<RecordEvent>) {
        while let Some(event) = events.recv().await {
            self.dispatch(event).await;
        }
    }

    /// Move the container onto the runtime and return a fire-and-forget
    /// dispatch handle. Subscribe before calling this.
    pub fn spawn(self) -> (ContainerHandle, tokio::task::JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let task = tokio::spawn(self.run(receiver));
        (ContainerHandle::new(sender), task)
    }

    fn emit(&mut self, next: ContainerState) {
        self.subscribers.retain(|sender| {
            if sender.send(next.clone()).is_ok() {
                true
            } else {
                tracing::trace!("state subscriber dropped");
                false
            }
        });
        self.state = next;
    }

    async fn load(&mut self, refresh: bool) {
        let prior = self.state.as_loaded().cloned();
        // An in-place refresh of data already on screen skips the loading
        // state to avoid a visible flicker.
        if !(refresh && prior.is_some()) {
            self.emit(ContainerState::Loading);
        }
        match self.service.list_all().await {
            Ok(records) => {
                let mut view = LoadedView::new(records);
                if refresh {
                    if let Some(previous) = prior {
                        view.filters = previous.filters;
                    }
                }
                view.refilter();
                self.emit(ContainerState::Loaded(view));
            }
            Err(error) => {
                tracing::warn!(%error, refresh, "load failed");
                let records = if refresh {
                    prior.map(|view| view.records)
                } else {
                    None
                };
                self.emit(ContainerState::Failed { error, records });
            }
        }
    }

    async fn add(&mut self, title: String, amount: Decimal, is_expense: bool) {
        let Some(view) = self.begin_mutation(OperationKind::Add) else {
            return;
        };
        let outcome = match self.service.add(&title, amount, is_expense).await {
            Ok(_) => self.service.list_all().await,
            Err(err) => Err(err),
        };
        self.finish_mutation(view, OperationKind::Add, outcome);
    }

    async fn update(&mut self, record: FinanceRecord) {
        let Some(view) = self.begin_mutation(OperationKind::Update) else {
            return;
        };
        let outcome = match self.service.update(record).await {
            Ok(()) => self.service.list_all().await,
            Err(err) => Err(err),
        };
        self.finish_mutation(view, OperationKind::Update, outcome);
    }

    async fn delete(&mut self, id: i64) {
        let Some(view) = self.begin_mutation(OperationKind::Delete) else {
            return;
        };
        let outcome = match self.service.delete(id).await {
            Ok(()) => self.service.list_all().await,
            Err(err) => Err(err),
        };
        self.finish_mutation(view, OperationKind::Delete, outcome);
    }

    async fn clear_all(&mut self) {
        let Some(view) = self.state.as_loaded().cloned() else {
            tracing::debug!("clear-all ignored outside the loaded state");
            return;
        };
        match self.service.clear_all().await {
            Ok(()) => {
                self.emit(ContainerState::OperationSucceeded {
                    operation: OperationKind::Clear,
                    message: OperationKind::Clear.success_message().to_string(),
                    records: Vec::new(),
                });
                let mut next = view;
                next.records = Vec::new();
                next.refilter();
                self.emit(ContainerState::Loaded(next));
            }
            Err(error) => {
                tracing::warn!(%error, "clear-all failed");
                self.emit(ContainerState::Failed {
                    error,
                    records: Some(view.records),
                });
            }
        }
    }

    /// Emit the flagged `Loaded` state that precedes a mutation, returning
    /// the pre-mutation view. `None` means the container was not in the
    /// loaded steady state and the event is silently ignored.
    fn begin_mutation(&mut self, operation: OperationKind) -> Option<LoadedView> {
        let Some(view) = self.state.as_loaded().cloned() else {
            tracing::debug!(?operation, "event ignored outside the loaded state");
            return None;
        };
        let mut flagged = view.clone();
        flagged.in_flight = operation.in_flight();
        self.emit(ContainerState::Loaded(flagged));
        Some(view)
    }

    /// Terminal emissions of a mutation. `outcome` is the refreshed record
    /// list on success; any failure along the way (including a failed
    /// refresh) ends the event in the failure sequence.
    ///
    /// The in-flight flag is cleared before a failure is surfaced so a
    /// consumer never renders a stuck spinner next to an error.
    fn finish_mutation(
        &mut self,
        view: LoadedView,
        operation: OperationKind,
        outcome: Result<Vec<FinanceRecord>, RecordError>,
    ) {
        match outcome {
            Ok(records) => {
                self.emit(ContainerState::OperationSucceeded {
                    operation,
                    message: operation.success_message().to_string(),
                    records: records.clone(),
                });
                let mut next = view;
                next.records = records;
                next.in_flight = InFlight::default();
                next.refilter();
                self.emit(ContainerState::Loaded(next));
            }
            Err(error) => {
                tracing::warn!(%error, ?operation, "operation failed");
                let prior = view.records.clone();
                let mut reset = view;
                reset.in_flight = InFlight::default();
                self.emit(ContainerState::Loaded(reset));
                self.emit(ContainerState::Failed {
                    error,
                    records: Some(prior),
                });
            }
        }
    }

    fn apply_filters(&mut self, change: impl FnOnce(&mut FilterCriteria)) {
        let Some(view) = self.state.as_loaded() else {
            tracing::debug!("filter event ignored outside the loaded state");
            return;
        };
        let mut next = view.clone();
        change(&mut next.filters);
        next.refilter();
        self.emit(ContainerState::Loaded(next));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryRecordStore;
    use std::sync::Arc;

    fn container() -> RecordStateContainer {
        let store = Arc::new(InMemoryRecordStore::new());
        RecordStateContainer::new(RecordService::new(store))
    }

    fn drain(receiver: &mut mpsc::UnboundedReceiver<ContainerState>) -> Vec<ContainerState> {
        let mut emissions = Vec::new();
        while let Ok(state) = receiver.try_recv() {
            emissions.push(state);
        }
        emissions
    }

    #[tokio::test]
    async fn starts_in_initial_state() {
        let container = container();
        assert_eq!(*container.state(), ContainerState::Initial);
    }

    #[tokio::test]
    async fn mutations_are_ignored_before_load() {
        let mut container = container();
        let mut states = container.subscribe();

        container
            .dispatch(RecordEvent::Add {
                title: "Coffee".into(),
                amount: Decimal::new(550, 2),
                is_expense: true,
            })
            .await;
        container.dispatch(RecordEvent::Delete { id: 1 }).await;
        container.dispatch(RecordEvent::ClearAll).await;
        container
            .dispatch(RecordEvent::Search {
                query: "coffee".into(),
            })
            .await;
        container.dispatch(RecordEvent::ClearFilters).await;

        assert!(drain(&mut states).is_empty());
        assert_eq!(*container.state(), ContainerState::Initial);
    }

    #[tokio::test]
    async fn load_emits_loading_then_loaded() {
        let mut container = container();
        let mut states = container.subscribe();

        container.dispatch(RecordEvent::Load).await;

        let emissions = drain(&mut states);
        assert_eq!(emissions.len(), 2);
        assert_eq!(emissions[0], ContainerState::Loading);
        assert!(emissions[1].is_loaded());
    }

    #[tokio::test]
    async fn closed_subscribers_are_dropped_silently() {
        let mut container = container();
        let states = container.subscribe();
        drop(states);

        // Must not fail or emit anywhere.
        container.dispatch(RecordEvent::Load).await;
        assert!(container.state().is_loaded());
        assert!(container.subscribers.is_empty());
    }
}
