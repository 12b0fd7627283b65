use crate::{Observation, ObservationKind};
use std::sync::Arc;

/// Observer function type
pub type ObserverFn = Arc<dyn Fn(&Observation<'_>) + Send + Sync>;

/// No-op observer
pub fn no_op_observer() -> ObserverFn {
    Arc::new(|_observation: &Observation<'_>| {})
}

/// Tracing observer - logs to tracing crate
pub fn tracing_observer() -> ObserverFn {
    Arc::new(|observation: &Observation<'_>| match observation {
        Observation::Enqueued { data, .. } => {
            tracing::trace!(target: "uibridge::queue", "Enqueued({:?})", data);
        }
        Observation::Flushed { commands, .. } => {
            tracing::debug!(target: "uibridge::flush", "Flushed({} commands)", commands);
        }
        Observation::FlushFailed {
            commands, error, ..
        } => {
            tracing::warn!(
                target: "uibridge::flush",
                "FlushFailed({} commands, {})",
                commands,
                error
            );
        }
        Observation::Direct { data, .. } => {
            tracing::debug!(target: "uibridge::direct", "Direct({:?})", data);
        }
        Observation::Capture { node, scale, .. } => {
            tracing::debug!(target: "uibridge::direct", "Capture({:?}, {})", node, scale);
        }
    })
}

/// Filter observer - only pass the listed kinds
pub fn filter_observer(wrapped: ObserverFn, kinds: &[ObservationKind]) -> ObserverFn {
    let kinds = kinds.to_vec();
    Arc::new(move |observation: &Observation<'_>| {
        if kinds.contains(&observation.kind()) {
            wrapped(observation);
        }
    })
}

/// Filter observer with custom predicate
pub fn filter_with<F>(wrapped: ObserverFn, predicate: F) -> ObserverFn
where
    F: Fn(&Observation<'_>) -> bool + Send + Sync + 'static,
{
    Arc::new(move |observation: &Observation<'_>| {
        if predicate(observation) {
            wrapped(observation);
        }
    })
}

/// Tee observer - call multiple observers
pub fn tee_observer(observers: Vec<ObserverFn>) -> ObserverFn {
    Arc::new(move |observation: &Observation<'_>| {
        for observer in &observers {
            observer(observation);
        }
    })
}
