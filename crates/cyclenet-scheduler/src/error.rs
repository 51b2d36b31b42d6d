use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("cannot schedule at {requested} before current time {now}")]
    TimeInPast {
        requested: cyclenet_core::SimTime,
        now: cyclenet_core::SimTime,
    },
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
