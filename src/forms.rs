use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    domain::FormStatus,
    notifications::{NotificationId, Notifications},
};

mod contact;
mod waitlist;

pub use contact::{ContactFields, ContactForm};
pub use waitlist::WaitlistForm;

/// Reasons a submit never reaches the network.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("A submission is already in flight")]
    AlreadySubmitting,
    #[error("{0}")]
    InvalidField(String),
}

trait FormState {
    fn status_mut(&mut self) -> &mut FormStatus;
}

fn lock<S>(state: &Mutex<S>) -> MutexGuard<'_, S> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Held across a submission's request. If the submit future is dropped
/// before [`InFlight::finish`], the form goes back to `Idle` and its toast
/// is settled as an error.
struct InFlight<'a, S: FormState> {
    state: &'a Mutex<S>,
    notifications: &'a Notifications,
    toast: NotificationId,
    failure_title: &'static str,
    finished: bool,
}

impl<'a, S: FormState> InFlight<'a, S> {
    fn new(
        state: &'a Mutex<S>,
        notifications: &'a Notifications,
        toast: NotificationId,
        failure_title: &'static str,
    ) -> Self {
        Self {
            state,
            notifications,
            toast,
            failure_title,
            finished: false,
        }
    }

    fn finish(mut self) {
        self.finished = true;
    }
}

impl<S: FormState> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::warn!("Submission was cancelled before the server answered");
        *lock(self.state).status_mut() = FormStatus::Idle;
        self.notifications.error(
            self.toast,
            self.failure_title,
            "The request was cancelled. Please try again.",
        );
    }
}
