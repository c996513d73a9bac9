//! User-facing failure notices.
//!
//! The compressor never talks to the user. Callers pass its result to
//! [`notify_failure`], which reports a failed request exactly once through
//! whatever [`Notifier`] the platform provides (a toast, an alert, stderr).

use crate::compress::{CompressionResult, FailureReason};

/// Something that can show a short title/description pair to the user.
pub trait Notifier {
    fn notify(&self, title: &str, description: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str, &str),
{
    fn notify(&self, title: &str, description: &str) {
        self(title, description)
    }
}

/// Fixed message shown for a failure reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureNotice {
    pub title: &'static str,
    pub description: &'static str,
}

impl FailureReason {
    /// The notice for this reason. Cancelled requests have no one left to
    /// notify.
    pub fn notice(self) -> Option<FailureNotice> {
        let (title, description) = match self {
            FailureReason::SizeUnattainable => (
                "Image too large",
                "Please choose a different image.",
            ),
            FailureReason::DecodeError => (
                "Unable to read image",
                "Please choose a different image.",
            ),
            FailureReason::EncodeError => (
                "Image compression failed",
                "Please try again.",
            ),
            FailureReason::Cancelled => return None,
        };
        Some(FailureNotice { title, description })
    }
}

/// Report a failed result through `notifier`. Returns whether a notice was
/// shown; successful and cancelled results show nothing.
pub fn notify_failure<N>(result: &CompressionResult, notifier: &N) -> bool
where
    N: Notifier + ?Sized,
{
    match result.failure_reason().and_then(FailureReason::notice) {
        Some(notice) => {
            notifier.notify(notice.title, notice.description);
            true
        }
        None => false,
    }
}
