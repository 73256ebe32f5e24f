//! Per-send options and progress notification.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{ApiRequest, ClientError};

/// Progress observer invoked with human-readable status strings.
pub type ProgressFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Options shared by the SMS, MMS and email send operations.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use ccai::client::SendOptions;
///
/// let options = SendOptions::new()
///     .with_timeout(Duration::from_secs(30))
///     .on_progress(|status| println!("{status}"));
/// ```
#[derive(Clone, Default)]
pub struct SendOptions {
    /// Abort the send with [`ClientError::TimedOut`] after this long.
    pub timeout: Option<Duration>,
    /// Abort the send with [`ClientError::Cancelled`] once this fires.
    pub cancellation: Option<CancellationToken>,
    progress: Option<ProgressFn>,
}

impl SendOptions {
    /// Creates options with no timeout, no cancellation and no observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Registers a progress observer.
    #[must_use]
    pub fn on_progress(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(f));
        self
    }

    /// Invokes the observer, if any.
    ///
    /// A panicking observer is caught and logged; it never affects the
    /// operation that reported progress.
    pub fn notify(&self, status: &str) {
        let Some(progress) = &self.progress else {
            return;
        };
        if catch_unwind(AssertUnwindSafe(|| progress(status))).is_err() {
            tracing::warn!("Progress callback panicked on status '{status}'");
        }
    }

    /// Copies timeout and cancellation onto `request`.
    pub(crate) fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(timeout) = self.timeout {
            request = request.with_timeout(timeout);
        }
        if let Some(token) = &self.cancellation {
            request = request.with_cancellation(token.clone());
        }
        request
    }

    /// Reports the terminal status matching `result`.
    pub(crate) fn finish<T>(
        &self,
        subject: &str,
        result: Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        match &result {
            Ok(_) => self.notify(&format!("{subject} sent successfully")),
            Err(ClientError::Cancelled) => self.notify(&format!("{subject} sending cancelled")),
            Err(ClientError::TimedOut) => self.notify(&format!("{subject} sending timed out")),
            Err(_) => self.notify(&format!("{subject} sending failed")),
        }
        result
    }
}

impl fmt::Debug for SendOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendOptions")
            .field("timeout", &self.timeout)
            .field("cancellation", &self.cancellation.is_some())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}
