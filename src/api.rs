/// Simulated network call
///
/// Every service operation resolves through `MockApi`: the outcome is
/// computed synchronously against the store, then suspended for a fixed
/// delay before being handed to the caller. Both successes and failures
/// pass through the same suspension point, so callers cannot distinguish
/// a fast fail from a slow success by timing.
///
/// There is no retry, cancellation, or backpressure; each call is
/// independent of every other in-flight call.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tasklight::api::MockApi;
///
/// # async fn example() -> tasklight::error::ServiceResult<()> {
/// let api = MockApi::new(Duration::from_millis(800));
/// let response = api.call(Ok(42)).await?;
/// assert_eq!(response.data, 42);
/// # Ok(())
/// # }
/// ```
use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;

use crate::error::{ServiceError, ServiceResult};

/// Successful response envelope
#[derive(Debug, Clone, Serialize)]
pub struct Response<T> {
    /// The operation's result value
    pub data: T,
}

impl<T> Response<T> {
    fn new(data: T) -> Self {
        Self { data }
    }
}

/// Fixed-latency wrapper emulating request/response timing
#[derive(Debug, Clone)]
pub struct MockApi {
    delay: Duration,
}

impl MockApi {
    /// Latency applied when none is configured (matches the original
    /// client's 800 ms)
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

    /// Creates a wrapper with the given latency
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured latency
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspends for the configured delay, then resolves `outcome`
    ///
    /// Successes are wrapped in a `Response`; errors are returned as-is
    /// after the same delay.
    pub async fn call<T>(&self, outcome: ServiceResult<T>) -> ServiceResult<Response<T>> {
        sleep(self.delay).await;
        outcome.map(Response::new)
    }

    /// Resolves to the generic operation-failed error after the delay
    ///
    /// Part of the contract even though the services never construct a
    /// failing call themselves.
    pub async fn fail<T>(&self) -> ServiceResult<Response<T>> {
        self.call(Err(ServiceError::OperationFailed)).await
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}
