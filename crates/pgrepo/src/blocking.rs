//! Synchronous bridge for the async client.

use crate::error::{RepoError, RepoResult};
use std::future::Future;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Run an async operation to completion on the calling thread.
///
/// Outside a runtime a current-thread runtime is built for the call. Inside a
/// multi-thread runtime the future is driven by the current handle from a
/// scoped helper thread while the runtime's workers keep polling the client's
/// connection task.
///
/// Inside a current-thread runtime the connection task could never make
/// progress while the only thread is blocked, so the call fails with
/// [`RepoError::Runtime`].
pub fn run_blocking<F, Fut, T>(make_future: F) -> RepoResult<T>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = RepoResult<T>> + Send,
    T: Send,
{
    let Ok(handle) = Handle::try_current() else {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RepoError::Runtime(format!("failed to create runtime: {e}")))?;
        return rt.block_on(make_future());
    };

    if matches!(handle.runtime_flavor(), RuntimeFlavor::CurrentThread) {
        return Err(RepoError::Runtime(
            "blocking call inside a current-thread runtime; use the async method or a multi-thread runtime"
                .into(),
        ));
    }

    std::thread::scope(|s| {
        s.spawn(|| handle.block_on(make_future()))
            .join()
            .map_err(|_| RepoError::Runtime("blocking worker panicked".into()))?
    })
}
