//! Cancellable network round trips.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::domain::ControllerError;

/// Start the round trip built by `start` and await it unless `token` is cancelled first.
///
/// `start` is not called once the token is cancelled. Output arriving after cancellation is
/// dropped.
pub(crate) async fn cancellable<S, F>(
    token: &CancellationToken,
    start: S,
) -> Result<F::Output, ControllerError>
where
    S: FnOnce() -> F,
    F: Future,
{
    if token.is_cancelled() {
        return Err(ControllerError::Cancelled);
    }

    let future = start();

    tokio::select! {
        biased;

        () = token.cancelled() => Err(ControllerError::Cancelled),
        output = future => Ok(output),
    }
}
