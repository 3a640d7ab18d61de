use std::future::Future;
use std::time::Duration;

/// Run `work` and resolve no earlier than `floor` after the call.
///
/// The timer and the work run concurrently; whichever finishes later decides
/// when this resolves.
pub async fn finish_no_earlier_than<F: Future>(floor: Duration, work: F) -> F::Output {
    let (output, ()) = tokio::join!(work, tokio::time::sleep(floor));
    output
}
