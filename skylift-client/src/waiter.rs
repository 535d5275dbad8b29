//! Generic polling for long-running operations
//!
//! Three pipeline steps wait on provider-side jobs with the same loop and
//! different budgets: Artifact Registry repository creation (boolean
//! `done` flag), Cloud Build (enumerated statuses), and Cloud Run service
//! mutations (single-shot server-side wait, no loop at all).
//!
//! The poll closure owns interpretation: it maps one status-check response
//! to [`Poll::Ready`], [`Poll::Pending`], or a typed error. A poll error,
//! transport or terminal-failure alike, aborts the wait immediately; there
//! is deliberately no retry on transient failures.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

/// Attempt budget and inter-attempt delay for one wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl PollPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

/// One poll result, as interpreted by the call site
#[derive(Debug)]
pub enum Poll<T> {
    /// Not terminal yet; the optional status string feeds the progress
    /// callback
    Pending(Option<String>),
    /// Terminal success with the extracted payload
    Ready(T),
}

/// Why a wait ended without a payload
#[derive(Debug, Error)]
pub enum WaitError<E> {
    /// A poll failed: transport error, remote error, or an operation that
    /// completed in a failed state
    #[error("{0}")]
    Attempt(E),

    /// The attempt budget ran out before the operation became terminal
    #[error("operation still not complete after {attempts} attempts")]
    Timeout { attempts: u32 },
}

/// Poll until terminal, with a fixed delay between attempts
///
/// Invokes `poll` up to `policy.max_attempts` times. A `Ready` result
/// returns after exactly N calls and N-1 delays; a `Pending` status string
/// is handed to `progress` before sleeping; a poll error propagates
/// immediately. Exhausting the budget yields [`WaitError::Timeout`].
pub async fn wait_until<T, E, F, Fut, P>(
    policy: &PollPolicy,
    mut poll: F,
    mut progress: P,
) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Poll<T>, E>>,
    P: FnMut(&str),
{
    for attempt in 1..=policy.max_attempts {
        match poll().await.map_err(WaitError::Attempt)? {
            Poll::Ready(value) => return Ok(value),
            Poll::Pending(status) => {
                if let Some(status) = status.as_deref() {
                    progress(status);
                }
                if attempt < policy.max_attempts {
                    sleep(policy.delay).await;
                }
            }
        }
    }

    Err(WaitError::Timeout {
        attempts: policy.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> PollPolicy {
        PollPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_ready_on_nth_call_polls_exactly_n_times() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<u32, WaitError<&str>> = wait_until(
            &fast_policy(10),
            move || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    if n == 3 {
                        Ok(Poll::Ready(n))
                    } else {
                        Ok(Poll::Pending(None))
                    }
                }
            },
            |_| {},
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_never_done_times_out_after_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), WaitError<&str>> = wait_until(
            &fast_policy(4),
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Poll::Pending(Some("WORKING".to_string())))
                }
            },
            |_| {},
        )
        .await;

        match result {
            Err(WaitError::Timeout { attempts }) => assert_eq!(attempts, 4),
            other => panic!("expected timeout, got {other:?}"),
        }
        // Exactly the budget, no extra call.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_poll_error_aborts_without_further_polling() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), WaitError<String>> = wait_until(
            &fast_policy(10),
            move || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    if n == 2 {
                        Err("build failed with status FAILURE".to_string())
                    } else {
                        Ok(Poll::Pending(None))
                    }
                }
            },
            |_| {},
        )
        .await;

        match result {
            Err(WaitError::Attempt(message)) => {
                assert_eq!(message, "build failed with status FAILURE");
            }
            other => panic!("expected attempt error, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_progress_sees_pending_statuses_in_order() {
        let statuses = ["QUEUED", "WORKING", "SUCCESS"];
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let mut seen = Vec::new();

        let result: Result<&str, WaitError<&str>> = wait_until(
            &fast_policy(10),
            move || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) as usize;
                    if statuses[n] == "SUCCESS" {
                        Ok(Poll::Ready(statuses[n]))
                    } else {
                        Ok(Poll::Pending(Some(statuses[n].to_string())))
                    }
                }
            },
            |status| seen.push(status.to_string()),
        )
        .await;

        assert_eq!(result.unwrap(), "SUCCESS");
        assert_eq!(seen, vec!["QUEUED".to_string(), "WORKING".to_string()]);
    }

    #[tokio::test]
    async fn test_ready_on_first_call_sleeps_never() {
        // A generous delay would hang the test if the waiter slept before
        // returning a first-call success.
        let policy = PollPolicy::new(3, Duration::from_secs(3600));
        let result: Result<u32, WaitError<&str>> =
            wait_until(&policy, || async { Ok(Poll::Ready(7)) }, |_| {}).await;
        assert_eq!(result.unwrap(), 7);
    }
}
