// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Aiding [`Future`]s definitions.

use std::{future::Future, pin::Pin, task, time::Duration};

use derive_more::Error;
use futures_timer::Delay;
use pin_project::pin_project;

/// Error of a [`Future`] not resolving before its deadline.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub struct Elapsed(#[error(not(source))] pub Duration);

impl std::fmt::Display for Elapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Step did not complete within {}",
            humantime::format_duration(self.0),
        )
    }
}

/// Wraps the given `future` into a [`Timeout`] one, resolving with an
/// [`Elapsed`] error once the `duration` passes.
///
/// The deadline is a [`Delay`] tracked by a single shared timer thread, so
/// this works with any executor, and dropping the [`Timeout`] cancels it.
pub(crate) fn timeout<F: Future>(duration: Duration, future: F) -> Timeout<F> {
    Timeout {
        inner: future,
        deadline: Delay::new(duration),
        duration,
    }
}

/// [`Future`] returned by the [`timeout()`] function.
#[derive(Debug)]
#[pin_project]
pub(crate) struct Timeout<F> {
    /// Wrapped [`Future`].
    #[pin]
    inner: F,

    /// Deadline of the wrapped [`Future`].
    #[pin]
    deadline: Delay,

    /// Allowed duration.
    duration: Duration,
}

impl<F: Future> Future for Timeout<F> {
    type Output = Result<F::Output, Elapsed>;

    fn poll(
        self: Pin<&mut Self>,
        cx: &mut task::Context<'_>,
    ) -> task::Poll<Self::Output> {
        let this = self.project();

        if let task::Poll::Ready(out) = this.inner.poll(cx) {
            return task::Poll::Ready(Ok(out));
        }
        match this.deadline.poll(cx) {
            task::Poll::Ready(()) => {
                task::Poll::Ready(Err(Elapsed(*this.duration)))
            }
            task::Poll::Pending => task::Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::future;

    use super::{timeout, Elapsed};

    #[tokio::test]
    async fn resolves_in_time() {
        let out = timeout(Duration::from_secs(5), future::ready(42)).await;

        assert_eq!(out, Ok(42));
    }

    #[tokio::test]
    async fn fails_after_deadline() {
        let out = timeout(Duration::from_millis(20), future::pending::<()>()).await;

        assert_eq!(out, Err(Elapsed(Duration::from_millis(20))));
    }

    #[test]
    fn displays_duration() {
        assert_eq!(
            Elapsed(Duration::from_millis(1500)).to_string(),
            "Step did not complete within 1s 500ms",
        );
    }
}
