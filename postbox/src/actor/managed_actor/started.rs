/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use thiserror::Error;
use tracing::{debug, error, instrument, trace, warn};

use crate::actor::ManagedActor;
use crate::common::FailurePolicy;
use crate::message::ActorExit;
use crate::traits::Actor;

/// Type-state marker for an actor whose dispatch task is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Started;

/// Why a single `handle` call did not complete normally.
#[derive(Debug, Error)]
enum HandlerFailure {
    #[error("handler returned an error: {0:#}")]
    Error(anyhow::Error),
    #[error("handler panicked: {0}")]
    Panic(String),
}

impl<A: Actor> ManagedActor<Started, A> {
    /// The dispatch loop. Runs until the shutdown sentinel is dequeued, every
    /// caller's handle has been dropped, or a handler fails under
    /// [`FailurePolicy::FailFast`].
    #[instrument(skip(self), fields(actor = %self.handle.name(), id = %self.handle.id()))]
    pub(crate) async fn wake(mut self) {
        if let Err(err) = self.model.after_start(&self.handle).await {
            error!(error = %err, "after_start hook failed");
        }

        let exit = loop {
            let message = match self.inbox.recv().await {
                Ok(message) => message,
                Err(exit) => break exit,
            };
            let Err(failure) = self.dispatch(message).await else {
                continue;
            };
            match self.config.failure_policy() {
                FailurePolicy::Resilient => {
                    error!(%failure, "message handling failed, continuing");
                }
                FailurePolicy::FailFast => {
                    error!(%failure, "message handling failed, stopping actor");
                    break ActorExit::Failed;
                }
            }
        };
        trace!(?exit, "dispatch loop exited");

        let discarded = self.inbox.close_and_drain();
        if discarded > 0 {
            warn!(discarded, "discarding messages queued behind shutdown");
        }

        if let Err(err) = self.model.after_stop(&self.handle).await {
            error!(error = %err, "after_stop hook failed");
        }
        debug!("actor stopped");
    }

    async fn dispatch(&mut self, message: A::Message) -> Result<(), HandlerFailure> {
        match AssertUnwindSafe(self.model.handle(message, &self.handle))
            .catch_unwind()
            .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(HandlerFailure::Error(err)),
            Err(payload) => Err(HandlerFailure::Panic(panic_message(payload.as_ref()))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
