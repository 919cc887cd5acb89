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

use std::time::Duration;

use crate::common::SinkId;

/// Errors returned synchronously to callers that misuse an actor, exchange or registry.
///
/// Handler failures never show up here; they stay on the actor's own task and
/// are reported through `tracing`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostError {
    /// The actor was closed (or has terminated) and accepts no further messages.
    #[error("actor `{actor}` is closed to new messages")]
    Closed {
        /// Name of the actor.
        actor: String,
    },

    /// An inline actor was sent a message before it was primed.
    #[error("actor `{actor}` has not been started")]
    NotStarted {
        /// Name of the actor.
        actor: String,
    },

    /// An inline actor was primed a second time.
    #[error("actor `{actor}` was already started")]
    AlreadyPrimed {
        /// Name of the actor.
        actor: String,
    },

    /// `detach` named a sink that is not attached.
    #[error("{sink} is not subscribed to exchange `{exchange}`")]
    NotSubscribed {
        /// The sink that was asked to leave.
        sink: SinkId,
        /// Name of the exchange.
        exchange: String,
    },

    /// A bounded join expired before the actor terminated.
    #[error("timed out after {after:?} waiting for actor `{actor}` to terminate")]
    JoinTimeout {
        /// Name of the actor.
        actor: String,
        /// How long the caller waited.
        after: Duration,
    },

    /// A submitted job was dropped before it produced a result.
    #[error("worker `{worker}` dropped the job before producing a result")]
    Abandoned {
        /// Name of the worker.
        worker: String,
    },

    /// A registry lookup found an exchange with this name carrying another message type.
    #[error("exchange `{exchange}` already exists for a message type other than `{expected}`")]
    ExchangeTypeMismatch {
        /// Name of the exchange.
        exchange: String,
        /// The message type the caller asked for.
        expected: &'static str,
    },
}
