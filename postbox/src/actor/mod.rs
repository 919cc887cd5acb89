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

//! Actors and the machinery that runs them.
//!
//! *   [`ManagedActor`] wraps an [`Actor`](crate::traits::Actor) with its mailbox.
//!     It moves from [`Idle`] to [`Started`] exactly once.
//! *   [`Worker`] is a ready-made actor that runs closures and hands back
//!     [`Pending`] results.
//! *   [`InlineActor`] runs a [`Behavior`] synchronously on the sender's thread.

pub use actor_config::ActorConfig;
pub use inline::{Behavior, InlineActor, InlineState};
pub use managed_actor::{Idle, ManagedActor, Started};
pub use worker::{Job, Pending, Worker};

use crate::common::ActorHandle;
use crate::traits::Actor;

mod actor_config;
mod inline;
mod managed_actor;
mod worker;

/// Builds an actor around `model` with the default configuration and starts it.
pub async fn spawn<A: Actor>(model: A) -> ActorHandle<A::Message> {
    ManagedActor::new(model).start().await
}

/// Like [`spawn`], with an explicit configuration.
pub async fn spawn_with<A: Actor>(model: A, config: ActorConfig) -> ActorHandle<A::Message> {
    ManagedActor::with_config(model, config).start().await
}
