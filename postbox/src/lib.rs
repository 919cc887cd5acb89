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

#![forbid(unsafe_code)]

//! # Postbox
//!
//! Minimal actors and publish/subscribe fan-out on top of Tokio.
//!
//! ## Key Concepts
//!
//! - **Actors (`ManagedActor`)**: user state plus a private mailbox, drained one
//!   message at a time by a dedicated task. Started once, via a type-state
//!   transition from `Idle` to `Started`.
//! - **Handles (`ActorHandle`)**: cloneable producer side of a mailbox, also used
//!   to `close` an actor and `join` it.
//! - **Sinks (`Sink`)**: anything that accepts a message. Actors, exchanges,
//!   inline actors and plain closures (`sink_fn`) all qualify.
//! - **Exchanges (`Exchange`)**: named fan-out points. Publishing delivers a copy
//!   of the message to every attached sink.
//! - **Registry (`get_exchange`)**: a process-wide map from name to exchange, so
//!   unrelated parts of a program meet at the same exchange.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use postbox::prelude::*;
//!
//! #[postbox_actor]
//! struct Printer;
//!
//! #[async_trait]
//! impl Actor for Printer {
//!     type Message = String;
//!
//!     async fn handle(&mut self, message: String, _: &ActorHandle<String>) -> anyhow::Result<()> {
//!         println!("got {message}");
//!         Ok(())
//!     }
//! }
//!
//! #[postbox_main]
//! async fn main() -> anyhow::Result<()> {
//!     let printer = spawn(Printer).await;
//!     printer.send("hello".to_string())?;
//!     printer.stop().await?;
//!     Ok(())
//! }
//! ```

/// Actor wrappers, the worker and the inline actor.
pub(crate) mod actor;

/// Handles, exchanges, the registry, identifiers and configuration.
pub(crate) mod common;

/// Mailbox deliveries and the crate error type.
pub(crate) mod message;

/// The `Actor` and `Sink` traits.
pub(crate) mod traits;

pub use message::PostError;

/// Runtime configuration loaded from `postbox/config.toml` in the XDG config dirs.
pub mod config {
    pub use crate::common::config::{DefaultsConfig, PostboxConfig, TimeoutConfig, CONFIG};
}

/// Everything an application usually needs, in one import.
///
/// ## Macros (from `postbox-macro`)
/// *   `postbox_message`, `postbox_actor`, `postbox_main`.
///
/// ## External Crates
/// *   [`async_trait::async_trait`], required to implement [`Actor`](crate::traits::Actor).
/// *   [`tokio`], used by `postbox_main`.
pub mod prelude {
    pub use postbox_macro::*;

    pub use async_trait::async_trait;
    pub use tokio;

    pub use crate::actor::{
        spawn, spawn_with, ActorConfig, Behavior, Idle, InlineActor, InlineState, Job,
        ManagedActor, Pending, Started, Worker,
    };
    pub use crate::common::{
        exchanges, get_exchange, sink_fn, ActorHandle, Exchange, ExchangeRegistry,
        FailurePolicy, FnSink, Lifecycle, SinkId, Subscription,
    };
    pub use crate::message::PostError;
    pub use crate::traits::{Actor, Sink};
}
