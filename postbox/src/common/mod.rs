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
pub use actor_handle::ActorHandle;
pub use exchange::{Exchange, Subscription};
pub use exchange_registry::{exchanges, get_exchange, ExchangeRegistry};
pub use fn_sink::{sink_fn, FnSink};
pub(crate) use types::LifecycleCell;
pub use types::{FailurePolicy, Lifecycle, SinkId};

pub mod config;

mod actor_handle;
mod exchange;
mod exchange_registry;
mod fn_sink;
mod types;
