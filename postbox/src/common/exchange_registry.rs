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

use std::any::{type_name, Any};
use std::sync::Arc;

use dashmap::DashMap;
use lazy_static::lazy_static;
use tracing::{instrument, trace};

use crate::common::Exchange;
use crate::message::PostError;

type ErasedExchange = Arc<dyn Any + Send + Sync>;

/// Name → [`Exchange`] map with atomic create-on-first-lookup.
///
/// Any number of threads may look up the same name concurrently; exactly one
/// exchange is created and all of them get that instance. A process-wide
/// registry is available through [`exchanges`] and [`get_exchange`]; separate
/// registries can be created for isolation (tests, sub-systems).
#[derive(Debug, Default)]
pub struct ExchangeRegistry {
    exchanges: DashMap<String, ErasedExchange>,
}

impl ExchangeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the exchange called `name`, creating it if this is the first lookup.
    ///
    /// # Errors
    ///
    /// [`PostError::ExchangeTypeMismatch`] if an exchange with this name already
    /// exists for a different message type.
    #[instrument(skip(self), fields(message_type = type_name::<M>()))]
    pub fn get<M>(&self, name: &str) -> Result<Arc<Exchange<M>>, PostError>
    where
        M: Clone + Send + 'static,
    {
        let erased = self
            .exchanges
            .entry(name.to_string())
            .or_insert_with(|| {
                trace!("creating exchange");
                let exchange: ErasedExchange = Arc::new(Exchange::<M>::new(name));
                exchange
            })
            .value()
            .clone();

        erased
            .downcast::<Exchange<M>>()
            .map_err(|_| PostError::ExchangeTypeMismatch {
                exchange: name.to_string(),
                expected: type_name::<M>(),
            })
    }

    /// `true` if an exchange called `name` has been created.
    pub fn contains(&self, name: &str) -> bool {
        self.exchanges.contains_key(name)
    }

    /// Forgets the exchange called `name`. Returns whether one was registered.
    ///
    /// Holders of the exchange keep a working instance; the next lookup of the
    /// name creates a fresh, empty one.
    #[instrument(skip(self))]
    pub fn remove(&self, name: &str) -> bool {
        self.exchanges.remove(name).is_some()
    }

    /// Number of registered exchanges.
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// `true` if no exchange has been created.
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Names of all registered exchanges, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.exchanges.iter().map(|entry| entry.key().clone()).collect();
        names.sort_unstable();
        names
    }
}

lazy_static! {
    static ref EXCHANGES: ExchangeRegistry = ExchangeRegistry::new();
}

/// The process-wide registry. Its exchanges live until removed or until the process exits.
pub fn exchanges() -> &'static ExchangeRegistry {
    &EXCHANGES
}

/// Looks `name` up in the process-wide registry, creating the exchange on first use.
///
/// # Errors
///
/// [`PostError::ExchangeTypeMismatch`] if `name` is already used for another message type.
pub fn get_exchange<M>(name: &str) -> Result<Arc<Exchange<M>>, PostError>
where
    M: Clone + Send + 'static,
{
    EXCHANGES.get(name)
}
