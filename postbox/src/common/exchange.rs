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

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{instrument, trace, warn};

use crate::common::SinkId;
use crate::message::PostError;
use crate::traits::Sink;

/// Map of attached sinks keyed by identity.
type Subscribers<M> = Mutex<HashMap<SinkId, Arc<dyn Sink<M>>>>;

/// Fans published messages out to every currently attached sink.
///
/// The exchange owns no task: [`publish`](Exchange::publish) delivers on the
/// caller's thread, one `accept` per sink. Producers only need to know the
/// exchange, not who is listening.
///
/// The subscriber set is guarded by a mutex that is only held while the set is
/// mutated or copied. `publish` snapshots the set and delivers outside the lock,
/// so sinks may attach, detach or publish re-entrantly, and a concurrent
/// `detach` can never disturb an in-flight delivery loop.
pub struct Exchange<M> {
    id: SinkId,
    name: String,
    subscribers: Subscribers<M>,
}

impl<M> Debug for Exchange<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("subscribers", &self.subscribers.lock().len())
            .finish()
    }
}

impl<M: Clone + Send + 'static> Exchange<M> {
    /// Creates an empty exchange.
    ///
    /// Most code should look exchanges up by name through
    /// [`ExchangeRegistry::get`](crate::common::ExchangeRegistry::get) or
    /// [`get_exchange`](crate::common::get_exchange) instead.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SinkId::next(),
            name: name.into(),
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// The exchange's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds `sink` to the subscriber set.
    ///
    /// Attaching a sink whose id is already present leaves the set unchanged.
    pub fn attach<S>(&self, sink: S)
    where
        S: Sink<M> + 'static,
    {
        self.insert(sink);
    }

    /// `true` if the sink was not attached before.
    #[instrument(skip(self, sink), fields(exchange = %self.name, sink = %sink.sink_id()))]
    fn insert<S>(&self, sink: S) -> bool
    where
        S: Sink<M> + 'static,
    {
        let id = sink.sink_id();
        let mut subscribers = self.subscribers.lock();
        if subscribers.contains_key(&id) {
            trace!("sink already attached");
            return false;
        }
        subscribers.insert(id, Arc::new(sink));
        trace!(count = subscribers.len(), "sink attached");
        true
    }

    /// Removes `sink` from the subscriber set.
    ///
    /// # Errors
    ///
    /// [`PostError::NotSubscribed`] if the sink is not attached.
    pub fn detach<S>(&self, sink: &S) -> Result<(), PostError>
    where
        S: Sink<M> + ?Sized,
    {
        self.detach_id(sink.sink_id())
    }

    /// Removes the sink with the given id from the subscriber set.
    ///
    /// # Errors
    ///
    /// [`PostError::NotSubscribed`] if no sink with that id is attached.
    #[instrument(skip(self), fields(exchange = %self.name))]
    pub fn detach_id(&self, id: SinkId) -> Result<(), PostError> {
        match self.subscribers.lock().remove(&id) {
            Some(_) => {
                trace!(sink = %id, "sink detached");
                Ok(())
            }
            None => Err(PostError::NotSubscribed {
                sink: id,
                exchange: self.name.clone(),
            }),
        }
    }

    /// Delivers `message` to every sink attached when the call begins.
    ///
    /// Each sink gets exactly one copy, in ascending [`SinkId`] order. A sink
    /// that refuses the message (typically a closed actor) is logged and
    /// skipped; the rest still receive it. Sinks attached while the call is in
    /// flight are not included.
    ///
    /// Returns how many sinks accepted the message.
    pub fn publish(&self, message: M) -> usize {
        let targets = self.snapshot();
        trace!(exchange = %self.name, count = targets.len(), "publishing");

        let mut delivered = 0;
        let mut remaining = targets.len();
        let mut message = Some(message);
        for sink in targets {
            remaining -= 1;
            let copy = if remaining == 0 {
                message.take()
            } else {
                message.clone()
            };
            let Some(copy) = copy else { break };
            match sink.accept(copy) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    warn!(exchange = %self.name, sink = %sink.sink_id(), error = %err, "sink refused message");
                }
            }
        }
        delivered
    }

    /// Alias for [`publish`](Self::publish).
    #[inline]
    pub fn send(&self, message: M) -> usize {
        self.publish(message)
    }

    /// Attaches every sink in `sinks` for the lifetime of the returned guard.
    ///
    /// Dropping the [`Subscription`] detaches all of them again, whether the
    /// scope ends normally, through `?`, or by unwinding from a panic:
    ///
    /// ```ignore
    /// {
    ///     let _subscription = exchange.subscribe([printer.clone(), counter.clone()]);
    ///     exchange.publish(Msg::Tick);
    /// } // both detached here
    /// ```
    ///
    /// A sink that was already attached when `subscribe` was called is left
    /// alone: it stays attached after the guard drops.
    pub fn subscribe<I, S>(&self, sinks: I) -> Subscription<'_, M>
    where
        I: IntoIterator<Item = S>,
        S: Sink<M> + 'static,
    {
        let ids = sinks
            .into_iter()
            .filter_map(|sink| {
                let id = sink.sink_id();
                self.insert(sink).then_some(id)
            })
            .collect();
        Subscription { exchange: self, ids }
    }

    /// `true` if a sink with this id is attached.
    pub fn is_attached(&self, id: SinkId) -> bool {
        self.subscribers.lock().contains_key(&id)
    }

    /// Number of attached sinks.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Ids of the attached sinks, in delivery order.
    pub fn subscriber_ids(&self) -> Vec<SinkId> {
        let mut ids: Vec<SinkId> = self.subscribers.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn snapshot(&self) -> Vec<Arc<dyn Sink<M>>> {
        let subscribers = self.subscribers.lock();
        let mut targets: Vec<(SinkId, Arc<dyn Sink<M>>)> = subscribers
            .iter()
            .map(|(id, sink)| (*id, Arc::clone(sink)))
            .collect();
        drop(subscribers);
        targets.sort_unstable_by_key(|(id, _)| *id);
        targets.into_iter().map(|(_, sink)| sink).collect()
    }
}

/// Exchanges are sinks themselves, so one exchange can feed another.
impl<M: Clone + Send + 'static> Sink<M> for Exchange<M> {
    #[inline]
    fn sink_id(&self) -> SinkId {
        self.id
    }

    fn accept(&self, message: M) -> Result<(), PostError> {
        self.publish(message);
        Ok(())
    }
}

/// Scoped subscription returned by [`Exchange::subscribe`].
///
/// Holds its sinks attached until dropped.
#[must_use = "dropping a Subscription immediately detaches its sinks"]
pub struct Subscription<'a, M: Clone + Send + 'static> {
    exchange: &'a Exchange<M>,
    ids: Vec<SinkId>,
}

impl<M: Clone + Send + 'static> Subscription<'_, M> {
    /// Ids of the sinks this subscription will detach.
    pub fn ids(&self) -> &[SinkId] {
        &self.ids
    }
}

impl<M: Clone + Send + 'static> Debug for Subscription<'_, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("exchange", &self.exchange.name)
            .field("ids", &self.ids)
            .finish()
    }
}

impl<M: Clone + Send + 'static> Drop for Subscription<'_, M> {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            // Already detached inside the scope.
            if let Err(err) = self.exchange.detach_id(id) {
                trace!(error = %err, "subscription cleanup skipped sink");
            }
        }
    }
}
