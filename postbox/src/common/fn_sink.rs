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

use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use crate::common::SinkId;
use crate::message::PostError;
use crate::traits::Sink;

/// A sink backed by a closure. Built with [`sink_fn`].
pub struct FnSink<M, F> {
    id: SinkId,
    f: F,
    _message: PhantomData<fn(M)>,
}

/// Wraps `f` as a [`Sink`] with a fresh identity.
///
/// The closure runs on the publisher's thread for every delivered message.
///
/// ```ignore
/// let printer = sink_fn(|msg: String| println!("Msg: {msg}"));
/// exchange.attach(printer);
/// ```
pub fn sink_fn<M, F>(f: F) -> FnSink<M, F>
where
    F: Fn(M) + Send + Sync,
{
    FnSink {
        id: SinkId::next(),
        f,
        _message: PhantomData,
    }
}

impl<M, F> Debug for FnSink<M, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").field("id", &self.id).finish()
    }
}

impl<M, F> Sink<M> for FnSink<M, F>
where
    F: Fn(M) + Send + Sync,
{
    #[inline]
    fn sink_id(&self) -> SinkId {
        self.id
    }

    fn accept(&self, message: M) -> Result<(), PostError> {
        (self.f)(message);
        Ok(())
    }
}
