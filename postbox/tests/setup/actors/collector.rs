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
use parking_lot::Mutex;

use postbox::prelude::*;

/// A plain sink that keeps what it is given, or refuses everything.
#[derive(Debug)]
pub struct Collector<M> {
    id: SinkId,
    refuse: bool,
    seen: Mutex<Vec<M>>,
}

impl<M: Clone> Collector<M> {
    pub fn new() -> Self {
        Self {
            id: SinkId::next(),
            refuse: false,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A collector whose `accept` always fails, as a closed actor's would.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new()
        }
    }

    pub fn seen(&self) -> Vec<M> {
        self.seen.lock().clone()
    }
}

impl<M: Send> Sink<M> for Collector<M> {
    fn sink_id(&self) -> SinkId {
        self.id
    }

    fn accept(&self, message: M) -> Result<(), PostError> {
        if self.refuse {
            return Err(PostError::Closed {
                actor: "collector".to_string(),
            });
        }
        self.seen.lock().push(message);
        Ok(())
    }
}
