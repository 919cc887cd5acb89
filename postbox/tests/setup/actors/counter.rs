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
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use postbox::prelude::*;

use crate::setup::messages::Tally;

/// Counts `Tally::Add` and fails on `Tally::Fail`. The shared flags let a
/// test observe the model after it has moved onto the actor task.
#[postbox_actor]
pub struct Counter {
    pub count: Arc<AtomicUsize>,
    pub started: Arc<AtomicBool>,
    pub stopped: Arc<AtomicBool>,
}

#[async_trait]
impl Actor for Counter {
    type Message = Tally;

    async fn handle(&mut self, message: Tally, _myself: &ActorHandle<Tally>) -> anyhow::Result<()> {
        match message {
            Tally::Add => {
                self.count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            Tally::Fail => anyhow::bail!("asked to fail"),
        }
    }

    async fn after_start(&mut self, _myself: &ActorHandle<Tally>) -> anyhow::Result<()> {
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn after_stop(&mut self, _myself: &ActorHandle<Tally>) -> anyhow::Result<()> {
        self.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }
}
