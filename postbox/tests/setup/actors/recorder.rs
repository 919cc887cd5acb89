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
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::trace;

use postbox::prelude::*;

pub type Log<M> = Arc<Mutex<Vec<M>>>;

/// Appends every message to a shared log, optionally pausing before each one.
#[derive(Debug)]
pub struct Recorder<M> {
    pub log: Log<M>,
    pub delay: Option<Duration>,
}

impl<M> Recorder<M> {
    pub fn new() -> (Self, Log<M>) {
        let log: Log<M> = Arc::default();
        (
            Self {
                log: log.clone(),
                delay: None,
            },
            log,
        )
    }

    pub fn slow(delay: Duration) -> (Self, Log<M>) {
        let (mut recorder, log) = Self::new();
        recorder.delay = Some(delay);
        (recorder, log)
    }
}

#[async_trait]
impl<M: Debug + Send + 'static> Actor for Recorder<M> {
    type Message = M;

    async fn handle(&mut self, message: M, myself: &ActorHandle<M>) -> anyhow::Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        trace!(actor = myself.name(), ?message, "recorded");
        self.log.lock().push(message);
        Ok(())
    }
}
