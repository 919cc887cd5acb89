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
use postbox::prelude::*;

use crate::setup::actors::recorder::Log;
use crate::setup::messages::Command;

/// Routes each `Command` variant to its own method.
#[postbox_actor(no_default)]
pub struct TaggedActor {
    pub log: Log<String>,
}

impl TaggedActor {
    fn do_a(&mut self, x: i32) {
        self.log.lock().push(format!("A:{x}"));
    }

    fn do_b(&mut self, x: String, y: String) {
        self.log.lock().push(format!("B:{x},{y}"));
    }
}

#[async_trait]
impl Actor for TaggedActor {
    type Message = Command;

    async fn handle(&mut self, message: Command, _myself: &ActorHandle<Command>) -> anyhow::Result<()> {
        match message {
            Command::A(x) => self.do_a(x),
            Command::B(x, y) => self.do_b(x, y),
        }
        Ok(())
    }
}
