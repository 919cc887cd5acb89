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

#[postbox_message]
enum Command {
    A(i32),
    B(String, String),
}

#[postbox_actor]
struct TaggedActor;

impl TaggedActor {
    fn do_a(&self, x: i32) {
        println!("do_a {x}");
    }

    fn do_b(&self, x: &str, y: &str) {
        println!("do_b {x} {y}");
    }
}

#[async_trait]
impl Actor for TaggedActor {
    type Message = Command;

    async fn handle(&mut self, message: Command, _myself: &ActorHandle<Command>) -> anyhow::Result<()> {
        match message {
            Command::A(x) => self.do_a(x),
            Command::B(x, y) => self.do_b(&x, &y),
        }
        Ok(())
    }
}

#[postbox_main]
async fn main() -> anyhow::Result<()> {
    let actor = spawn(TaggedActor).await;
    actor.send(Command::A(1))?;
    actor.send(Command::B("Hello".into(), "World".into()))?;
    actor.stop().await?;
    Ok(())
}
