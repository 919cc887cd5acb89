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

// actor models need Default and Debug; the macro derives them
#[postbox_actor]
struct PrintActor {
    printed: usize,
}

#[async_trait]
impl Actor for PrintActor {
    type Message = String;

    async fn handle(&mut self, message: String, _myself: &ActorHandle<String>) -> anyhow::Result<()> {
        self.printed += 1;
        println!("Got: {message}");
        Ok(())
    }

    async fn after_stop(&mut self, myself: &ActorHandle<String>) -> anyhow::Result<()> {
        println!("{} printed {} messages", myself.name(), self.printed);
        Ok(())
    }
}

#[postbox_main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("postbox=debug").init();

    let printer = spawn_with(PrintActor::default(), ActorConfig::new("printer")).await;
    printer.send("Hello".to_string())?;
    printer.send("World".to_string())?;

    // close enqueues the shutdown marker behind the two messages; stop then waits
    printer.stop().await?;
    Ok(())
}
