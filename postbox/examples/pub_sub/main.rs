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

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use postbox::prelude::*;

#[postbox_actor]
struct CountingActor {
    seen: Arc<AtomicUsize>,
}

#[async_trait]
impl Actor for CountingActor {
    type Message = String;

    async fn handle(&mut self, message: String, myself: &ActorHandle<String>) -> anyhow::Result<()> {
        let n = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
        println!("{} received #{n}: {message}", myself.name());
        Ok(())
    }
}

/// Publishes to whatever is listening on the named exchange. The publisher
/// never learns who the subscribers are.
fn announce(words: &[&str]) -> anyhow::Result<()> {
    let exchange = get_exchange::<String>("announcements")?;
    for word in words {
        exchange.publish((*word).to_string());
    }
    Ok(())
}

#[postbox_main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("postbox=debug").init();

    let exchange = get_exchange::<String>("announcements")?;
    let counter = CountingActor::default();
    let seen = counter.seen.clone();
    let counting = spawn_with(counter, ActorConfig::new("counter")).await;
    let printer = sink_fn(|message: String| println!("Msg: {message}"));

    {
        let _subscription = exchange.subscribe([counting.clone()]);
        exchange.attach(printer);
        announce(&["Hello", "World"])?;
    }

    // the counter was detached when the scope ended; only the printer remains
    announce(&["Goodbye"])?;

    counting.stop().await?;
    println!("counter saw {} messages", seen.load(Ordering::SeqCst));
    Ok(())
}
