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

fn add(x: i64, y: i64) -> i64 {
    x + y
}

#[postbox_main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("postbox=info").init();

    let worker = spawn_with(Worker::default(), ActorConfig::new("adder")).await;

    let sum = worker.submit(|| add(2, 3))?;
    let product = worker.submit(|| (1..=5).product::<i64>())?;

    println!("Got: {}", sum.result().await?);
    println!("Got: {}", product.result().await?);

    worker.stop().await?;
    Ok(())
}
