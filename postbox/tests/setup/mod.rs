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
use std::sync::Once;

use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub mod actors;
pub mod messages;

static INIT: Once = Once::new();

/// Installs a global subscriber that writes every test's trace output to
/// `logs/postbox_tests.txt`. Safe to call from every test.
pub fn initialize_tracing() {
    INIT.call_once(|| {
        std::fs::create_dir_all("logs").expect("could not create logs dir");

        let file_appender = RollingFileAppender::new(Rotation::NEVER, "logs", "postbox_tests.txt");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Keep the writer alive until the process exits.
        Box::leak(Box::new(guard));

        let filter = EnvFilter::new("info")
            .add_directive("postbox::actor::managed_actor::started[wake]=trace".parse().unwrap())
            .add_directive("postbox::common::actor_handle=trace".parse().unwrap())
            .add_directive("postbox::common::exchange=debug".parse().unwrap())
            .add_directive("postbox=debug".parse().unwrap())
            .add_directive("actor_tests=trace".parse().unwrap())
            .add_directive("exchange_tests=trace".parse().unwrap());

        let subscriber = FmtSubscriber::builder()
            .with_span_events(FmtSpan::NONE)
            .with_max_level(Level::TRACE)
            .compact()
            .with_line_number(true)
            .without_time()
            .with_target(true)
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");
    });
}
