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

use crate::common::config::CONFIG;
use crate::common::FailurePolicy;

/// Construction-time settings for a [`ManagedActor`](crate::actor::ManagedActor).
///
/// Values not set explicitly come from the `[defaults]` table of the loaded
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorConfig {
    name: String,
    failure_policy: FailurePolicy,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            name: CONFIG.defaults.actor_name.clone(),
            failure_policy: CONFIG.defaults.failure_policy,
        }
    }
}

impl ActorConfig {
    /// Creates a configuration for an actor with the given diagnostic name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Overrides how the actor reacts when a handler fails.
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}
