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

//! Small shared types: sink identity, actor lifecycle and failure policy.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_SINK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a message sink.
///
/// Exchanges compare subscribers by `SinkId`, never by value. Every clone of an
/// [`ActorHandle`](crate::common::ActorHandle) reports the id of the actor it
/// points at, so attaching two clones of one handle is a single subscription.
/// Ids are handed out in increasing order, which also gives exchanges a stable
/// delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SinkId(u64);

impl SinkId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        Self(NEXT_SINK_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink-{}", self.0)
    }
}

/// Where an actor is in its life.
///
/// `Idle → Running → Terminated`; there is no way back out of `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Constructed, mailbox open, no task yet.
    Idle,
    /// The dispatch task is running.
    Running,
    /// The dispatch loop has exited.
    Terminated,
}

impl Lifecycle {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Terminated => 2,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Running,
            _ => Self::Terminated,
        }
    }
}

/// Lock-free cell holding a [`Lifecycle`], shared between an actor task and its handles.
#[derive(Debug)]
pub(crate) struct LifecycleCell(AtomicU8);

impl LifecycleCell {
    pub(crate) const fn new() -> Self {
        Self(AtomicU8::new(Lifecycle::Idle.as_u8()))
    }

    pub(crate) fn get(&self) -> Lifecycle {
        Lifecycle::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, lifecycle: Lifecycle) {
        self.0.store(lifecycle.as_u8(), Ordering::Release);
    }
}

/// What the dispatch loop does when a handler returns an error or panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and keep processing the mailbox.
    #[default]
    Resilient,
    /// Log the failure and terminate the actor as if it had been closed.
    FailFast,
}
