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

use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::trace;

use crate::common::ActorHandle;
use crate::message::PostError;
use crate::traits::Actor;

/// A unit of work for a [`Worker`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// An actor that runs submitted closures one after another.
///
/// Each job runs on tokio's blocking pool, so a slow job does not stall the
/// runtime; the worker still waits for it before taking the next one.
/// Submit work through [`ActorHandle::submit`].
#[derive(Debug, Default)]
pub struct Worker {
    completed: u64,
}

impl Worker {
    /// How many jobs ran to completion.
    pub fn completed(&self) -> u64 {
        self.completed
    }
}

#[async_trait]
impl Actor for Worker {
    type Message = Job;

    async fn handle(&mut self, job: Job, _myself: &ActorHandle<Job>) -> anyhow::Result<()> {
        tokio::task::spawn_blocking(job).await?;
        self.completed += 1;
        Ok(())
    }
}

impl ActorHandle<Job> {
    /// Queues `work` on this worker and returns a handle to its eventual result.
    ///
    /// # Errors
    ///
    /// [`PostError::Closed`] if the worker no longer accepts jobs.
    pub fn submit<F, T>(&self, work: F) -> Result<Pending<T>, PostError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        self.send(Box::new(move || {
            if sender.send(work()).is_err() {
                trace!("result dropped, nobody is waiting for it");
            }
        }))?;
        Ok(Pending {
            receiver: Some(receiver),
            worker: self.name().to_string(),
        })
    }
}

/// The result of a job submitted to a [`Worker`], available once the job has run.
#[derive(Debug)]
#[must_use = "a pending result does nothing unless awaited"]
pub struct Pending<T> {
    receiver: Option<oneshot::Receiver<T>>,
    worker: String,
}

impl<T> Pending<T> {
    /// Waits for the job to finish and returns its value.
    ///
    /// # Errors
    ///
    /// [`PostError::Abandoned`] if the job will never produce a value: it
    /// panicked, or the worker shut down before reaching it.
    pub async fn result(self) -> Result<T, PostError> {
        let worker = self.worker;
        match self.receiver {
            Some(receiver) => receiver.await.map_err(|_| PostError::Abandoned { worker }),
            None => Err(PostError::Abandoned { worker }),
        }
    }

    /// Returns the value if it is ready, without waiting.
    ///
    /// `None` means the job has not finished yet. Once a value or an
    /// abandonment has been reported, later calls (and [`result`](Self::result))
    /// report [`PostError::Abandoned`].
    pub fn try_result(&mut self) -> Option<Result<T, PostError>> {
        let Some(receiver) = self.receiver.as_mut() else {
            return Some(Err(self.abandoned()));
        };
        match receiver.try_recv() {
            Ok(value) => {
                self.receiver = None;
                Some(Ok(value))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                self.receiver = None;
                Some(Err(self.abandoned()))
            }
        }
    }

    fn abandoned(&self) -> PostError {
        PostError::Abandoned {
            worker: self.worker.clone(),
        }
    }
}
