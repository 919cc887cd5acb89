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

#![allow(dead_code)]

use std::sync::atomic::Ordering;
use std::time::Duration;

use postbox::prelude::*;
use postbox_test::prelude::*;

use crate::setup::{
    actors::{
        counter::Counter,
        recorder::{Log, Recorder},
        tagged::TaggedActor,
    },
    initialize_tracing,
    messages::{Command, Tally},
};

mod setup;

/// A single producer's messages come out in the order they went in.
#[postbox_test]
async fn messages_are_handled_in_send_order() -> anyhow::Result<()> {
    initialize_tracing();
    let (recorder, log) = Recorder::<i32>::new();
    let actor = spawn(recorder).await;

    for i in 0..100 {
        actor.send(i)?;
    }
    actor.stop().await?;

    assert_eq!(*log.lock(), (0..100).collect::<Vec<_>>());
    Ok(())
}

/// Each variant of a tagged message reaches its own method.
///
/// **Scenario:** `A(3)` then `B("x", "y")` are sent to a `TaggedActor`.
///
/// **Verification:** the actor logged `A:3` and then `B:x,y`.
#[postbox_test]
async fn tagged_actor_routes_by_variant() -> anyhow::Result<()> {
    initialize_tracing();
    let log: Log<String> = Log::default();
    let actor = spawn(TaggedActor { log: log.clone() }).await;

    actor.send(Command::A(3))?;
    actor.send(Command::B("x".into(), "y".into()))?;
    actor.close();
    actor.join().await;

    assert_eq!(*log.lock(), vec!["A:3".to_string(), "B:x,y".to_string()]);
    Ok(())
}

#[postbox_test]
async fn send_after_close_is_rejected() -> anyhow::Result<()> {
    initialize_tracing();
    let (recorder, log) = Recorder::<i32>::new();
    let actor = spawn(recorder).await;

    actor.send(1)?;
    actor.close();
    let refused = actor.send(2);
    actor.join().await;

    assert!(matches!(refused, Err(PostError::Closed { .. })));
    assert!(matches!(actor.send(3), Err(PostError::Closed { .. })));
    assert_eq!(*log.lock(), vec![1]);
    Ok(())
}

/// Closing twice is harmless, and any number of tasks may join at once.
#[postbox_test]
async fn close_is_idempotent_and_joins_are_shared() -> anyhow::Result<()> {
    initialize_tracing();
    let (recorder, log) = Recorder::<i32>::slow(Duration::from_millis(5));
    let actor = spawn(recorder).await;
    for i in 0..5 {
        actor.send(i)?;
    }

    let joiners: Vec<_> = (0..4)
        .map(|_| {
            let actor = actor.clone();
            tokio::spawn(async move { actor.join().await })
        })
        .collect();

    actor.close();
    actor.close();
    for joiner in joiners {
        joiner.await?;
    }
    // Joining a terminated actor returns immediately.
    actor.join_timeout(Duration::from_millis(10)).await?;

    assert_eq!(log.lock().len(), 5);
    assert!(actor.is_terminated());
    Ok(())
}

#[postbox_test]
async fn join_timeout_reports_a_running_actor() -> anyhow::Result<()> {
    initialize_tracing();
    let (recorder, _log) = Recorder::<i32>::new();
    let actor = spawn(recorder).await;

    let outcome = actor.join_timeout(Duration::from_millis(20)).await;
    assert!(matches!(outcome, Err(PostError::JoinTimeout { .. })));
    assert_eq!(actor.lifecycle(), Lifecycle::Running);

    actor.stop().await?;
    assert_eq!(actor.lifecycle(), Lifecycle::Terminated);
    Ok(())
}

/// **Scenario:** a `Counter` is created, fed before it starts, started, then stopped.
///
/// **Verification:**
/// - the handle reports `Idle`, `Running` and `Terminated` in turn
/// - the message queued while idle was processed
/// - both `after_start` and `after_stop` ran
#[postbox_test]
async fn lifecycle_runs_idle_running_terminated() -> anyhow::Result<()> {
    initialize_tracing();
    let counter = Counter::default();
    let (count, started, stopped) = (
        counter.count.clone(),
        counter.started.clone(),
        counter.stopped.clone(),
    );

    let idle = ManagedActor::with_config(counter, ActorConfig::new("counter"));
    assert_eq!(idle.handle().lifecycle(), Lifecycle::Idle);
    idle.handle().send(Tally::Add)?;

    let actor = idle.start().await;
    assert_eq!(actor.name(), "counter");
    assert!(!actor.is_terminated());

    actor.send(Tally::Add)?;
    actor.stop().await?;

    assert_eq!(actor.lifecycle(), Lifecycle::Terminated);
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert!(started.load(Ordering::SeqCst));
    assert!(stopped.load(Ordering::SeqCst));
    Ok(())
}

/// Every message from every producer arrives exactly once, and each
/// producer's messages keep their relative order.
#[postbox_test]
async fn concurrent_producers_keep_per_producer_order() -> anyhow::Result<()> {
    initialize_tracing();
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 250;

    let (recorder, log) = Recorder::<(usize, usize)>::new();
    let actor = spawn(recorder).await;

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let actor = actor.clone();
            tokio::spawn(async move {
                for seq in 0..PER_PRODUCER {
                    actor.send((producer, seq))?;
                    if seq % 50 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
                Ok::<_, PostError>(())
            })
        })
        .collect();
    for producer in producers {
        producer.await??;
    }
    actor.stop().await?;

    let log = log.lock();
    assert_eq!(log.len(), PRODUCERS * PER_PRODUCER);
    for producer in 0..PRODUCERS {
        let seqs: Vec<_> = log
            .iter()
            .filter(|(p, _)| *p == producer)
            .map(|(_, seq)| *seq)
            .collect();
        assert_eq!(seqs, (0..PER_PRODUCER).collect::<Vec<_>>());
    }
    Ok(())
}

#[postbox_test]
async fn resilient_actor_keeps_going_after_an_error() -> anyhow::Result<()> {
    initialize_tracing();
    let counter = Counter::default();
    let count = counter.count.clone();
    let config = ActorConfig::new("resilient").with_failure_policy(FailurePolicy::Resilient);
    let actor = spawn_with(counter, config).await;

    actor.send(Tally::Add)?;
    actor.send(Tally::Fail)?;
    actor.send(Tally::Add)?;
    actor.stop().await?;

    assert_eq!(count.load(Ordering::SeqCst), 2);
    Ok(())
}

/// Under `FailFast` the first handler error terminates the actor; whatever
/// was queued behind it is discarded and later sends are refused.
#[postbox_test]
async fn fail_fast_actor_stops_on_first_error() -> anyhow::Result<()> {
    initialize_tracing();
    let counter = Counter::default();
    let (count, stopped) = (counter.count.clone(), counter.stopped.clone());
    let config = ActorConfig::new("strict").with_failure_policy(FailurePolicy::FailFast);
    let idle = ManagedActor::with_config(counter, config);

    idle.handle().send(Tally::Add)?;
    idle.handle().send(Tally::Fail)?;
    idle.handle().send(Tally::Add)?;
    let actor = idle.start().await;

    actor.join_timeout(Duration::from_secs(5)).await?;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(stopped.load(Ordering::SeqCst));
    assert!(matches!(actor.send(Tally::Add), Err(PostError::Closed { .. })));
    Ok(())
}

/// An actor nobody can reach any more finishes its queue and stops on its own.
#[postbox_test]
async fn dropping_every_handle_stops_the_actor() -> anyhow::Result<()> {
    initialize_tracing();
    let counter = Counter::default();
    let (count, stopped) = (counter.count.clone(), counter.stopped.clone());
    let actor = spawn_with(counter, ActorConfig::new("orphan")).await;

    actor.send(Tally::Add)?;
    actor.clone().send(Tally::Add)?;
    drop(actor);

    tokio::time::timeout(Duration::from_secs(5), async {
        while !stopped.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await?;
    assert_eq!(count.load(Ordering::SeqCst), 2);
    Ok(())
}

#[postbox_test]
async fn dropping_an_idle_actor_releases_joiners() -> anyhow::Result<()> {
    initialize_tracing();
    let (recorder, _log) = Recorder::<i32>::new();
    let idle = ManagedActor::new(recorder);
    let handle = idle.handle().clone();

    let joiner = tokio::spawn({
        let handle = handle.clone();
        async move { handle.join().await }
    });
    drop(idle);

    tokio::time::timeout(Duration::from_secs(5), joiner).await??;
    assert!(handle.is_terminated());
    assert!(matches!(handle.send(1), Err(PostError::Closed { .. })));
    Ok(())
}

#[postbox_test]
async fn handles_compare_by_actor_identity() -> anyhow::Result<()> {
    initialize_tracing();
    let (first, _) = Recorder::<i32>::new();
    let (second, _) = Recorder::<i32>::new();
    let first = spawn(first).await;
    let second = spawn(second).await;

    assert_eq!(first, first.clone());
    assert_ne!(first, second);
    assert_eq!(first.id(), Sink::<i32>::sink_id(&first));

    first.stop().await?;
    second.stop().await?;
    Ok(())
}

/// N OS threads each send K messages; the actor sees exactly N×K of them.
#[postbox_test]
async fn producer_threads_lose_nothing() -> anyhow::Result<()> {
    initialize_tracing();
    const THREADS: usize = 4;
    const PER_THREAD: usize = 500;

    let (recorder, log) = Recorder::<(usize, usize)>::new();
    let actor = spawn(recorder).await;

    let threads: Vec<_> = (0..THREADS)
        .map(|thread| {
            let actor = actor.clone();
            std::thread::spawn(move || {
                (0..PER_THREAD).try_for_each(|seq| actor.send((thread, seq)))
            })
        })
        .collect();
    for thread in threads {
        thread
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"))??;
    }
    actor.stop().await?;

    let mut seen = log.lock().clone();
    seen.sort_unstable();
    let expected: Vec<_> = (0..THREADS)
        .flat_map(|thread| (0..PER_THREAD).map(move |seq| (thread, seq)))
        .collect();
    assert_eq!(seen, expected);
    Ok(())
}
