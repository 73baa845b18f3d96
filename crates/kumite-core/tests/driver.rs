use std::sync::Arc;
use std::time::Duration;

use kumite_core::app::DriverTasks;
use kumite_core::domain::{EndReason, Technique, Verdict};
use kumite_core::impls::MemoryEventSink;
use kumite_core::{Competitor, DriverBuilder, DriverError, MatchConfig, MatchEvent, MatchHandle};
use tokio::time::sleep;

fn config(duration_secs: u64, ceiling: Option<u32>) -> MatchConfig {
    MatchConfig::new(duration_secs * 1000, "AKA", "AO", ceiling).unwrap()
}

fn spawn(config: MatchConfig, sink: &MemoryEventSink) -> (MatchHandle, DriverTasks) {
    DriverBuilder::new(config)
        .event_sink(Arc::new(sink.clone()))
        .build()
        .expect("valid driver")
        .spawn()
}

#[tokio::test(start_paused = true)]
async fn clock_counts_down_in_real_time() {
    let sink = MemoryEventSink::new();
    let (handle, _tasks) = spawn(config(180, Some(8)), &sink);

    let snap = handle.start().await.unwrap();
    assert!(snap.running);
    assert_eq!(snap.remaining_ms, 180_000);

    sleep(Duration::from_secs(46)).await;
    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.remaining_ms, 134_000);
    assert_eq!(snap.clock, "02:14.00");
}

#[tokio::test(start_paused = true)]
async fn stop_freezes_the_clock() {
    let sink = MemoryEventSink::new();
    let (handle, _tasks) = spawn(config(180, Some(8)), &sink);

    handle.start().await.unwrap();
    sleep(Duration::from_secs(5)).await;
    let snap = handle.stop().await.unwrap();
    assert!(!snap.running);
    assert_eq!(snap.remaining_ms, 175_000);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot().await.unwrap().remaining_ms, 175_000);
}

#[tokio::test(start_paused = true)]
async fn time_expiry_emits_warning_then_end() {
    let sink = MemoryEventSink::new();
    let (handle, tasks) = spawn(config(30, Some(8)), &sink);

    handle.start().await.unwrap();
    sleep(Duration::from_secs(31)).await;

    let snap = handle.snapshot().await.unwrap();
    assert!(snap.ended);
    assert!(!snap.running);
    assert_eq!(snap.remaining_ms, 0);
    assert_eq!(snap.verdict, Some(Verdict::Draw));

    drop(handle);
    tasks.join().await;

    let records = sink.records().await;
    let events: Vec<_> = records.iter().map(|r| r.event).collect();
    assert_eq!(
        events,
        vec![
            MatchEvent::Warning,
            MatchEvent::End {
                reason: EndReason::TimeExpired
            }
        ]
    );
    assert!(records[0].remaining_ms < 15_000);
    assert_eq!(records[1].remaining_ms, 0);
    assert!(records.iter().all(|r| r.match_id == snap.match_id));
}

#[tokio::test(start_paused = true)]
async fn scoring_only_counts_while_running() {
    let sink = MemoryEventSink::new();
    let (handle, _tasks) = spawn(config(180, Some(8)), &sink);

    let snap = handle.score(Competitor::Aka, Technique::Ippon).await.unwrap();
    assert_eq!(snap.aka.score, 0);

    handle.start().await.unwrap();
    let snap = handle.score(Competitor::Aka, Technique::Ippon).await.unwrap();
    assert_eq!(snap.aka.score, 3);
}

#[tokio::test(start_paused = true)]
async fn mercy_rule_ends_the_bout() {
    let sink = MemoryEventSink::new();
    let (handle, tasks) = spawn(config(180, Some(8)), &sink);

    handle.start().await.unwrap();
    handle.add_score(Competitor::Ao, 1).await.unwrap();
    for _ in 0..3 {
        handle.score(Competitor::Aka, Technique::Ippon).await.unwrap();
    }
    let snap = handle.snapshot().await.unwrap();
    assert!(snap.ended);
    assert_eq!((snap.aka.score, snap.ao.score), (9, 1));
    assert_eq!(snap.verdict_text.as_deref(), Some("AKA (Red)"));

    drop(handle);
    tasks.join().await;
    let events: Vec<_> = sink.records().await.into_iter().map(|r| r.event).collect();
    assert_eq!(
        events,
        vec![MatchEvent::End {
            reason: EndReason::ScoreCeiling
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn hansoku_disqualifies_immediately() {
    let sink = MemoryEventSink::new();
    let (handle, _tasks) = spawn(config(180, None), &sink);

    handle.start().await.unwrap();
    handle.add_score(Competitor::Aka, 3).await.unwrap();
    let snap = handle.award_hansoku(Competitor::Aka).await.unwrap();

    assert!(snap.ended);
    assert!(!snap.running);
    assert_eq!(snap.aka.hansoku, 1);
    assert_eq!(
        snap.verdict_text.as_deref(),
        Some("AO (Blue) - AKA Disqualified")
    );

    sleep(Duration::from_secs(5)).await;
    assert_eq!(
        handle.snapshot().await.unwrap().remaining_ms,
        snap.remaining_ms
    );
}

#[tokio::test(start_paused = true)]
async fn new_match_starts_fresh_with_new_id() {
    let sink = MemoryEventSink::new();
    let (handle, _tasks) = spawn(config(180, Some(8)), &sink);

    handle.start().await.unwrap();
    handle.set_chui_level(Competitor::Ao, 3).await.unwrap();
    let before = handle.snapshot().await.unwrap();
    assert_eq!(before.aka.score, 1);

    let fresh = handle.new_match(config(60, None)).await.unwrap();
    assert_ne!(fresh.match_id, before.match_id);
    assert_eq!(fresh.remaining_ms, 60_000);
    assert_eq!(fresh.aka.score, 0);
    assert_eq!(fresh.ao.hansoku_chui, 0);
    assert!(!fresh.running);
    assert_eq!(fresh.summary, "1 minute match • No score ceiling");
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_ticks() {
    let sink = MemoryEventSink::new();
    let (handle, _tasks) = spawn(config(180, Some(8)), &sink);
    let mut updates = handle.subscribe();

    handle.start().await.unwrap();
    sleep(Duration::from_secs(1)).await;

    assert!(updates.has_changed().unwrap());
    assert!(updates.borrow_and_update().remaining_ms < 180_000);
    assert_eq!(handle.latest().remaining_ms, updates.borrow().remaining_ms);
}

#[tokio::test]
async fn aborted_driver_reports_closed() {
    let sink = MemoryEventSink::new();
    let (handle, tasks) = spawn(config(180, Some(8)), &sink);

    tasks.abort().await;
    assert!(matches!(handle.start().await, Err(DriverError::Closed)));
}
