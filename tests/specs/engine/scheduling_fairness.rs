//! §8 invariant 4 and scenario E6: the heap always returns the earliest-due
//! entry, and two workflows with overlapping ready times fire in proportion
//! to their intervals. Driven directly against the heap and engine — not
//! through the real 5s poll-quantum sleep — since what's under test is the
//! reschedule/heap-ordering logic, not wall-clock pacing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use keepwatch_adapters::notify::fake::FakeNotifier;
use keepwatch_adapters::source::fake::FakeSource;
use keepwatch_core::{
    BuildError, ConfigError, ExecutionEntry, FakeClock, RawPluginConfig, SourceId, Workflow,
};
use keepwatch_engine::{Engine, WorkflowHeap};
use keepwatch_registry::{Notifier, NotifierFactory, Registry, Source, SourceFactory};
use keepwatch_storage::SqliteContentStore;
use serde_json::Value;

struct NamedSourceFactory(HashMap<String, Arc<FakeSource>>);

impl SourceFactory for NamedSourceFactory {
    fn tag(&self) -> &'static str {
        "fake"
    }
    fn validate(&self, _raw: &RawPluginConfig) -> Result<(), ConfigError> {
        Ok(())
    }
    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Source>, BuildError> {
        Ok(self.0[&raw.name].clone())
    }
}

struct NamedNotifierFactory(HashMap<String, Arc<FakeNotifier>>);

impl NotifierFactory for NamedNotifierFactory {
    fn tag(&self) -> &'static str {
        "fake"
    }
    fn validate(&self, _raw: &RawPluginConfig) -> Result<(), ConfigError> {
        Ok(())
    }
    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Notifier>, BuildError> {
        Ok(self.0[&raw.name].clone())
    }
}

fn workflow(name: &str, interval_secs: u64) -> Arc<Workflow> {
    Arc::new(Workflow {
        name: name.to_string(),
        enabled: true,
        interval: Duration::from_secs(interval_secs),
        source: RawPluginConfig::new("fake", name, Value::Null),
        filters: vec![],
        notifiers: vec![RawPluginConfig::new("fake", name, Value::Null)],
    })
}

#[tokio::test]
async fn overlapping_workflows_fire_in_proportion_to_their_intervals() {
    let w1_source = FakeSource::new("w1", SourceId::new("Fake:w1"));
    let w2_source = FakeSource::new("w2", SourceId::new("Fake:w2"));
    let w1_notifier = FakeNotifier::new("w1");
    let w2_notifier = FakeNotifier::new("w2");

    let mut registry = Registry::new();
    registry.register_source(Box::new(NamedSourceFactory(HashMap::from([
        ("w1".to_string(), w1_source),
        ("w2".to_string(), w2_source),
    ]))));
    registry.register_notifier(Box::new(NamedNotifierFactory(HashMap::from([
        ("w1".to_string(), w1_notifier),
        ("w2".to_string(), w2_notifier),
    ]))));

    let store = Arc::new(SqliteContentStore::open_in_memory().expect("open in-memory store"));
    let t0: chrono::DateTime<chrono::Utc> = "2026-01-01T00:00:00Z".parse().expect("fixed fixture");
    let clock = Arc::new(FakeClock::new(t0));
    let engine = Engine::new(Arc::new(registry), store, clock.clone());

    let mut heap: WorkflowHeap = vec![
        ExecutionEntry::new(workflow("w1", 1), t0),
        ExecutionEntry::new(workflow("w2", 2), t0),
    ]
    .into_iter()
    .collect();

    let horizon = t0 + chrono::Duration::seconds(10);
    let mut fire_counts: HashMap<String, u32> = HashMap::new();
    let mut last_popped = t0 - chrono::Duration::seconds(1);

    for _ in 0..10_000 {
        let Some(top) = heap.peek() else { break };
        if top.next_execution >= horizon {
            break;
        }
        assert!(
            top.next_execution >= last_popped,
            "heap root must never regress"
        );
        last_popped = top.next_execution;

        if top.next_execution > clock.now() {
            clock.set(top.next_execution);
        }

        let mut entry = heap.pop().expect("peek confirmed an entry");
        let summary = engine.run_tick(&mut entry).await.expect("tick succeeds");
        *fire_counts.entry(summary.workflow).or_insert(0) += 1;
        heap.push(entry);
    }

    let w1_fires = fire_counts.get("w1").copied().unwrap_or(0);
    let w2_fires = fire_counts.get("w2").copied().unwrap_or(0);
    assert_eq!(w1_fires, 10, "1s-interval workflow fires ten times over 10s");
    assert_eq!(w2_fires, 5, "2s-interval workflow fires five times over 10s");
}
