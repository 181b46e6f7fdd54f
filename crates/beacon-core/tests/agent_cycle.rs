//! End-to-end: a scripted controller drives a full agent through
//! put → get → configure, then stops it.

use std::sync::Arc;
use std::time::Duration;

use beacon_core::codec::decode_results;
use beacon_core::domain::TaskResult;
use beacon_core::impls::ScriptedTransport;
use beacon_core::ports::FixedDwell;
use beacon_core::{AgentBuilder, AgentConfig};
use serde_json::{Value, json};

const PUT_ID: &str = "6f2c1a4e-0000-4000-8000-000000000001";
const GET_ID: &str = "6f2c1a4e-0000-4000-8000-000000000002";
const CONF_ID: &str = "6f2c1a4e-0000-4000-8000-000000000003";
const STOP_ID: &str = "6f2c1a4e-0000-4000-8000-000000000004";

fn uploaded(transport: &ScriptedTransport) -> Vec<TaskResult> {
    transport
        .requests()
        .iter()
        .flat_map(|body| {
            let value: Value = serde_json::from_str(body).unwrap();
            decode_results(value.as_object().unwrap()).unwrap()
        })
        .collect()
}

fn config() -> AgentConfig {
    AgentConfig::default().with_poll_interval(Duration::from_millis(10))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn runs_tasks_and_reports_results_next_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("note.txt");
    let path = file.to_str().unwrap();

    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(
        json!({
            "t1": {"type": "put", "id": PUT_ID, "path": path, "contents": "hello"},
            "t2": {"type": "get", "id": GET_ID, "path": path},
            "t3": {"type": "configure", "id": CONF_ID, "dwell": 0.02, "running": true}
        })
        .to_string(),
    );

    let agent = AgentBuilder::new(config())
        .transport(transport.clone())
        .dwell_sampler(FixedDwell(Duration::from_millis(200)))
        .build()
        .unwrap();
    let state = agent.config_state().clone();

    let controller = {
        let transport = transport.clone();
        tokio::spawn(async move {
            // wait for the three results, then stop the agent
            loop {
                if uploaded(&transport).len() >= 3 {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            transport.push_response(
                json!([{"type": "configure", "id": STOP_ID, "dwell": 1.0, "running": false}])
                    .to_string(),
            );
        })
    };

    tokio::time::timeout(Duration::from_secs(10), agent.run())
        .await
        .expect("agent stops")
        .unwrap();
    controller.await.unwrap();

    let results = uploaded(&transport);
    let by_id = |id: &str| {
        results
            .iter()
            .find(|r| r.id.to_string() == id)
            .cloned()
            .unwrap()
    };
    assert_eq!(by_id(PUT_ID).contents, "Wrote file.");
    assert_eq!(by_id(GET_ID).contents, "hello");
    assert!(by_id(GET_ID).success);
    assert_eq!(by_id(CONF_ID).contents, "Configured.");

    // the stop's own result is never uploaded
    assert!(results.iter().all(|r| r.id.to_string() != STOP_ID));
    assert!(!state.is_running());
    assert_eq!(state.snapshot().mean_dwell(), 1.0);
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "hello");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stop_in_first_batch_ends_after_one_exchange() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(
        json!({"s": {"type": "configure", "id": STOP_ID, "dwell": "5", "running": "false"}})
            .to_string(),
    );

    let agent = AgentBuilder::new(config().with_initial_mean_dwell(3600.0))
        .transport(transport.clone())
        .dwell_sampler(FixedDwell(Duration::from_secs(3600)))
        .build()
        .unwrap();
    let sink = agent.sink().clone();
    let state = agent.config_state().clone();

    tokio::time::timeout(Duration::from_secs(10), agent.run())
        .await
        .expect("stop interrupts the dwell")
        .unwrap();

    assert_eq!(transport.requests(), vec!["{}"]);
    assert_eq!(state.snapshot().mean_dwell(), 5.0);
    // executed, but buffered forever
    assert_eq!(sink.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn transport_outage_does_not_lose_results() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_response(
        json!({"x": {"type": "get", "id": GET_ID, "path": "/no/such/file"}}).to_string(),
    );
    for _ in 0..3 {
        transport.push_failure("connection refused");
    }

    let agent = AgentBuilder::new(config())
        .transport(transport.clone())
        .dwell_sampler(FixedDwell(Duration::from_millis(200)))
        .build()
        .unwrap();
    let state = agent.config_state().clone();

    let controller = {
        let transport = transport.clone();
        tokio::spawn(async move {
            while uploaded_ok(&transport).is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            transport.push_response(
                json!([{"type": "configure", "id": STOP_ID, "dwell": 1, "running": false}])
                    .to_string(),
            );
        })
    };

    tokio::time::timeout(Duration::from_secs(10), agent.run())
        .await
        .expect("agent stops")
        .unwrap();
    controller.await.unwrap();
    assert!(!state.is_running());

    let delivered = uploaded_ok(&transport);
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].contents, "Couldn't open file.");
    assert!(!delivered[0].success);
}

/// Results from requests whose exchange succeeded (the scripted failures
/// are the 2nd..4th exchanges; anything they carried was retried).
fn uploaded_ok(transport: &ScriptedTransport) -> Vec<TaskResult> {
    transport
        .requests()
        .iter()
        .enumerate()
        .filter(|(i, _)| !(1..=3).contains(i))
        .flat_map(|(_, body)| {
            let value: Value = serde_json::from_str(body).unwrap();
            decode_results(value.as_object().unwrap()).unwrap()
        })
        .collect()
}
