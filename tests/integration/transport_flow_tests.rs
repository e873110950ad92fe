//! Transport recovery flows across the full loop.

use orwell_node::app::NodeService;
use orwell_node::config::NodeConfig;

use crate::mock_io::{MockIo, TraceEvent};

fn service() -> NodeService {
    NodeService::new(&NodeConfig::default())
}

fn connect_attempts(mock: &MockIo) -> Vec<String> {
    mock.trace
        .borrow()
        .iter()
        .filter_map(|e| match e {
            TraceEvent::MsgConnectAttempt(id) => Some(id.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn messaging_waits_for_the_network_link() {
    let mut mock = MockIo::new();
    mock.net_polls_until_up.set(5);
    let mut svc = service();

    svc.start(&mut mock.io);

    let trace = mock.trace.borrow();
    let net_up_at = trace
        .iter()
        .position(|e| *e == TraceEvent::NetUp)
        .expect("link came up");
    let first_connect_at = trace
        .iter()
        .position(|e| matches!(e, TraceEvent::MsgConnectAttempt(_)))
        .expect("broker connect attempted");

    assert!(
        net_up_at < first_connect_at,
        "no broker attempt before the link is up"
    );
    assert_eq!(
        trace
            .iter()
            .filter(|e| **e == TraceEvent::NetConnectRequested)
            .count(),
        1
    );
}

#[test]
fn refused_connects_retry_after_a_delay() {
    let mut mock = MockIo::new();
    mock.msg_fail_connects.set(2);
    let mut svc = service();

    svc.start(&mut mock.io);

    assert_eq!(connect_attempts(&mock).len(), 3);
    // Two retry delays of 5 s each passed on the simulated clock.
    assert!(mock.now.get() >= 10_000);
}

#[test]
fn client_ids_differ_between_attempts() {
    let mut mock = MockIo::new();
    mock.msg_fail_connects.set(3);
    let mut svc = service();

    svc.start(&mut mock.io);

    let ids = connect_attempts(&mock);
    assert_eq!(ids.len(), 4);
    for id in &ids {
        assert!(id.starts_with("Orwell-01-"), "unexpected id '{}'", id);
    }
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert!(unique.len() > 1);
}

#[test]
fn dropped_session_reconnects_and_reannounces() {
    let mut mock = MockIo::new();
    let mut svc = service();
    svc.start(&mut mock.io);
    svc.service(&mut mock.io);

    mock.msg_connected.set(false);
    svc.service(&mut mock.io);

    assert_eq!(connect_attempts(&mock).len(), 2);
    assert_eq!(
        mock.published_to("orwell/test/startup"),
        vec!["Orwell-01".to_string(), "Orwell-01".to_string()]
    );
}

#[test]
fn network_blip_does_not_touch_a_live_session() {
    let mut mock = MockIo::new();
    let mut svc = service();
    svc.start(&mut mock.io);
    svc.service(&mut mock.io);

    // Link reports down for a few polls; the broker session survives.
    mock.net_polls_until_up.set(3);
    svc.service(&mut mock.io);

    let trace = mock.trace.borrow();
    assert_eq!(
        trace
            .iter()
            .filter(|e| **e == TraceEvent::NetConnectRequested)
            .count(),
        2
    );
    assert_eq!(
        trace
            .iter()
            .filter(|e| matches!(e, TraceEvent::MsgConnectAttempt(_)))
            .count(),
        1
    );
}
