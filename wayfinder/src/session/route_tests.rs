//! Unit tests for the route session.

use super::*;
use crate::client::{ClientError, RouteClient};
use crate::domain::{Coordinate, Route};
use crate::polyline;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

type RouteReply = Result<String, ClientError>;

const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

fn origin() -> Coordinate {
    Coordinate::new(35.7219, 51.3347).unwrap()
}

fn dest(lat: f64) -> Coordinate {
    Coordinate::new(lat, 51.4148).unwrap()
}

fn drain(rx: &mut mpsc::UnboundedReceiver<RouteEvent>) -> Vec<SessionState<Route>> {
    let mut states = Vec::new();
    while let Ok(RouteEvent::StateChanged(state)) = rx.try_recv() {
        states.push(state);
    }
    states
}

fn reference_route() -> Route {
    polyline::decode_route(REFERENCE).unwrap().unwrap()
}

/// Route client whose responses are released by the test, keyed by
/// destination latitude. Ungated requests never complete.
#[derive(Default)]
struct GatedRoutes {
    calls: Mutex<usize>,
    gates: Mutex<HashMap<u64, oneshot::Receiver<RouteReply>>>,
}

impl GatedRoutes {
    fn gate(&self, destination: Coordinate) -> oneshot::Sender<RouteReply> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .insert(destination.latitude.to_bits(), rx);
        tx
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl RouteClient for GatedRoutes {
    async fn get_route(&self, _origin: Coordinate, destination: Coordinate) -> RouteReply {
        *self.calls.lock().unwrap() += 1;
        let gate = self
            .gates
            .lock()
            .unwrap()
            .remove(&destination.latitude.to_bits());
        match gate {
            Some(rx) => rx.await.unwrap_or(Err(ClientError::Timeout)),
            None => std::future::pending().await,
        }
    }
}

fn session(client: &Arc<GatedRoutes>) -> RouteSession<GatedRoutes> {
    RouteSession::new(Arc::clone(client))
}

#[tokio::test]
async fn route_is_decoded_and_loaded() {
    let client = Arc::new(GatedRoutes::default());
    let gate = client.gate(dest(35.7137));
    let mut routes = session(&client);
    let mut events = routes.subscribe();

    routes.get_route(origin(), dest(35.7137));
    assert!(routes.state().is_loading());

    gate.send(Ok(REFERENCE.to_string())).unwrap();
    assert_eq!(routes.process_next().await, Some(Disposition::Applied));

    let route = routes.current_route().unwrap();
    assert_eq!(route.len(), 3);
    assert_eq!(route.origin(), Coordinate::from_degrees(38.5, -120.2));
    assert_eq!(client.call_count(), 1);
    assert_eq!(
        drain(&mut events),
        vec![SessionState::Loading, SessionState::Loaded(reference_route())]
    );
}

#[tokio::test]
async fn empty_polyline_is_no_route_found() {
    let client = Arc::new(GatedRoutes::default());
    let gate = client.gate(dest(35.7137));
    let mut routes = session(&client);

    routes.get_route(origin(), dest(35.7137));
    gate.send(Ok(String::new())).unwrap();
    routes.settle().await;

    assert_eq!(
        routes.state(),
        &SessionState::Failed(SessionError::NoRouteFound)
    );
    assert!(routes.current_route().is_none());
}

#[tokio::test]
async fn empty_response_clears_previous_route() {
    let client = Arc::new(GatedRoutes::default());
    let first = client.gate(dest(35.7137));
    let second = client.gate(dest(35.8));
    let mut routes = session(&client);
    let mut events = routes.subscribe();

    routes.get_route(origin(), dest(35.7137));
    first.send(Ok(REFERENCE.to_string())).unwrap();
    routes.settle().await;
    assert!(routes.current_route().is_some());

    routes.get_route(origin(), dest(35.8));
    second.send(Ok(String::new())).unwrap();
    routes.settle().await;

    assert!(routes.current_route().is_none());
    assert_eq!(
        drain(&mut events),
        vec![
            SessionState::Loading,
            SessionState::Loaded(reference_route()),
            SessionState::Loading,
            SessionState::Failed(SessionError::NoRouteFound),
        ]
    );
}

#[tokio::test]
async fn malformed_polyline_fails_without_partial_route() {
    let client = Arc::new(GatedRoutes::default());
    let gate = client.gate(dest(35.7137));
    let mut routes = session(&client);

    routes.get_route(origin(), dest(35.7137));
    // Two good pairs, then a dangling continuation byte.
    gate.send(Ok("_p~iF~ps|U_ulLnnqC_".to_string())).unwrap();
    routes.settle().await;

    assert!(matches!(
        routes.state(),
        SessionState::Failed(SessionError::MalformedPolyline(_))
    ));
    assert!(routes.current_route().is_none());
}

#[tokio::test]
async fn client_failure_becomes_request_failed() {
    let client = Arc::new(GatedRoutes::default());
    let gate = client.gate(dest(35.7137));
    let mut routes = session(&client);

    routes.get_route(origin(), dest(35.7137));
    gate.send(Err(ClientError::RateLimited)).unwrap();
    routes.settle().await;

    assert_eq!(
        routes.state(),
        &SessionState::Failed(SessionError::RequestFailed(ClientError::RateLimited))
    );
}

#[tokio::test]
async fn second_request_supersedes_first() {
    let client = Arc::new(GatedRoutes::default());
    let gate_a = client.gate(dest(35.1));
    let gate_b = client.gate(dest(35.2));
    let mut routes = session(&client);
    let mut events = routes.subscribe();

    routes.get_route(origin(), dest(35.1));
    routes.get_route(origin(), dest(35.2));

    let route_b = polyline::encode(&[origin(), dest(35.2)]);
    gate_b.send(Ok(route_b.clone())).unwrap();
    assert_eq!(routes.process_next().await, Some(Disposition::Applied));

    gate_a.send(Ok(REFERENCE.to_string())).unwrap();
    assert_eq!(routes.process_next().await, Some(Disposition::Superseded));

    let expected = polyline::decode_route(&route_b).unwrap().unwrap();
    assert_eq!(routes.current_route(), Some(&expected));
    assert_eq!(
        drain(&mut events),
        vec![
            SessionState::Loading,
            SessionState::Loading,
            SessionState::Loaded(expected),
        ]
    );
}

#[tokio::test]
async fn stale_failure_is_ignored() {
    let client = Arc::new(GatedRoutes::default());
    let gate_a = client.gate(dest(35.1));
    let gate_b = client.gate(dest(35.2));
    let mut routes = session(&client);

    routes.get_route(origin(), dest(35.1));
    routes.get_route(origin(), dest(35.2));

    gate_a.send(Err(ClientError::Timeout)).unwrap();
    assert_eq!(routes.process_next().await, Some(Disposition::Superseded));
    assert!(routes.state().is_loading());

    gate_b.send(Ok(REFERENCE.to_string())).unwrap();
    routes.settle().await;
    assert_eq!(routes.current_route(), Some(&reference_route()));
}

#[tokio::test]
async fn clear_removes_route_and_supersedes_pending() {
    let client = Arc::new(GatedRoutes::default());
    let first = client.gate(dest(35.1));
    let second = client.gate(dest(35.2));
    let mut routes = session(&client);

    routes.get_route(origin(), dest(35.1));
    first.send(Ok(REFERENCE.to_string())).unwrap();
    routes.settle().await;

    routes.get_route(origin(), dest(35.2));
    routes.clear();
    assert!(routes.state().is_idle());
    assert!(routes.current_route().is_none());

    second.send(Ok(REFERENCE.to_string())).unwrap();
    assert_eq!(routes.process_next().await, Some(Disposition::Superseded));
    assert!(routes.state().is_idle());
}

#[tokio::test]
async fn apply_checks_generation() {
    let client = Arc::new(GatedRoutes::default());
    let mut routes = session(&client);

    routes.get_route(origin(), dest(35.1));
    let stale = routes.generation();
    routes.get_route(origin(), dest(35.2));
    let current = routes.generation();
    assert!(current > stale);

    assert_eq!(
        routes.apply(Completion {
            generation: stale,
            result: Ok(REFERENCE.to_string()),
        }),
        Disposition::Superseded
    );
    assert!(routes.state().is_loading());

    assert_eq!(
        routes.apply(Completion {
            generation: current,
            result: Ok(REFERENCE.to_string()),
        }),
        Disposition::Applied
    );
    assert_eq!(routes.current_route(), Some(&reference_route()));
}

struct CrashingRoutes;

impl RouteClient for CrashingRoutes {
    async fn get_route(&self, _origin: Coordinate, _destination: Coordinate) -> RouteReply {
        panic!("routing backend crashed");
    }
}

#[tokio::test]
async fn panicking_client_fails_current_route() {
    let mut routes = RouteSession::new(Arc::new(CrashingRoutes));
    let mut events = routes.subscribe();

    routes.get_route(origin(), dest(35.7137));
    assert_eq!(routes.process_next().await, Some(Disposition::Applied));

    assert!(matches!(
        routes.state(),
        SessionState::Failed(SessionError::RequestFailed(ClientError::TaskFailed { .. }))
    ));
    assert!(routes.current_route().is_none());
    assert_eq!(drain(&mut events).len(), 2);
}
