//! Fake collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use netprobe::probe::types::PROBE_TARGETS;
use netprobe::probe::{
    DependencyCheck, IpVersion, OutputParser, ParsedProbe, ProbeExecutor, ProbeFailure,
    ProbeRequest, ProbeStats,
};
use netprobe::status::{EventSink, ProbeEvent, StatusManager};
use netprobe::RoundRunner;

pub const PACKETS: u32 = 3;
pub const INTERVAL: Duration = Duration::from_secs(600);

/// Scripted reply for one probe.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Clean,
    Loss(f64),
    Exit(i32),
    NoExit,
}

/// Executor that answers from a script and records every request.
pub struct FakeExecutor {
    defaults: Mutex<HashMap<IpVersion, Reply>>,
    overrides: Mutex<HashMap<(IpVersion, String), Reply>>,
    calls: Mutex<Vec<ProbeRequest>>,
    delay: Duration,
}

impl FakeExecutor {
    pub fn new(ipv4: Reply, ipv6: Reply) -> Self {
        Self::with_delay(ipv4, ipv6, Duration::ZERO)
    }

    pub fn with_delay(ipv4: Reply, ipv6: Reply, delay: Duration) -> Self {
        let defaults = HashMap::from([(IpVersion::V4, ipv4), (IpVersion::V6, ipv6)]);
        Self {
            defaults: Mutex::new(defaults),
            overrides: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            delay,
        }
    }

    /// Script one target/family pair.
    pub fn set(&self, ip_version: IpVersion, target: &str, reply: Reply) {
        self.overrides
            .lock()
            .unwrap()
            .insert((ip_version, target.to_string()), reply);
    }

    /// Script every target of one family.
    pub fn set_family(&self, ip_version: IpVersion, reply: Reply) {
        self.defaults.lock().unwrap().insert(ip_version, reply);
        self.overrides
            .lock()
            .unwrap()
            .retain(|(v, _), _| *v != ip_version);
    }

    pub fn calls(&self) -> Vec<ProbeRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn reply_for(&self, request: &ProbeRequest) -> Reply {
        let key = (request.ip_version, request.target.clone());
        if let Some(reply) = self.overrides.lock().unwrap().get(&key) {
            return *reply;
        }
        self.defaults.lock().unwrap()[&request.ip_version]
    }
}

#[async_trait]
impl ProbeExecutor for FakeExecutor {
    async fn execute(&self, request: ProbeRequest) -> Result<String, ProbeFailure> {
        let reply = self.reply_for(&request);
        self.calls.lock().unwrap().push(request);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match reply {
            Reply::Clean => Ok("finished 0".to_string()),
            Reply::Loss(loss) => Ok(format!("finished {loss}")),
            Reply::Exit(code) => Err(ProbeFailure::exited(code, "connect: Network is unreachable")),
            Reply::NoExit => Err(ProbeFailure::no_exit_code("spawn failed")),
        }
    }
}

/// Parses `"<status> [loss]"`.
pub struct FakeParser;

impl OutputParser for FakeParser {
    fn parse(&self, raw: &str) -> ParsedProbe {
        let mut parts = raw.split_whitespace();
        let status = parts.next().unwrap_or("failed").to_string();
        let stats = parts
            .next()
            .and_then(|loss| loss.parse().ok())
            .map(|loss| ProbeStats { loss });
        ParsedProbe { status, stats }
    }
}

pub struct FakeDependency(pub bool);

#[async_trait]
impl DependencyCheck for FakeDependency {
    async fn is_satisfied(&self) -> bool {
        self.0
    }
}

/// Dependency check that takes `delay` to answer.
pub struct SlowDependency {
    pub present: bool,
    pub delay: Duration,
}

#[async_trait]
impl DependencyCheck for SlowDependency {
    async fn is_satisfied(&self) -> bool {
        tokio::time::sleep(self.delay).await;
        self.present
    }
}

/// Sink that keeps every published event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ProbeEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProbeEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: ProbeEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn runner(executor: &Arc<FakeExecutor>) -> RoundRunner {
    RoundRunner::new(executor.clone(), Arc::new(FakeParser), PACKETS)
}

/// Manager wired to fakes, plus handles to inspect them.
pub struct Harness {
    pub manager: Arc<StatusManager>,
    pub executor: Arc<FakeExecutor>,
    pub sink: Arc<RecordingSink>,
}

pub fn harness(executor: FakeExecutor, dependency_present: bool) -> Harness {
    harness_with_dependency(executor, Arc::new(FakeDependency(dependency_present)))
}

/// Like [`harness`] but with a caller-supplied dependency check.
pub fn harness_with_dependency(
    executor: FakeExecutor,
    dependency: Arc<dyn DependencyCheck>,
) -> Harness {
    let executor = Arc::new(executor);
    let sink = Arc::new(RecordingSink::default());
    let manager = Arc::new(StatusManager::new(
        runner(&executor),
        dependency,
        sink.clone(),
        INTERVAL,
    ));
    Harness {
        manager,
        executor,
        sink,
    }
}

pub fn targets() -> [&'static str; 3] {
    PROBE_TARGETS
}
