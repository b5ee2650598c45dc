//! Quorum and classification behaviour of whole probe rounds.

use std::sync::Arc;
use std::time::Duration;

use netprobe::probe::IpVersion;
use netprobe::status::{ProbeEvent, Status};

mod common;
use common::{harness, runner, targets, FakeExecutor, Reply, PACKETS};

#[tokio::test]
async fn test_ipv4_clean_ipv6_lossy_is_ready() {
    let h = harness(FakeExecutor::new(Reply::Clean, Reply::Loss(33.3)), true);
    h.manager.start().await;

    assert!(h.manager.ipv4_supported());
    assert!(!h.manager.ipv6_supported());
    assert_eq!(h.manager.status(), Status::Ready);
}

#[tokio::test]
async fn test_all_targets_exit_nonzero_is_failed() {
    let h = harness(FakeExecutor::new(Reply::Exit(1), Reply::Exit(2)), true);
    h.manager.start().await;

    assert!(!h.manager.ipv4_supported());
    assert!(!h.manager.ipv6_supported());
    assert_eq!(h.manager.status(), Status::PingTestFailed);
    assert_eq!(h.executor.call_count(), 6);
}

#[tokio::test]
async fn test_two_of_three_meets_quorum() {
    let executor = Arc::new(FakeExecutor::new(Reply::Clean, Reply::Clean));
    executor.set(IpVersion::V4, targets()[1], Reply::Exit(1));

    let verdict = runner(&executor).evaluate(IpVersion::V4).await;
    assert_eq!(verdict.success_count, 2);
    assert!(verdict.passed);
}

#[tokio::test]
async fn test_one_of_three_fails_quorum() {
    let executor = Arc::new(FakeExecutor::new(Reply::NoExit, Reply::Clean));
    executor.set(IpVersion::V4, targets()[0], Reply::Clean);

    let verdict = runner(&executor).evaluate(IpVersion::V4).await;
    assert_eq!(verdict.success_count, 1);
    assert!(!verdict.passed);
}

#[tokio::test]
async fn test_ready_iff_either_family_passes() {
    let cases = [
        (Reply::Clean, Reply::Clean, Status::Ready),
        (Reply::Clean, Reply::NoExit, Status::Ready),
        (Reply::Loss(100.0), Reply::Clean, Status::Ready),
        (Reply::Loss(0.5), Reply::Exit(1), Status::PingTestFailed),
    ];

    for (ipv4, ipv6, expected) in cases {
        let h = harness(FakeExecutor::new(ipv4, ipv6), true);
        h.manager.start().await;
        assert_eq!(h.manager.status(), expected, "ipv4={ipv4:?} ipv6={ipv6:?}");
        assert_eq!(
            h.manager.status() == Status::Ready,
            h.manager.ipv4_supported() || h.manager.ipv6_supported()
        );
    }
}

#[tokio::test]
async fn test_requests_cover_every_target_and_family() {
    let h = harness(FakeExecutor::new(Reply::Clean, Reply::Clean), true);
    h.manager.start().await;

    let calls = h.executor.calls();
    assert_eq!(calls.len(), 6);
    for version in [IpVersion::V4, IpVersion::V6] {
        for target in targets() {
            let request = calls
                .iter()
                .find(|r| r.ip_version == version && r.target == target)
                .expect("missing probe request");
            assert_eq!(request.packets, PACKETS);
            assert!(!request.in_progress_updates);
        }
    }
}

#[tokio::test]
async fn test_round_publishes_status_then_flags() {
    let h = harness(FakeExecutor::new(Reply::Clean, Reply::Loss(10.0)), true);
    h.manager.start().await;

    assert_eq!(
        h.sink.events(),
        vec![
            ProbeEvent::Status(Status::Ready),
            ProbeEvent::Ipv4Supported(true),
            ProbeEvent::Ipv6Supported(false),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_probes_run_concurrently() {
    let delay = Duration::from_secs(5);
    let executor = Arc::new(FakeExecutor::with_delay(Reply::Clean, Reply::Clean, delay));

    let started = tokio::time::Instant::now();
    let report = runner(&executor).run_round().await;

    // Six 5s probes in parallel take one delay, not six.
    let elapsed = started.elapsed();
    assert!(elapsed >= delay && elapsed < delay * 2, "elapsed {elapsed:?}");
    assert!(report.ipv4.passed && report.ipv6.passed);
}

#[tokio::test(start_paused = true)]
async fn test_failures_do_not_short_circuit_siblings() {
    let executor = Arc::new(FakeExecutor::with_delay(
        Reply::Clean,
        Reply::Clean,
        Duration::from_secs(1),
    ));
    executor.set(IpVersion::V6, targets()[0], Reply::NoExit);
    executor.set(IpVersion::V6, targets()[2], Reply::Exit(1));

    let report = runner(&executor).run_round().await;

    assert_eq!(executor.call_count(), 6);
    assert_eq!(report.ipv4.success_count, 3);
    assert_eq!(report.ipv6.success_count, 1);
    assert!(!report.ipv6.passed);
}
