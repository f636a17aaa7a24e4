//! BDD tests for the backup restore workflow.

mod support;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use support::{CONTENT_DIFF, CONTENT_MAP, SyncWorld};
use windlass_updater::backup::{RestoreReport, SnapshotId};
use windlass_updater::engine::{CancelFlag, NullProgress, SyncEngine};
use windlass_updater::error::{Result, SyncError};
use windlass_updater::test_utils::StubReleaseClient;

/// World state threaded through the restore scenarios.
#[derive(Default)]
struct RestoreWorld {
    sync: SyncWorld,
    restore: Option<Result<RestoreReport>>,
}

#[fixture]
fn world() -> RestoreWorld {
    RestoreWorld {
        sync: SyncWorld::new(),
        restore: None,
    }
}

fn run_restore(world: &mut RestoreWorld, id: &SnapshotId) {
    let client = world.sync.client.as_ref().expect("client set");
    let engine = SyncEngine::new(
        client,
        world.sync.marker.clone(),
        world.sync.backups.clone(),
        world.sync.artifacts(),
    );
    world.restore = Some(engine.restore(id, &world.sync.target));
}

#[given("a release at version \"{version}\" serving both artifacts")]
fn given_release(world: &mut RestoreWorld, version: String) {
    world.sync.client = Some(StubReleaseClient::serving(
        &version,
        &[
            ("translate_words_map_en", CONTENT_MAP),
            ("translate_words_map_en_diff", CONTENT_DIFF),
        ],
    ));
}

#[given("the target directory already contains \"{name}\" with content \"{content}\"")]
fn given_preexisting_file(world: &mut RestoreWorld, name: String, content: String) {
    std::fs::write(world.sync.target.join(&name), content.as_bytes()).expect("seed target");
}

#[when("the updater installs")]
fn when_updater_installs(world: &mut RestoreWorld) {
    let client = world.sync.client.as_ref().expect("client set");
    let engine = SyncEngine::new(
        client,
        world.sync.marker.clone(),
        world.sync.backups.clone(),
        world.sync.artifacts(),
    );
    world.sync.result = Some(engine.install(
        &world.sync.target,
        &mut NullProgress,
        &CancelFlag::new(),
    ));
}

#[when("the latest snapshot is restored")]
fn when_latest_restored(world: &mut RestoreWorld) {
    let id = world
        .sync
        .backups
        .latest()
        .expect("list snapshots")
        .expect("a snapshot exists");
    run_restore(world, &id);
}

#[when("snapshot \"{id}\" is restored")]
fn when_named_restored(world: &mut RestoreWorld, id: String) {
    let id = SnapshotId::try_from(id.as_str()).expect("valid snapshot id");
    run_restore(world, &id);
}

#[then("the restore is complete")]
fn then_restore_complete(world: &mut RestoreWorld) {
    let restore = world.restore.as_ref().expect("restore attempted");
    match restore {
        Ok(report) => assert!(report.is_complete(), "failures: {:?}", report.failed),
        Err(e) => panic!("expected restore success, got {e}"),
    }
}

#[then("the target contains \"{name}\" with content \"{content}\"")]
fn then_target_contains(world: &mut RestoreWorld, name: String, content: String) {
    let on_disk = std::fs::read(world.sync.target.join(&name)).expect("read target file");
    assert_eq!(on_disk, content.as_bytes());
}

#[then("the installed version marker is cleared")]
fn then_marker_cleared(world: &mut RestoreWorld) {
    assert!(world.sync.marker.installed().is_lowest());
}

#[then("the restore fails with a not-found error")]
fn then_restore_not_found(world: &mut RestoreWorld) {
    let restore = world.restore.as_ref().expect("restore attempted");
    assert!(
        matches!(restore, Err(SyncError::NotFound { .. })),
        "expected NotFound, got {restore:?}"
    );
}

#[scenario(
    path = "tests/features/restore.feature",
    name = "Snapshot and restore round-trip"
)]
fn scenario_round_trip(world: RestoreWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/restore.feature",
    name = "Restoring an unknown snapshot fails"
)]
fn scenario_unknown_snapshot(world: RestoreWorld) {
    let _ = world;
}
