// SPDX-License-Identifier: GPL-3.0-only

use storage_contracts::protocol::entity_list_to_value;
use storage_contracts::{ErrorNumber, Submission, Value, WireEntity};
use storage_testing::{ScriptedTransport, fixtures};
use storage_types::{FileSystem, Flags, Snapshot};

#[tokio::test]
async fn fs_create_then_poll_to_completion() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let fs = fixtures::file_system();
    plugin
        .reply("fs_create", Value::Array(vec![Value::from("JOB-FS"), Value::Null]))
        .reply(
            "job_status",
            Value::Array(vec![Value::from(2i32), Value::from(100u8), fs.to_value()]),
        );

    let submission = conn
        .fs_create(&fixtures::pool(), &fs.name, fs.total_space, Flags::NONE)
        .await
        .expect("create");
    let job = submission.job().expect("job started");
    let progress = conn.job_status_fs(job, Flags::NONE).await.expect("poll");

    assert_eq!(progress.result, Some(fs));
    assert_eq!(
        plugin.calls()[1].param("name"),
        Some(&Value::from("home"))
    );
}

#[tokio::test]
async fn zero_sized_resize_is_refused() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");

    let err = conn
        .fs_resize(&fixtures::file_system(), 0, Flags::NONE)
        .await
        .expect_err("zero size");

    assert_eq!(err.number, ErrorNumber::InvalidArgument);
    assert_eq!(plugin.call_count(), 1);
}

#[tokio::test]
async fn clone_from_snapshot() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let clone = FileSystem {
        id: "FS-2".to_string(),
        name: "home-clone".to_string(),
        ..fixtures::file_system()
    };
    plugin
        .reply("fs_clone", clone.to_value())
        .reply("file_clone", Value::Null);

    let created = conn
        .fs_clone(
            &fixtures::file_system(),
            "home-clone",
            Some(&fixtures::snapshot()),
            Flags::NONE,
        )
        .await
        .expect("clone");
    assert_eq!(created, Submission::Completed(clone));
    let call = plugin.last_call().expect("clone call");
    assert_eq!(call.param("src_fs"), Some(&fixtures::file_system().to_value()));
    assert_eq!(call.param("snapshot"), Some(&fixtures::snapshot().to_value()));

    let copied = conn
        .file_clone(&fixtures::file_system(), "a.txt", "b.txt", None, Flags::NONE)
        .await
        .expect("file clone");
    assert_eq!(copied, Submission::Completed(()));
    let call = plugin.last_call().expect("file clone call");
    assert_eq!(call.param("src_file_name"), Some(&Value::from("a.txt")));
    assert_eq!(call.param("dest_file_name"), Some(&Value::from("b.txt")));
    assert_eq!(call.param("snapshot"), Some(&Value::Null));
}

#[tokio::test]
async fn snapshot_lifecycle() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let fs = fixtures::file_system();
    let snapshot = fixtures::snapshot();
    let files = vec!["etc/passwd".to_string()];
    plugin
        .reply("fs_snapshot_create", snapshot.to_value())
        .reply("fs_snapshots", entity_list_to_value(&[snapshot.clone()]))
        .reply("fs_snapshot_revert", "JOB-R")
        .reply("fs_snapshot_delete", Value::Null);

    let created = conn
        .fs_snapshot_create(&fs, "nightly", Some(files.as_slice()), Flags::NONE)
        .await
        .expect("snapshot")
        .completed()
        .expect("inline");
    assert_eq!(created, snapshot);
    assert!(created.created_at().is_some());

    let listed = conn.fs_snapshot_list(&fs, Flags::NONE).await.expect("list");
    assert_eq!(listed, vec![snapshot.clone()]);

    let revert = conn
        .fs_snapshot_revert(&fs, &snapshot, None, None, true, Flags::NONE)
        .await
        .expect("revert");
    assert!(revert.is_started());
    let call = plugin.last_call().expect("revert call");
    assert_eq!(call.param("all_files"), Some(&Value::from(true)));
    assert_eq!(call.param("files"), Some(&Value::Null));

    let deleted = conn
        .fs_snapshot_delete(&fs, &snapshot, Flags::NONE)
        .await
        .expect("delete");
    assert_eq!(deleted, Submission::Completed(()));
    plugin.verify().expect("script consumed");
}

#[tokio::test]
async fn snapshot_without_id_is_an_invalid_ss() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let snapshot = Snapshot {
        id: String::new(),
        ..fixtures::snapshot()
    };

    let err = conn
        .fs_snapshot_delete(&fixtures::file_system(), &snapshot, Flags::NONE)
        .await
        .expect_err("empty id");

    assert_eq!(err.number, ErrorNumber::InvalidSs);
}

#[tokio::test]
async fn child_dependency_with_file_list() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let files = vec!["a".to_string(), "b".to_string()];
    plugin
        .reply("fs_child_dependency", false)
        .reply("fs_child_dependency_rm", Value::Null)
        .reply("fs_delete", "JOB-D");

    let fs = fixtures::file_system();
    assert!(
        !conn
            .fs_child_dependency(&fs, Some(files.as_slice()), Flags::NONE)
            .await
            .expect("dependency")
    );
    assert_eq!(
        plugin.last_call().expect("call").param("files"),
        Some(&Value::Array(vec![Value::from("a"), Value::from("b")]))
    );
    let removed = conn
        .fs_child_dependency_rm(&fs, None, Flags::NONE)
        .await
        .expect("dependency rm");
    assert_eq!(removed, Submission::Completed(()));
    let deleted = conn.fs_delete(&fs, Flags::NONE).await.expect("delete");
    assert!(deleted.is_started());
}

#[tokio::test]
async fn non_boolean_dependency_reply_is_rejected() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply("fs_child_dependency", 1u8);

    let err = conn
        .fs_child_dependency(&fixtures::file_system(), None, Flags::NONE)
        .await
        .expect_err("integer reply");

    assert_eq!(err.number, ErrorNumber::InternalError);
}

#[tokio::test]
async fn fs_list_decodes() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply("fs", entity_list_to_value(&[fixtures::file_system()]));

    let list = conn.fs_list(Flags::NONE).await.expect("fs");

    assert_eq!(list, vec![fixtures::file_system()]);
}
