// SPDX-License-Identifier: GPL-3.0-only

use storage_contracts::protocol::entity_list_to_value;
use storage_contracts::{ErrorNumber, Submission, Value, WireEntity};
use storage_testing::{ScriptedTransport, fixtures};
use storage_types::{Disk, Flags, MemberType, Pool, RaidType};

#[tokio::test]
async fn pool_list_decodes_every_pool() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let second = Pool {
        id: "POO2".to_string(),
        name: "Pool 2".to_string(),
        ..fixtures::pool()
    };
    plugin.reply("pools", entity_list_to_value(&[fixtures::pool(), second.clone()]));

    let pools = conn.pool_list(Flags::NONE).await.expect("pools");

    assert_eq!(pools, vec![fixtures::pool(), second]);
}

#[tokio::test]
async fn one_bad_element_fails_the_whole_list() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply(
        "pools",
        Value::Array(vec![fixtures::pool().to_value(), fixtures::volume().to_value()]),
    );

    let err = conn.pool_list(Flags::NONE).await.expect_err("wrong class");

    assert_eq!(err.number, ErrorNumber::InternalError);
    assert_eq!(err.message, "Unexpected type");
}

#[tokio::test]
async fn pool_create_completes_inline() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply(
        "pool_create",
        Value::Array(vec![Value::Null, fixtures::pool().to_value()]),
    );

    let submission = conn
        .pool_create(
            &fixtures::system(),
            "Pool 1",
            1024 * 1024 * 1024,
            RaidType::Raid5,
            MemberType::DiskSas,
            Flags::NONE,
        )
        .await
        .expect("pool create");

    assert_eq!(submission, Submission::Completed(fixtures::pool()));
    let call = plugin.last_call().expect("call");
    assert_eq!(call.param("pool_name"), Some(&Value::from("Pool 1")));
    assert_eq!(call.param("raid_type"), Some(&Value::from(RaidType::Raid5.code())));
    assert_eq!(
        call.param("member_type"),
        Some(&Value::from(MemberType::DiskSas.code()))
    );
    assert_eq!(call.param("system"), Some(&fixtures::system().to_value()));
}

#[tokio::test]
async fn empty_disk_list_never_reaches_the_plugin() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");

    let err = conn
        .pool_create_from_disks(
            &fixtures::system(),
            "Pool 1",
            &[],
            RaidType::Raid1,
            Flags::NONE,
        )
        .await
        .expect_err("empty disks");

    assert_eq!(err.number, ErrorNumber::InvalidArgument);
    assert_eq!(plugin.methods(), vec!["startup"]);
    assert!(conn.last_error().is_none());
}

#[tokio::test]
async fn rejected_arguments_clear_an_earlier_error() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.fail_with_code("pools", 2, "plugin bug");

    conn.pool_list(Flags::NONE).await.expect_err("plugin failure");
    assert!(conn.last_error().is_some());

    let err = conn
        .pool_create(
            &fixtures::system(),
            "Pool 2",
            0,
            RaidType::Raid1,
            MemberType::DiskSas,
            Flags::NONE,
        )
        .await
        .expect_err("zero size");

    assert_eq!(err.number, ErrorNumber::InvalidArgument);
    assert!(conn.last_error().is_none());
    assert_eq!(plugin.methods(), vec!["startup", "pools"]);
}

#[tokio::test]
async fn pool_from_disks_sends_each_disk() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let disks = vec![fixtures::disk("DISK-1"), fixtures::disk("DISK-2")];
    plugin.reply("pool_create_from_disks", "JOB-11");

    let submission = conn
        .pool_create_from_disks(
            &fixtures::system(),
            "Pool 1",
            &disks,
            RaidType::Raid1,
            Flags::NONE,
        )
        .await
        .expect("submit");

    assert_eq!(submission.job().map(|j| j.as_str()), Some("JOB-11"));
    assert_eq!(
        plugin.last_call().expect("call").param("disks"),
        Some(&entity_list_to_value(&disks))
    );
}

#[tokio::test]
async fn disk_without_id_is_an_invalid_argument() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let orphan = Disk {
        id: String::new(),
        ..fixtures::disk("DISK-1")
    };

    let err = conn
        .pool_create_from_disks(
            &fixtures::system(),
            "Pool 1",
            &[orphan],
            RaidType::Raid1,
            Flags::NONE,
        )
        .await
        .expect_err("empty disk id");

    assert_eq!(err.number, ErrorNumber::InvalidArgument);
    assert_eq!(plugin.call_count(), 1);
}

#[tokio::test]
async fn empty_volume_list_never_reaches_the_plugin() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");

    let err = conn
        .pool_create_from_volumes(
            &fixtures::system(),
            "Pool 1",
            &[],
            RaidType::Raid0,
            Flags::NONE,
        )
        .await
        .expect_err("empty volumes");

    assert_eq!(err.number, ErrorNumber::InvalidArgument);
    assert_eq!(plugin.call_count(), 1);
}

#[tokio::test]
async fn pool_from_pool_and_delete() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let child = Pool {
        id: "POO3".to_string(),
        name: "child".to_string(),
        ..fixtures::pool()
    };
    plugin
        .reply("pool_create_from_pool", child.to_value())
        .reply("pool_delete", Value::Null);

    let created = conn
        .pool_create_from_pool(
            &fixtures::system(),
            "child",
            &fixtures::pool(),
            1024 * 1024,
            Flags::NONE,
        )
        .await
        .expect("create")
        .completed()
        .expect("inline result");
    assert_eq!(created, child);

    let deleted = conn.pool_delete(&created, Flags::NONE).await.expect("delete");
    assert_eq!(deleted, Submission::Completed(()));
    plugin.verify().expect("script consumed");
}

#[tokio::test]
async fn reply_with_neither_job_nor_result_is_an_error() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply("pool_create", Value::Array(vec![Value::Null, Value::Null]));

    let err = conn
        .pool_create(
            &fixtures::system(),
            "Pool 1",
            4096,
            RaidType::Unknown,
            MemberType::Unknown,
            Flags::NONE,
        )
        .await
        .expect_err("empty reply");

    assert_eq!(err.number, ErrorNumber::InternalError);
}

#[tokio::test]
async fn raid4_pools_are_refused_before_any_call() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");

    let err = conn
        .pool_create(
            &fixtures::system(),
            "Pool 4",
            1024 * 1024 * 1024,
            RaidType::Raid4,
            MemberType::Disk,
            Flags::NONE,
        )
        .await
        .expect_err("raid 4 from size");
    assert_eq!(err.number, ErrorNumber::InvalidArgument);

    let err = conn
        .pool_create_from_disks(
            &fixtures::system(),
            "Pool 4",
            &[fixtures::disk("DISK-1"), fixtures::disk("DISK-2")],
            RaidType::Raid4,
            Flags::NONE,
        )
        .await
        .expect_err("raid 4 from disks");
    assert_eq!(err.number, ErrorNumber::InvalidArgument);

    let err = conn
        .pool_create_from_volumes(
            &fixtures::system(),
            "Pool 4",
            &[fixtures::volume()],
            RaidType::Raid4,
            Flags::NONE,
        )
        .await
        .expect_err("raid 4 from volumes");
    assert_eq!(err.number, ErrorNumber::InvalidArgument);

    assert_eq!(plugin.methods(), vec!["startup"]);
}
