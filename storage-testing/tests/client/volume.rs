// SPDX-License-Identifier: GPL-3.0-only

use storage_contracts::protocol::entity_list_to_value;
use storage_contracts::{ErrorNumber, Submission, Value, WireEntity};
use storage_testing::{ScriptedTransport, fixtures};
use storage_types::{BlockRange, Flags, Pool, ProvisionType, ReplicationType, Volume};

#[tokio::test]
async fn zero_size_volume_never_reaches_the_plugin() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");

    let err = conn
        .volume_create(&fixtures::pool(), "lun", 0, ProvisionType::Thin, Flags::NONE)
        .await
        .expect_err("zero size");

    assert_eq!(err.number, ErrorNumber::InvalidArgument);
    assert_eq!(plugin.methods(), vec!["startup"]);
}

#[tokio::test]
async fn pool_without_id_is_an_invalid_pool() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let pool = Pool {
        id: String::new(),
        ..fixtures::pool()
    };

    let err = conn
        .volume_create(&pool, "lun", 4096, ProvisionType::Thin, Flags::NONE)
        .await
        .expect_err("empty pool id");

    assert_eq!(err.number, ErrorNumber::InvalidPool);
    assert_eq!(plugin.call_count(), 1);
}

#[tokio::test]
async fn volume_create_sends_named_params() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply("volume_create", fixtures::volume().to_value());

    let created = conn
        .volume_create(
            &fixtures::pool(),
            "lun-data",
            100 * 1024 * 1024,
            ProvisionType::Thin,
            Flags::NONE,
        )
        .await
        .expect("create");

    assert_eq!(created, Submission::Completed(fixtures::volume()));
    let call = plugin.last_call().expect("call");
    assert_eq!(call.param("pool"), Some(&fixtures::pool().to_value()));
    assert_eq!(call.param("volume_name"), Some(&Value::from("lun-data")));
    assert_eq!(call.param("size_bytes"), Some(&Value::from(100u64 * 1024 * 1024)));
    assert_eq!(call.param("provisioning"), Some(&Value::from(1i32)));
}

#[tokio::test]
async fn resize_to_the_same_block_count_is_refused_locally() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let volume = fixtures::volume();

    let exact = conn
        .volume_resize(&volume, volume.size_bytes(), Flags::NONE)
        .await
        .expect_err("same size");
    assert_eq!(exact.number, ErrorNumber::VolumeSameSize);

    // Rounds down to the current block count.
    let partial = conn
        .volume_resize(&volume, volume.size_bytes() + 100, Flags::NONE)
        .await
        .expect_err("same block count");
    assert_eq!(partial.number, ErrorNumber::VolumeSameSize);

    assert_eq!(plugin.call_count(), 1);
}

#[tokio::test]
async fn resize_by_a_block_is_sent() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let volume = fixtures::volume();
    plugin.reply("volume_resize", "JOB-9");

    let submission = conn
        .volume_resize(&volume, volume.size_bytes() + 512, Flags::NONE)
        .await
        .expect("resize");

    assert!(submission.is_started());
    assert_eq!(
        plugin.last_call().expect("call").param("new_size_bytes"),
        Some(&Value::from(volume.size_bytes() + 512))
    );
}

#[tokio::test]
async fn replicate_without_pool_sends_null() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let replica = Volume {
        id: "VOL-2".to_string(),
        name: "lun-copy".to_string(),
        ..fixtures::volume()
    };
    plugin.reply("volume_replicate", replica.to_value());

    let result = conn
        .volume_replicate(
            None,
            ReplicationType::Clone,
            &fixtures::volume(),
            "lun-copy",
            Flags::NONE,
        )
        .await
        .expect("replicate");

    assert_eq!(result.completed(), Some(replica));
    let call = plugin.last_call().expect("call");
    assert_eq!(call.param("pool"), Some(&Value::Null));
    assert_eq!(call.param("rep_type"), Some(&Value::from(2i32)));
    assert_eq!(call.param("volume_src"), Some(&fixtures::volume().to_value()));
}

#[tokio::test]
async fn replicate_range_needs_ranges() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let src = fixtures::volume();
    let dest = Volume {
        id: "VOL-2".to_string(),
        ..fixtures::volume()
    };

    let err = conn
        .volume_replicate_range(ReplicationType::Copy, &src, &dest, &[], Flags::NONE)
        .await
        .expect_err("no ranges");
    assert_eq!(err.number, ErrorNumber::InvalidArgument);

    let ranges = [BlockRange::new(0, 0, 128), BlockRange::new(1024, 2048, 64)];
    plugin.reply("volume_replicate_range", Value::Null);
    let done = conn
        .volume_replicate_range(ReplicationType::Copy, &src, &dest, &ranges, Flags::NONE)
        .await
        .expect("copy range");

    assert_eq!(done, Submission::Completed(()));
    assert_eq!(
        plugin.last_call().expect("call").param("ranges"),
        Some(&entity_list_to_value(&ranges))
    );
}

#[tokio::test]
async fn replicate_range_block_size_must_be_numeric() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin
        .reply("volume_replicate_range_block_size", 512u32)
        .reply("volume_replicate_range_block_size", Value::Null);

    let size = conn
        .volume_replicate_range_block_size(&fixtures::system(), Flags::NONE)
        .await
        .expect("block size");
    assert_eq!(size, 512);

    let err = conn
        .volume_replicate_range_block_size(&fixtures::system(), Flags::NONE)
        .await
        .expect_err("null reply");
    assert_eq!(err.number, ErrorNumber::InternalError);
}

#[tokio::test]
async fn delete_online_offline_and_dependencies() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    let volume = fixtures::volume();
    plugin
        .reply("volume_offline", Value::Null)
        .reply("volume_online", Value::Null)
        .reply("volume_child_dependency", true)
        .reply("volume_child_dependency_rm", "JOB-5")
        .reply("volume_delete", Value::Null);

    conn.volume_offline(&volume, Flags::NONE).await.expect("offline");
    conn.volume_online(&volume, Flags::NONE).await.expect("online");
    assert!(
        conn.volume_child_dependency(&volume, Flags::NONE)
            .await
            .expect("dependency")
    );
    let rm = conn
        .volume_child_dependency_rm(&volume, Flags::NONE)
        .await
        .expect("dependency rm");
    assert_eq!(rm.job().map(|j| j.as_str()), Some("JOB-5"));
    let deleted = conn.volume_delete(&volume, Flags::NONE).await.expect("delete");
    assert_eq!(deleted, Submission::Completed(()));

    plugin.verify().expect("script consumed");
}

#[tokio::test]
async fn missing_volume_surfaces_not_found() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.fail_with_code("volume_delete", 205, "Volume not found");

    let err = conn
        .volume_delete(&fixtures::volume(), Flags::NONE)
        .await
        .expect_err("not found");

    assert_eq!(err.number, ErrorNumber::NotFoundVolume);
    assert_eq!(err.message, "Volume not found");
}

#[tokio::test]
async fn disk_list_decodes_status_bits() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply("disks", entity_list_to_value(&[fixtures::disk("DISK-1")]));

    let disks = conn.disk_list(Flags::NONE).await.expect("disks");

    assert_eq!(disks.len(), 1);
    assert!(disks[0].is_free());
}
