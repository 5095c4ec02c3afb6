//! 端對端測試 - 需要系統上有 ffmpeg，沒有就跳過
//!
//! 驗證從規劃、ffmpeg 匯出到設定檔寫入的完整本地流程

use std::fs;
use std::path::Path;
use std::process::Command;

use boot_display_export::component::boot_manifest::BootManifest;
use boot_display_export::component::frame_export::{
    ExportError, FrameExporter, ScaleMode, plan,
};
use boot_display_export::tools::{get_video_duration, resolve_transcoder};

fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// 用 lavfi 測試訊號產生一段 3 秒的影片
fn generate_test_video(path: &Path) {
    let status = Command::new("ffmpeg")
        .args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=3:size=320x240:rate=30",
            "-pix_fmt",
            "yuv420p",
            "-y",
        ])
        .arg(path)
        .status()
        .expect("無法執行 ffmpeg");
    assert!(status.success(), "測試影片產生失敗");
}

#[test]
fn test_full_local_pipeline() {
    if !ffmpeg_available() {
        println!("跳過測試：系統上沒有 ffmpeg");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("test_video.mp4");
    generate_test_video(&video);

    let transcoder = resolve_transcoder(None).unwrap();

    let duration = get_video_duration(&transcoder, &video).unwrap();
    assert!((duration - 3.0).abs() < 0.2, "影片長度應接近 3 秒");

    // 3 秒 × 12 fps → floor(36) - 1 = 35 張
    let plan = plan(duration, 0.0, Some(3.0), 12, false, ScaleMode::Stretch).unwrap();
    assert_eq!(plan.frame_count, 35);

    let export_dir = dir.path().join("export");
    let exporter = FrameExporter::new(&transcoder.ffmpeg, &export_dir);
    let frame_set = exporter.export(&video, &plan).unwrap();

    assert_eq!(frame_set.frames.len(), 35, "應匯出計畫數量的畫格");
    assert_eq!(
        frame_set.frames[0].file_name().unwrap().to_string_lossy(),
        "pic_000.jpg",
        "編號應從 000 開始"
    );
    assert_eq!(
        frame_set.frames[34].file_name().unwrap().to_string_lossy(),
        "pic_034.jpg"
    );

    let manifest_path = BootManifest::new(480, 800, plan.fps)
        .write(&export_dir)
        .unwrap();
    let content = fs::read_to_string(manifest_path).unwrap();
    assert_eq!(
        content,
        "width: 480\nheight: 800\nfps: 12\nparts: 1\n{ part0 }\n"
    );
}

#[test]
fn test_staging_is_cleared_between_runs() {
    if !ffmpeg_available() {
        println!("跳過測試：系統上沒有 ffmpeg");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("test_video.mp4");
    generate_test_video(&video);

    let transcoder = resolve_transcoder(None).unwrap();
    let export_dir = dir.path().join("export");

    // 留一個上一次執行的假畫格，編號遠超過這次的數量
    fs::create_dir_all(export_dir.join("part0")).unwrap();
    fs::write(export_dir.join("part0/pic_900.jpg"), b"stale").unwrap();

    let plan = plan(3.0, 0.0, Some(1.0), 12, false, ScaleMode::Stretch).unwrap();
    let exporter = FrameExporter::new(&transcoder.ffmpeg, &export_dir);
    let frame_set = exporter.export(&video, &plan).unwrap();

    assert!(
        !export_dir.join("part0/pic_900.jpg").exists(),
        "上一次的畫格必須先清掉"
    );
    assert_eq!(frame_set.frames.len(), plan.frame_count as usize);
}

/// 轉檔器回報成功卻沒有輸出，必須視為致命錯誤（不會進入上傳）
#[cfg(unix)]
#[test]
fn test_zero_frames_is_fatal_inconsistency() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let stub = dir.path().join("ffmpeg_stub.sh");
    fs::write(&stub, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    let video = dir.path().join("video.mp4");
    fs::write(&video, b"not really a video").unwrap();

    let plan = plan(10.0, 0.0, None, 12, false, ScaleMode::Stretch).unwrap();
    let exporter = FrameExporter::new(&stub, &dir.path().join("export"));
    let err = exporter.export(&video, &plan).unwrap_err();

    assert!(matches!(err, ExportError::NoFramesProduced));
}

/// 轉檔失敗時要帶出工具的診斷輸出
#[cfg(unix)]
#[test]
fn test_transcode_failure_carries_stderr() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let stub = dir.path().join("ffmpeg_stub.sh");
    fs::write(&stub, "#!/bin/sh\necho 'boom: bad input' >&2\nexit 1\n").unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    let video = dir.path().join("video.mp4");
    fs::write(&video, b"not really a video").unwrap();

    let plan = plan(10.0, 0.0, None, 12, false, ScaleMode::Stretch).unwrap();
    let exporter = FrameExporter::new(&stub, &dir.path().join("export"));
    let err = exporter.export(&video, &plan).unwrap_err();

    match err {
        ExportError::TranscodeFailed { stderr } => {
            assert!(stderr.contains("boom: bad input"), "錯誤應帶出 ffmpeg 的輸出");
        }
        other => panic!("應回報轉檔失敗，而不是 {other:?}"),
    }
}
