use anyhow::Result;
use boot_display_export::cli::{Cli, parse_authorization};
use boot_display_export::component::boot_manifest::BootManifest;
use boot_display_export::component::frame_export::{FrameExporter, plan};
use boot_display_export::component::printer_upload::{PrinterUploader, SshSession};
use boot_display_export::config::{
    DEFAULT_OUTPUT_DIR, DEFAULT_REMOTE_DIR, VIDEO_HEIGHT, VIDEO_WIDTH,
};
use boot_display_export::tools::{
    ensure_directory_exists, get_video_duration, resolve_transcoder, validate_file_exists,
};
use clap::Parser;
use clap::error::ErrorKind;
use console::style;
use log::info;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("✗").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // 先解析授權字串，格式錯誤就不必花時間匯出
    let target = cli.upload.as_deref().map(parse_authorization).transpose()?;

    validate_file_exists(&cli.video)?;
    let transcoder = resolve_transcoder(cli.ffmpeg.as_deref())?;

    println!("{}", style("=== 開機動畫匯出 ===").cyan().bold());

    let media_duration = get_video_duration(&transcoder, &cli.video)?;
    let plan = plan(
        media_duration,
        cli.start,
        cli.end,
        cli.fps,
        cli.fade,
        cli.scale_mode,
    )?;

    println!("影片: {}", cli.video.display());
    println!(
        "區間: {:.2}s - {:.2}s（共 {:.2}s）",
        plan.start,
        plan.end,
        plan.end - plan.start
    );
    println!("畫格: {} 張（{} fps）", plan.frame_count, plan.fps);
    println!(
        "Fade: {}",
        if plan.fade.is_some() { "開啟" } else { "關閉" }
    );

    let export_dir = Path::new(DEFAULT_OUTPUT_DIR);
    ensure_directory_exists(export_dir)?;

    let exporter = FrameExporter::new(&transcoder.ffmpeg, export_dir);
    let frame_set = exporter.export(&cli.video, &plan)?;
    println!(
        "{}",
        style(format!(
            "✓ 已匯出 {} 張畫格到 {}",
            frame_set.frames.len(),
            frame_set.part_dir.display()
        ))
        .green()
    );

    let manifest = BootManifest::new(VIDEO_WIDTH, VIDEO_HEIGHT, plan.fps);
    let manifest_path = manifest.write(export_dir)?;
    info!("已寫入設定檔 {}", manifest_path.display());

    if let Some(target) = target {
        println!("{}", style("=== 上傳至印表機 ===").cyan().bold());
        println!(
            "連線 {}@{}:{} ...",
            target.credential.user(),
            target.host,
            target.port
        );

        let session = SshSession::connect(&target)?;
        let uploader = PrinterUploader::new(session);
        let summary = uploader.deploy(&manifest_path, &frame_set, DEFAULT_REMOTE_DIR)?;

        println!(
            "{}",
            style(format!("✓ 已上傳 {} 個檔案", summary.uploaded_files)).green()
        );
        println!(
            "{}",
            style(format!("舊動畫（如有）已備份為 {}", summary.backup_dir)).dim()
        );
    }

    Ok(())
}
