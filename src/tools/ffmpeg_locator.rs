use anyhow::{Context, Result, bail};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 已解析的轉檔器路徑
#[derive(Debug, Clone)]
pub struct Transcoder {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

/// 解析可用的 ffmpeg 與 ffprobe 路徑
///
/// 優先使用明確指定的路徑，否則從 PATH 尋找，並以 `-version`
/// 驗證一次。啟動時解析完就以參數往下傳，後續不再做任何
/// 全域查找。本工具不負責安裝 ffmpeg。
pub fn resolve_transcoder(explicit: Option<&Path>) -> Result<Transcoder> {
    let ffmpeg = explicit.map_or_else(|| PathBuf::from("ffmpeg"), Path::to_path_buf);

    let output = Command::new(&ffmpeg)
        .arg("-version")
        .output()
        .with_context(|| {
            format!(
                "無法執行 ffmpeg: {}（請安裝 ffmpeg 或用 --ffmpeg 指定路徑）",
                ffmpeg.display()
            )
        })?;
    if !output.status.success() {
        bail!("ffmpeg 無法正常執行: {}", ffmpeg.display());
    }
    debug!("使用 ffmpeg: {}", ffmpeg.display());

    let ffprobe = sibling_ffprobe(&ffmpeg);
    Ok(Transcoder { ffmpeg, ffprobe })
}

/// 從 ffmpeg 路徑推導同目錄的 ffprobe 路徑
fn sibling_ffprobe(ffmpeg: &Path) -> PathBuf {
    let file_name = ffmpeg
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("ffmpeg");
    if file_name.contains("ffmpeg") {
        ffmpeg.with_file_name(file_name.replace("ffmpeg", "ffprobe"))
    } else {
        ffmpeg.with_file_name("ffprobe")
    }
}
