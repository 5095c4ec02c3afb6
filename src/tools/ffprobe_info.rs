use super::ffmpeg_locator::Transcoder;
use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

/// 取得影片長度（秒）
///
/// 先用 ffprobe 的 JSON 輸出，失敗時退回解析 ffmpeg 的
/// stderr（某些精簡版 ffmpeg 沒附 ffprobe）
pub fn get_video_duration(transcoder: &Transcoder, path: &Path) -> Result<f64> {
    match probe_duration(&transcoder.ffprobe, path) {
        Ok(duration) => Ok(duration),
        Err(e) => {
            debug!("ffprobe 取得長度失敗，改用 ffmpeg 輸出: {e:#}");
            duration_from_ffmpeg(&transcoder.ffmpeg, path)
        }
    }
}

/// 使用 ffprobe 取得影片長度
fn probe_duration(ffprobe: &Path, path: &Path) -> Result<f64> {
    let output = Command::new(ffprobe)
        .args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path)
        .output()
        .with_context(|| format!("無法執行 ffprobe: {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe 執行失敗: {stderr}");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let probe: FfprobeOutput =
        serde_json::from_str(&stdout).with_context(|| "無法解析 ffprobe 輸出")?;

    probe
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| anyhow!("ffprobe 輸出缺少影片長度: {}", path.display()))
}

/// 從 ffmpeg 的 stderr 解析影片長度
fn duration_from_ffmpeg(ffmpeg: &Path, path: &Path) -> Result<f64> {
    let output = Command::new(ffmpeg)
        .arg("-i")
        .arg(path)
        .output()
        .with_context(|| format!("無法執行 ffmpeg: {}", path.display()))?;

    // ffmpeg -i 沒有輸出檔會以非零結束，媒體資訊仍在 stderr 裡
    let stderr = String::from_utf8_lossy(&output.stderr);
    parse_duration_log(&stderr)
        .ok_or_else(|| anyhow!("無法取得影片長度: {}", path.display()))
}

/// 從 ffmpeg 輸出找 `Duration: HH:MM:SS.ss` 行
fn parse_duration_log(log: &str) -> Option<f64> {
    for line in log.lines() {
        if let Some(rest) = line.trim_start().strip_prefix("Duration:") {
            let time = rest.split(',').next()?.trim();
            return parse_hms(time);
        }
    }
    None
}

/// 解析 HH:MM:SS.ss 時間字串
fn parse_hms(value: &str) -> Option<f64> {
    let fields: Vec<&str> = value.split(':').collect();
    if fields.len() != 3 {
        return None;
    }
    let hours: f64 = fields[0].parse().ok()?;
    let minutes: f64 = fields[1].parse().ok()?;
    let seconds: f64 = fields[2].parse().ok()?;
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}
