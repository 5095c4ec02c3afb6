use super::ffmpeg_command::ExportCommand;
use super::plan::ExtractionPlan;
use crate::config::{FRAME_PREFIX, PART_NAME};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 匯出階段的錯誤
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("找不到影片檔案: {}", .0.display())]
    VideoNotFound(PathBuf),
    #[error("ffmpeg 執行失敗:\n{stderr}")]
    TranscodeFailed { stderr: String },
    #[error("ffmpeg 回報成功但沒有產生任何畫格")]
    NoFramesProduced,
    #[error("匯出資料夾處理失敗: {0}")]
    Io(#[from] std::io::Error),
}

/// 匯出完成的畫格集合
///
/// 依檔名排序（pic_000.jpg、pic_001.jpg …），寫入後不再變動，
/// 由本地 staging 區獨佔直到交給上傳元件
#[derive(Debug)]
pub struct FrameSet {
    pub part_dir: PathBuf,
    pub frames: Vec<PathBuf>,
}

/// 畫格匯出器
///
/// staging 資料夾每次執行都重新使用：先清掉上一次的畫格，
/// 再以單次 ffmpeg 呼叫產生新的一批
pub struct FrameExporter {
    ffmpeg: PathBuf,
    staging_dir: PathBuf,
}

impl FrameExporter {
    #[must_use]
    pub fn new(ffmpeg: &Path, staging_dir: &Path) -> Self {
        Self {
            ffmpeg: ffmpeg.to_path_buf(),
            staging_dir: staging_dir.to_path_buf(),
        }
    }

    /// 依計畫匯出畫格
    ///
    /// ffmpeg 只會被呼叫一次，失敗就整個中止，不做部分處理或
    /// 重試。成功結束但沒有任何輸出檔案視為致命的不一致
    /// （[`ExportError::NoFramesProduced`]）。
    pub fn export(&self, video: &Path, plan: &ExtractionPlan) -> Result<FrameSet, ExportError> {
        if !video.exists() {
            return Err(ExportError::VideoNotFound(video.to_path_buf()));
        }

        let part_dir = self.staging_dir.join(PART_NAME);
        fs::create_dir_all(&part_dir)?;
        clear_staged_frames(&part_dir)?;

        info!(
            "執行 ffmpeg: {:.2}s 起匯出 {} 張畫格",
            plan.start, plan.frame_count
        );

        let command = ExportCommand::new(&self.ffmpeg, video, plan, &part_dir);
        let output = command.build_command().output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ExportError::TranscodeFailed { stderr });
        }

        let frames = collect_frames(&part_dir)?;
        if frames.is_empty() {
            return Err(ExportError::NoFramesProduced);
        }
        if frames.len() as u32 != plan.frame_count {
            warn!(
                "畫格數量與計畫不同: 預期 {}, 實際 {}",
                plan.frame_count,
                frames.len()
            );
        }

        Ok(FrameSet { part_dir, frames })
    }
}

fn is_staged_frame(name: &str) -> bool {
    name.starts_with(FRAME_PREFIX) && name.ends_with(".jpg")
}

/// 清除上一次執行留下的畫格
fn clear_staged_frames(part_dir: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(part_dir)? {
        let entry = entry?;
        if entry
            .file_name()
            .to_str()
            .is_some_and(is_staged_frame)
        {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// 收集匯出的畫格，依檔名排序
fn collect_frames(part_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut frames: Vec<PathBuf> = fs::read_dir(part_dir)?
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(is_staged_frame)
        })
        .map(|entry| entry.path())
        .collect();
    frames.sort();
    Ok(frames)
}
