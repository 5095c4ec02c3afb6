use super::plan::ExtractionPlan;
use crate::config::{FRAME_PREFIX, JPEG_QUALITY};
use std::path::{Path, PathBuf};
use std::process::Command;

/// 單次 ffmpeg 匯出呼叫
///
/// 將計畫轉成 ffmpeg 參數：seek 到起點、套用濾鏡、限制畫格數，
/// 輸出成補零的連續編號檔名
pub struct ExportCommand {
    ffmpeg: PathBuf,
    video: PathBuf,
    plan: ExtractionPlan,
    output_pattern: PathBuf,
}

impl ExportCommand {
    #[must_use]
    pub fn new(ffmpeg: &Path, video: &Path, plan: &ExtractionPlan, part_dir: &Path) -> Self {
        Self {
            ffmpeg: ffmpeg.to_path_buf(),
            video: video.to_path_buf(),
            plan: plan.clone(),
            output_pattern: part_dir.join(format!("{FRAME_PREFIX}%03d.jpg")),
        }
    }

    #[must_use]
    pub fn output_pattern(&self) -> &Path {
        &self.output_pattern
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.ffmpeg);

        cmd.args(["-hide_banner", "-nostdin", "-loglevel", "error"]);
        cmd.args(["-ss", &format!("{}", self.plan.start)]);
        cmd.arg("-i").arg(&self.video);
        cmd.args(["-vf", &self.plan.filters]);
        cmd.args(["-r", &self.plan.fps.to_string()]);
        cmd.args(["-frames:v", &self.plan.frame_count.to_string()]);
        cmd.args(["-q:v", &JPEG_QUALITY.to_string()]);
        cmd.args(["-start_number", "0"]);
        cmd.arg("-y");
        cmd.arg(&self.output_pattern);

        cmd
    }
}
