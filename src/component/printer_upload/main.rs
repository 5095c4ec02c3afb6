use super::session::RemoteSession;
use crate::component::frame_export::FrameSet;
use crate::config::PART_NAME;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;
use thiserror::Error;

/// 部署階段的錯誤
///
/// 每個變體對應狀態機的一個步驟，訊息帶出底層原因。備份之後
/// 的失敗不會自動回復，需要手動從時間戳記備份還原。
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("連線印表機失敗: {0}")]
    ConnectionFailed(String),
    #[error("備份遠端目錄失敗: {0}")]
    BackupFailed(String),
    #[error("建立遠端目錄失敗: {0}")]
    DirectoryCreateFailed(String),
    #[error("上傳 {path} 失敗: {reason}")]
    UploadFailed { path: String, reason: String },
}

/// 部署結果摘要
#[derive(Debug)]
pub struct DeploySummary {
    /// 上傳的檔案數（設定檔 + 畫格）
    pub uploaded_files: usize,
    /// 本次使用的備份目錄名稱（舊安裝存在時才會真的產生）
    pub backup_dir: String,
}

/// 印表機上傳器
///
/// 線性狀態機：備份 → 建立 part 目錄 → 上傳設定檔 → 上傳畫格。
/// 每一步必須完全成功，否則整個部署失敗；無論成敗，連線都在
/// 結束前釋放。
pub struct PrinterUploader<S: RemoteSession> {
    session: S,
}

impl<S: RemoteSession> PrinterUploader<S> {
    #[must_use]
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// 執行部署
    ///
    /// 失敗時遠端只有兩種狀態：備份前失敗則舊安裝原封不動；
    /// 備份後失敗則舊安裝完整保留在時間戳記備份目錄裡
    pub fn deploy(
        mut self,
        manifest: &Path,
        frames: &FrameSet,
        remote_dir: &str,
    ) -> Result<DeploySummary, DeployError> {
        let result = self.deploy_inner(manifest, frames, remote_dir);

        // 無論哪一步失敗，連線都不可外洩
        if let Err(e) = self.session.close() {
            warn!("關閉遠端連線失敗: {e}");
        }

        result
    }

    fn deploy_inner(
        &mut self,
        manifest: &Path,
        frames: &FrameSet,
        remote_dir: &str,
    ) -> Result<DeploySummary, DeployError> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let backup_dir = format!("{remote_dir}-BACK-{timestamp}");

        self.backup_existing(remote_dir, &backup_dir)?;
        self.create_part_directory(remote_dir)?;

        info!("上傳設定檔 {}", manifest.display());
        self.upload(manifest, remote_dir)?;

        let part_dir = format!("{remote_dir}/{PART_NAME}");
        let progress_bar = ProgressBar::new(frames.frames.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar.set_message("上傳畫格中...");

        for frame in &frames.frames {
            self.upload(frame, &part_dir)?;
            progress_bar.inc(1);
        }
        progress_bar.finish_with_message("上傳完成");

        info!("已上傳 {} 張畫格到 {part_dir}", frames.frames.len());
        Ok(DeploySummary {
            uploaded_files: frames.frames.len() + 1,
            backup_dir,
        })
    }

    /// 備份既有的開機動畫目錄，再重建空目錄
    ///
    /// 改名必須是單一遠端指令：改名失敗就中止，任何新資料都
    /// 還沒寫入，舊安裝維持原狀
    fn backup_existing(&mut self, remote_dir: &str, backup_dir: &str) -> Result<(), DeployError> {
        let rename = format!("if [ -d {remote_dir} ]; then mv {remote_dir} {backup_dir}; fi");
        self.run_step(&rename).map_err(DeployError::BackupFailed)?;

        self.run_step(&format!("mkdir -p {remote_dir}"))
            .map_err(DeployError::BackupFailed)
    }

    /// 建立 part0 子目錄
    ///
    /// 透過指令通道明確建立，不依賴檔案傳輸端自動補目錄的行為
    fn create_part_directory(&mut self, remote_dir: &str) -> Result<(), DeployError> {
        self.run_step(&format!("mkdir -p {remote_dir}/{PART_NAME}"))
            .map_err(DeployError::DirectoryCreateFailed)
    }

    fn run_step(&mut self, command: &str) -> Result<(), String> {
        match self.session.run_command(command) {
            Ok(result) if result.success() => Ok(()),
            Ok(result) => Err(format!(
                "指令 `{command}` 結束碼 {}: {}",
                result.exit_status,
                result.output.trim()
            )),
            Err(e) => Err(format!("指令 `{command}` 執行失敗: {e:#}")),
        }
    }

    fn upload(&mut self, local: &Path, remote_dir: &str) -> Result<(), DeployError> {
        self.session
            .upload_file(local, remote_dir)
            .map_err(|e| DeployError::UploadFailed {
                path: local.display().to_string(),
                reason: format!("{e:#}"),
            })
    }
}
