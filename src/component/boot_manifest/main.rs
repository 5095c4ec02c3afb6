use crate::config::{BOOT_CONFIG_FILE, PART_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 開機動畫設定檔
///
/// 韌體逐行讀取固定的五行格式，欄位順序與字面格式都是
/// 裝置契約的一部分，必須逐位元組穩定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootManifest {
    width: u32,
    height: u32,
    fps: u32,
    parts: Vec<String>,
}

impl BootManifest {
    /// 建立單一 part0 的設定（本管線只會產生一個 part）
    #[must_use]
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        Self::with_parts(width, height, fps, vec![PART_NAME.to_string()])
    }

    /// 以自訂 part 清單建立設定（格式支援多個 part）
    #[must_use]
    pub fn with_parts(width: u32, height: u32, fps: u32, parts: Vec<String>) -> Self {
        Self {
            width,
            height,
            fps,
            parts,
        }
    }

    /// 產生五行純文字內容（ASCII、LF 結尾）
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "width: {}\nheight: {}\nfps: {}\nparts: {}\n{{ {} }}\n",
            self.width,
            self.height,
            self.fps,
            self.parts.len(),
            self.parts.join(" ")
        )
    }

    /// 寫入 export 資料夾下的 boot-display.conf
    pub fn write(&self, export_dir: &Path) -> Result<PathBuf> {
        let path = export_dir.join(BOOT_CONFIG_FILE);
        fs::write(&path, self.render())
            .with_context(|| format!("無法寫入設定檔: {}", path.display()))?;
        Ok(path)
    }
}
