//! 固定常數設定
//!
//! 開機動畫的幾何尺寸、路徑與預設值。這些值是印表機韌體的
//! 播放格式契約的一部分，不可任意變更。

/// 目標螢幕寬度（直向）
pub const VIDEO_WIDTH: u32 = 480;
/// 目標螢幕高度（直向）
pub const VIDEO_HEIGHT: u32 = 800;

/// 預設匯出幀率
pub const DEFAULT_FPS: u32 = 12;

/// JPEG 品質（1 = 最高品質）
pub const JPEG_QUALITY: u32 = 1;

/// Fade in/out 長度（秒）
pub const FADE_DURATION: f64 = 1.0;

/// 本地匯出資料夾
pub const DEFAULT_OUTPUT_DIR: &str = "export";
/// 畫格子資料夾名稱（韌體固定讀取 part0）
pub const PART_NAME: &str = "part0";
/// 畫格檔名前綴
pub const FRAME_PREFIX: &str = "pic_";

/// 開機動畫設定檔名稱
pub const BOOT_CONFIG_FILE: &str = "boot-display.conf";
/// 印表機上的開機動畫目錄
pub const DEFAULT_REMOTE_DIR: &str = "/etc/boot-display";

/// 預設 SSH 連接埠
pub const DEFAULT_SSH_PORT: u16 = 22;
/// SSH 連線逾時（秒）
pub const SSH_TIMEOUT_SECS: u64 = 10;
