//! 功能元件模組
//!
//! 每個子模組實現管線中的一個獨立階段：規劃與匯出畫格、
//! 產生開機動畫設定檔、上傳至印表機

pub mod boot_manifest;
pub mod frame_export;
pub mod printer_upload;

pub use boot_manifest::BootManifest;
pub use frame_export::{FrameExporter, FrameSet};
pub use printer_upload::{PrinterUploader, SshSession};
