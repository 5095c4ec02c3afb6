//! 開機動畫設定檔元件
//!
//! 產生印表機韌體讀取的 boot-display.conf

mod main;

pub use main::BootManifest;
