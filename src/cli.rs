//! 命令列介面
//!
//! 匯出參數與印表機授權字串的解析

use crate::component::frame_export::ScaleMode;
use crate::component::printer_upload::{Credential, PrinterTarget};
use crate::config::{DEFAULT_FPS, DEFAULT_SSH_PORT};
use anyhow::{Result, bail};
use clap::Parser;
use regex::Regex;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "boot_display_export",
    version,
    about = "將影片匯出為開機動畫畫格，並可上傳至 3D 印表機"
)]
pub struct Cli {
    /// 影片檔案路徑
    pub video: PathBuf,

    /// 開始時間（秒）
    #[arg(short, long, default_value_t = 0.0)]
    pub start: f64,

    /// 結束時間（秒），省略則到影片結尾
    #[arg(short, long)]
    pub end: Option<f64>,

    /// 匯出幀率
    #[arg(short, long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// 加上 fade in/out 效果
    #[arg(long)]
    pub fade: bool,

    /// 縮放模式
    #[arg(long, value_enum, default_value_t = ScaleMode::Stretch)]
    pub scale_mode: ScaleMode,

    /// 上傳至印表機
    #[arg(long, value_name = "USER:PASS@IP[:PORT]")]
    pub upload: Option<String>,

    /// ffmpeg 執行檔路徑（預設從 PATH 尋找）
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,
}

/// 解析授權字串 `username:password@ip` 或 `username:password@ip:port`
pub fn parse_authorization(value: &str) -> Result<PrinterTarget> {
    let pattern =
        Regex::new(r"^([^:@]+):([^@]+)@([^:]+)(?::(\d+))?$").expect("授權字串樣式應為合法 regex");

    let Some(caps) = pattern.captures(value) else {
        bail!("授權字串格式錯誤，請使用 USER:PASS@IP 或 USER:PASS@IP:PORT");
    };

    let port = match caps.get(4) {
        Some(m) => match m.as_str().parse::<u16>() {
            Ok(port) => port,
            Err(_) => bail!("連接埠超出範圍: {}", m.as_str()),
        },
        None => DEFAULT_SSH_PORT,
    };

    Ok(PrinterTarget {
        host: caps[3].to_string(),
        port,
        credential: Credential::new(caps[1].to_string(), caps[2].to_string()),
    })
}
