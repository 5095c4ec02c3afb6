//! 畫格匯出元件
//!
//! 以純函式計算匯出參數（時間區間、畫格數、fade 濾鏡），
//! 再用單次 ffmpeg 呼叫產生連續編號的畫格

mod ffmpeg_command;
mod main;
mod plan;

pub use ffmpeg_command::ExportCommand;
pub use main::{ExportError, FrameExporter, FrameSet};
pub use plan::{ExtractionPlan, FadePlan, PlanError, ScaleMode, plan};
