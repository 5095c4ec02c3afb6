use crate::config::{FADE_DURATION, VIDEO_HEIGHT, VIDEO_WIDTH};
use thiserror::Error;

/// 規劃階段的錯誤
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error("無效的時間區間: {start:.2}s - {end:.2}s")]
    InvalidWindow { start: f64, end: f64 },
    #[error("時間區間太短: {duration:.2}s 在 {fps} fps 下不足以匯出畫格")]
    WindowTooShort { duration: f64, fps: u32 },
}

/// 縮放模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ScaleMode {
    /// 直接拉伸至目標尺寸（不保持比例）
    #[default]
    Stretch,
    /// 保持比例縮放後裁切（填滿整個畫面）
    Crop,
}

/// Fade 參數
///
/// `fade_out_start` 預留了兩張畫格的緩衝，避免 fade out 超出
/// 最後一張匯出的畫格
#[derive(Debug, Clone, PartialEq)]
pub struct FadePlan {
    pub fade_in: f64,
    pub fade_out_start: f64,
}

/// 匯出計畫
///
/// 由輸入參數完全決定，與播放韌體預期的畫格數一致
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionPlan {
    pub start: f64,
    pub end: f64,
    pub fps: u32,
    pub frame_count: u32,
    pub fade: Option<FadePlan>,
    pub filters: String,
}

/// 規劃匯出參數
///
/// `end` 省略或 ≤0 時以影片長度代替。畫格數為
/// `floor(區間長度 × fps) - 1`，保留一張緩衝畫格；不足一張時
/// 回傳 [`PlanError::WindowTooShort`]。純函式，無任何 I/O。
pub fn plan(
    media_duration: f64,
    start: f64,
    end: Option<f64>,
    fps: u32,
    fade: bool,
    scale_mode: ScaleMode,
) -> Result<ExtractionPlan, PlanError> {
    let end = match end {
        Some(value) if value > 0.0 => value,
        _ => media_duration,
    };

    let duration = end - start;
    if start < 0.0 || duration <= 0.0 {
        return Err(PlanError::InvalidWindow { start, end });
    }

    if fps == 0 {
        return Err(PlanError::WindowTooShort { duration, fps });
    }

    let frame_count = (duration * f64::from(fps)).floor() as i64 - 1;
    if frame_count < 1 {
        return Err(PlanError::WindowTooShort { duration, fps });
    }

    let fade = if fade {
        // fade out 的起點必須落在 fade in 結束之後，並保留兩張畫格緩衝
        let minimum = 2.0 * FADE_DURATION + 2.0 / f64::from(fps);
        if duration < minimum {
            return Err(PlanError::WindowTooShort { duration, fps });
        }
        Some(FadePlan {
            fade_in: FADE_DURATION,
            fade_out_start: duration - FADE_DURATION - 2.0 / f64::from(fps),
        })
    } else {
        None
    };

    let filters = build_filters(scale_mode, fade.as_ref());

    Ok(ExtractionPlan {
        start,
        end,
        fps,
        frame_count: frame_count as u32,
        fade,
        filters,
    })
}

/// 組合 ffmpeg 濾鏡字串
///
/// 順序固定：縮放（與裁切）到橫向工作尺寸 → transpose=1 轉成
/// 直向 480x800 → fade。fade 作用在旋轉後的顯示座標上，所以
/// 必須放在最後。
fn build_filters(scale_mode: ScaleMode, fade: Option<&FadePlan>) -> String {
    let mut filters = match scale_mode {
        ScaleMode::Stretch => {
            format!("scale={VIDEO_HEIGHT}:{VIDEO_WIDTH},transpose=1")
        }
        ScaleMode::Crop => format!(
            "scale={VIDEO_HEIGHT}:{VIDEO_WIDTH}:force_original_aspect_ratio=increase,crop={VIDEO_HEIGHT}:{VIDEO_WIDTH},transpose=1"
        ),
    };

    if let Some(fade) = fade {
        filters.push_str(&format!(
            ",fade=t=in:st=0:d={},fade=t=out:st={:.3}:d={}",
            fade.fade_in, fade.fade_out_start, fade.fade_in
        ));
    }

    filters
}
