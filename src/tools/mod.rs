mod ffmpeg_locator;
mod ffprobe_info;
mod path_validator;

pub use ffmpeg_locator::{Transcoder, resolve_transcoder};
pub use ffprobe_info::get_video_duration;
pub use path_validator::{ensure_directory_exists, validate_file_exists};
