use anyhow::{Result, bail};
use std::path::Path;

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("找不到檔案: {}", path.display());
    }
    if !path.is_file() {
        bail!("路徑不是檔案: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("video.mp4");

        assert!(validate_file_exists(&file).is_err(), "不存在的檔案應失敗");
        assert!(validate_file_exists(dir.path()).is_err(), "資料夾不算檔案");

        std::fs::write(&file, b"x").unwrap();
        assert!(validate_file_exists(&file).is_ok());
    }

    #[test]
    fn test_ensure_directory_exists() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());

        // 已存在時不應報錯
        ensure_directory_exists(&nested).unwrap();
    }
}
