use anyhow::Result;
use std::path::Path;

/// 遠端指令的執行結果
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_status: i32,
    pub output: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_status == 0
    }
}

/// 遠端連線能力
///
/// 部署狀態機只需要三個操作：執行指令、上傳檔案、關閉連線。
/// 正式實作走 SSH（[`super::SshSession`]），測試可以用記憶體
/// 內的假實作。
pub trait RemoteSession {
    /// 執行遠端指令，回傳結束碼與合併後的輸出
    fn run_command(&mut self, command: &str) -> Result<CommandOutput>;

    /// 上傳本地檔案到遠端資料夾（沿用原檔名，覆寫既有檔案）
    fn upload_file(&mut self, local: &Path, remote_dir: &str) -> Result<()>;

    /// 關閉連線
    fn close(&mut self) -> Result<()>;
}

impl<T: RemoteSession + ?Sized> RemoteSession for &mut T {
    fn run_command(&mut self, command: &str) -> Result<CommandOutput> {
        (**self).run_command(command)
    }

    fn upload_file(&mut self, local: &Path, remote_dir: &str) -> Result<()> {
        (**self).upload_file(local, remote_dir)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
