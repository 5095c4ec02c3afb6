use super::main::DeployError;
use super::session::{CommandOutput, RemoteSession};
use super::target::PrinterTarget;
use crate::config::SSH_TIMEOUT_SECS;
use anyhow::{Context, Result, anyhow};
use log::debug;
use ssh2::Session;
use std::fs;
use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

/// SSH 連線實作
///
/// 同一條連線同時提供指令通道（exec）與檔案傳輸通道（SCP）。
/// 印表機上通常只有精簡的 busybox sshd，沒有 SFTP，所以檔案
/// 一律走 SCP。
pub struct SshSession {
    session: Session,
}

impl SshSession {
    /// 連線並驗證身分
    ///
    /// 任何失敗（主機不可達、驗證被拒）都是
    /// [`DeployError::ConnectionFailed`]，此時遠端尚未被動到。
    pub fn connect(target: &PrinterTarget) -> Result<Self, DeployError> {
        Self::connect_inner(target).map_err(|e| DeployError::ConnectionFailed(format!("{e:#}")))
    }

    fn connect_inner(target: &PrinterTarget) -> Result<Self> {
        let address = (target.host.as_str(), target.port)
            .to_socket_addrs()
            .with_context(|| format!("無法解析主機位址: {}", target.host))?
            .next()
            .ok_or_else(|| anyhow!("無法解析主機位址: {}", target.host))?;

        let tcp = TcpStream::connect_timeout(&address, Duration::from_secs(SSH_TIMEOUT_SECS))
            .with_context(|| format!("無法連線 {address}"))?;

        let mut session = Session::new().context("無法建立 SSH session")?;
        session.set_tcp_stream(tcp);
        session.handshake().context("SSH 交握失敗")?;
        session
            .userauth_password(target.credential.user(), target.credential.password())
            .context("SSH 密碼驗證失敗")?;

        debug!("已連線 {}:{}", target.host, target.port);
        Ok(Self { session })
    }
}

impl RemoteSession for SshSession {
    fn run_command(&mut self, command: &str) -> Result<CommandOutput> {
        let mut channel = self
            .session
            .channel_session()
            .context("無法開啟指令通道")?;
        channel
            .exec(command)
            .with_context(|| format!("無法執行遠端指令: {command}"))?;

        let mut output = String::new();
        channel.read_to_string(&mut output)?;
        {
            let mut stderr = String::new();
            channel.stderr().read_to_string(&mut stderr)?;
            output.push_str(&stderr);
        }

        channel.wait_close().context("等待指令結束失敗")?;
        let exit_status = channel.exit_status().context("無法取得指令結束碼")?;

        debug!("遠端指令 `{command}` 結束碼 {exit_status}");
        Ok(CommandOutput {
            exit_status,
            output,
        })
    }

    fn upload_file(&mut self, local: &Path, remote_dir: &str) -> Result<()> {
        let name = local
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("無效的檔名: {}", local.display()))?;
        let remote_path = format!("{}/{}", remote_dir.trim_end_matches('/'), name);

        let data =
            fs::read(local).with_context(|| format!("無法讀取檔案: {}", local.display()))?;

        let mut remote = self
            .session
            .scp_send(Path::new(&remote_path), 0o644, data.len() as u64, None)
            .with_context(|| format!("無法開啟 SCP 傳輸: {remote_path}"))?;
        remote.write_all(&data)?;
        remote.send_eof()?;
        remote.wait_eof()?;
        remote.close()?;
        remote.wait_close()?;

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.session
            .disconnect(None, "deploy finished", None)
            .context("關閉 SSH 連線失敗")?;
        Ok(())
    }
}
