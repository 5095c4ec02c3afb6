//! 印表機上傳元件
//!
//! 透過 SSH 對印表機執行「先備份再替換」的開機動畫部署流程。
//! 部署邏輯只依賴窄介面 [`RemoteSession`]，測試時可以用
//! 記憶體內的假連線驗證狀態機，不需要真的網路。

mod main;
mod session;
mod ssh_session;
mod target;

pub use main::{DeployError, DeploySummary, PrinterUploader};
pub use session::{CommandOutput, RemoteSession};
pub use ssh_session::SshSession;
pub use target::{Credential, PrinterTarget};
