use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 印表機登入憑證
///
/// 密碼只存在行程記憶體中，連線結束即清除，不寫入磁碟也
/// 不出現在任何日誌輸出
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    user: String,
    password: String,
}

impl Credential {
    #[must_use]
    pub fn new(user: String, password: String) -> Self {
        Self { user, password }
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("user", &self.user)
            .field("password", &"<hidden>")
            .finish()
    }
}

/// 部署目標印表機
///
/// 每次執行從授權字串解析一次，連線用完即釋放，不做持久化
#[derive(Debug, Clone)]
pub struct PrinterTarget {
    pub host: String,
    pub port: u16,
    pub credential: Credential,
}
