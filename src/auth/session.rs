/*
 * Responsibility
 * - 1 リクエストごとに作られるコンテキスト (Session)
 *   - auth: 共有設定 (read-only)
 *   - claims: 外部 collaborator が埋めるまで None
 *   - provider: provider 配下の route に一致した時だけ Some
 *   - params: handler 間で受け渡す任意の値
 * - リクエストをまたいで共有・再利用しない
 */
use std::{collections::HashMap, fmt, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::auth::{Auth, Claims, Provider};

pub type Params = HashMap<String, Value>;

pub struct Session {
    pub auth: Arc<Auth>,
    pub claims: Option<Claims>,
    pub provider: Option<Arc<dyn Provider>>,
    pub params: Params,
}

impl Session {
    pub fn new(auth: Arc<Auth>) -> Self {
        Self {
            auth,
            claims: None,
            provider: None,
            params: Params::new(),
        }
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    /// Same as [`Auth::auth_url`].
    pub fn auth_url(&self, path: &str) -> String {
        self.auth.auth_url(path)
    }

    pub fn set_param<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: T,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.params.insert(key.into(), value);
        Ok(())
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Typed read of a param. `None` when missing or of another shape.
    pub fn param_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.params
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("prefix", &self.auth.prefix())
            .field("claims", &self.claims)
            .field("provider", &self.provider_name())
            .field("params", &self.params)
            .finish()
    }
}
