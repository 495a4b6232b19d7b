/*
 * Responsibility
 * - Auth: ルーターの設定 (prefix / provider 登録表 / render / logout handler)
 * - provider 登録は起動時のみ (&mut self)。serve_mux() で Arc に凍結した後は read-only
 * - provider の検索と auth 配下の URL 生成
 */
use std::{collections::HashMap, fmt, sync::Arc};

use crate::auth::{AuthError, AuthResult, LogoutHandler, Provider, Render, ServeMux, url};

pub struct Auth {
    prefix: String,
    providers: HashMap<String, Arc<dyn Provider>>,
    render: Arc<dyn Render>,
    logout_handler: Arc<dyn LogoutHandler>,
}

impl Auth {
    pub fn new(
        prefix: impl Into<String>,
        render: impl Render,
        logout_handler: impl LogoutHandler,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            providers: HashMap::new(),
            render: Arc::new(render),
            logout_handler: Arc::new(logout_handler),
        }
    }

    /// Register a provider under [`Provider::name`].
    ///
    /// Names are unique and must be usable as a single path segment.
    pub fn register_provider(&mut self, provider: impl Provider) -> AuthResult<()> {
        let name = provider.name().to_string();
        if name.is_empty() {
            return Err(AuthError::EmptyProviderName);
        }
        if name.contains('/') {
            return Err(AuthError::InvalidProviderName(name));
        }
        if self.providers.contains_key(&name) {
            return Err(AuthError::DuplicateProvider(name));
        }

        tracing::debug!(provider = %name, prefix = %self.prefix, "registered auth provider");
        self.providers.insert(name, Arc::new(provider));
        Ok(())
    }

    pub fn get_provider(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// Registered providers, ordered by name.
    pub fn providers(&self) -> Vec<Arc<dyn Provider>> {
        let mut providers: Vec<_> = self.providers.values().cloned().collect();
        providers.sort_by(|a, b| a.name().cmp(b.name()));
        providers
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn render(&self) -> &Arc<dyn Render> {
        &self.render
    }

    pub fn logout_handler(&self) -> &Arc<dyn LogoutHandler> {
        &self.logout_handler
    }

    /// Build a link back into the router's namespace, e.g. `login` -> `/auth/login`.
    pub fn auth_url(&self, path: &str) -> String {
        url::join(&[&self.prefix, path])
    }

    /// Freeze the configuration and build the request dispatcher.
    pub fn serve_mux(self) -> ServeMux {
        ServeMux::new(Arc::new(self))
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Auth")
            .field("prefix", &self.prefix)
            .field("providers", &names)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        extract::Request,
        response::{IntoResponse, Response},
    };

    use crate::auth::{PageRender, RedirectLogoutHandler, Session};

    struct Named(&'static str);

    #[async_trait]
    impl Provider for Named {
        fn name(&self) -> &str {
            self.0
        }

        async fn login(&self, _req: Request, _session: &mut Session) -> Response {
            "login".into_response()
        }

        async fn logout(&self, _req: Request, _session: &mut Session) -> Response {
            "logout".into_response()
        }
    }

    fn auth(prefix: &str) -> Auth {
        Auth::new(prefix, PageRender, RedirectLogoutHandler::default())
    }

    #[test]
    fn looks_up_registered_providers() {
        let mut auth = auth("/auth");
        auth.register_provider(Named("phone")).unwrap();
        auth.register_provider(Named("password")).unwrap();

        assert_eq!(auth.get_provider("phone").unwrap().name(), "phone");
        assert!(auth.get_provider("Phone").is_none());
        assert!(auth.get_provider("google").is_none());

        let names: Vec<String> = auth
            .providers()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, ["password", "phone"]);
    }

    #[test]
    fn rejects_bad_registrations() {
        let mut auth = auth("/auth");
        auth.register_provider(Named("phone")).unwrap();

        assert_eq!(
            auth.register_provider(Named("phone")),
            Err(AuthError::DuplicateProvider("phone".into()))
        );
        assert_eq!(
            auth.register_provider(Named("")),
            Err(AuthError::EmptyProviderName)
        );
        assert_eq!(
            auth.register_provider(Named("a/b")),
            Err(AuthError::InvalidProviderName("a/b".into()))
        );
        assert_eq!(auth.providers().len(), 1);
    }

    #[test]
    fn auth_url_joins_prefix() {
        assert_eq!(auth("/auth").auth_url("login"), "/auth/login");
        assert_eq!(auth("/").auth_url("login"), "/login");
        assert_eq!(auth("/auth/").auth_url("/phone/login"), "/auth/phone/login");
    }
}
