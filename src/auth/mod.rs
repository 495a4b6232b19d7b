/*!
 * Authentication request router
 *
 * Responsibility:
 * - prefix 配下の URL を provider / top-level action に振り分ける (ServeMux)
 * - リクエストごとの Session と、それに載る Claims の型
 * - provider / render / logout handler の契約 (trait)
 *
 * Public API:
 * - Auth, ServeMux, Session, Claims
 * - Provider, Render, LogoutHandler (+ 既定実装 PageRender, RedirectLogoutHandler)
 */

mod claims;
mod core;
mod error;
mod logout;
mod provider;
mod render;
mod serve_mux;
mod session;
pub mod url;

pub use self::core::Auth;
pub use claims::Claims;
pub use error::{AuthError, AuthResult};
pub use logout::{LogoutHandler, RedirectLogoutHandler};
pub use provider::Provider;
pub use render::{LOGIN_TEMPLATE, PageRender, REGISTER_TEMPLATE, Render};
pub use serve_mux::ServeMux;
pub use session::{Params, Session};
