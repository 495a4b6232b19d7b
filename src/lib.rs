/*
 * Responsibility
 * - crate の公開モジュール
 * - 埋め込み側は auth::Auth に provider を登録し、app::serve() か
 *   ServeMux::into_router() で自前の Router に載せる
 */
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
