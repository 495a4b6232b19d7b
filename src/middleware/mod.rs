/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth ページはブラウザ向けなので security headers も Router 全体に掛ける
 */
pub mod http;
pub mod security_headers;
