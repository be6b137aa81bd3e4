//! OAuth authorization-code exchange for the sitedeck session gateway.
//!
//! # Components
//!
//! - [`oauth`] — install URL and the code-for-token request
//! - [`callback`] — parsing `code` / `error` from the callback query
//! - [`exchanger`] — the [`TokenExchanger`] adapter the gateway calls
//! - [`token`] — the immutable [`SessionToken`]

pub mod callback;
pub mod error;
pub mod exchanger;
pub mod oauth;
pub mod token;

pub use callback::CallbackParams;
pub use error::{ExchangeError, Result};
pub use exchanger::{HttpTokenExchanger, MockExchanger, SharedExchanger, TokenExchanger};
pub use oauth::{OAuthConfig, build_authorization_url, exchange_code_for_token};
pub use token::{SESSION_MAX_AGE, SessionToken};
