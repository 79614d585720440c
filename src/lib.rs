//! Discover the caller's public IPv4 and IPv6 addresses and show them.
//!
//! Two entry points share one fetcher: [`resolve::resolve_dual_stack`]
//! queries `v4.` and `v6.` raw endpoints side by side, and
//! [`resolve::resolve_single`] queries one configured endpoint. Failures are
//! logged and otherwise leave the page as it was.

pub mod config;
pub mod endpoint;
pub mod fetch;
pub mod page;
pub mod resolve;

use reqwest::Client;
use std::sync::LazyLock;

#[macro_export]
macro_rules! get_env {
    ($key:expr) => {{
        std::env::var($key).map_err(|err| anyhow!("getting {}: {err}", $key))
    }};
}

pub static CLIENT: LazyLock<Client> = LazyLock::new(reqwest::Client::new);
