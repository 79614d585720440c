use std::net::IpAddr;

use anyhow::{anyhow, Context};

use crate::{
    endpoint::{family_endpoint, AddressFamily},
    get_env,
};

pub const DEFAULT_SCHEME: &str = "https";

/// Read once at startup, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub scheme: String,
    /// Base domain name the `v4.` / `v6.` endpoints hang off.
    pub domain: String,
    /// When set, only this endpoint is fetched.
    pub single_endpoint_url: Option<String>,
    pub set_title: bool,
}

impl Config {
    /// Loads `SCHEME`, `ROOT_DNS_NAME`, `ENDPOINT` and `SET_TITLE`.
    ///
    /// `ROOT_DNS_NAME` may only be omitted when `ENDPOINT` is given. When
    /// `KNOWN_IP` is set, the configuration is derived from it instead and
    /// `ENDPOINT` / `SET_TITLE` are ignored.
    pub fn from_env() -> anyhow::Result<Self> {
        let scheme = get_env!("SCHEME").unwrap_or_else(|_| DEFAULT_SCHEME.to_string());
        if let Some(known) = known_address_from_env()? {
            let domain = get_env!("ROOT_DNS_NAME")?;
            return Ok(Self::for_known_address(&scheme, &domain, &known));
        }

        let single_endpoint_url = get_env!("ENDPOINT").ok();
        let domain = match get_env!("ROOT_DNS_NAME") {
            Ok(domain) => domain,
            Err(_) if single_endpoint_url.is_some() => String::new(),
            Err(err) => return Err(err),
        };

        Ok(Self {
            scheme,
            domain,
            single_endpoint_url,
            set_title: get_env!("SET_TITLE").is_ok_and(|flag| parse_flag(&flag)),
        })
    }

    /// Configuration for a page that already shows `known`: fetch the other
    /// family, and retitle the page only when the known address is IPv6.
    pub fn for_known_address(scheme: &str, domain: &str, known: &IpAddr) -> Self {
        let family = AddressFamily::of(known);
        Self {
            scheme: scheme.to_string(),
            domain: domain.to_string(),
            single_endpoint_url: Some(family_endpoint(scheme, family.opposite(), domain)),
            set_title: family == AddressFamily::V6,
        }
    }
}

/// `KNOWN_IP`: the address the page already shows, if any.
pub fn known_address_from_env() -> anyhow::Result<Option<IpAddr>> {
    get_env!("KNOWN_IP")
        .ok()
        .map(|ip| parse_known(&ip))
        .transpose()
}

fn parse_known(value: &str) -> anyhow::Result<IpAddr> {
    value
        .trim()
        .parse()
        .with_context(|| format!("parsing KNOWN_IP {value:?}"))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
