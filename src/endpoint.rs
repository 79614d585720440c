use std::{fmt, net::IpAddr};

/// Address family, selected through the subdomain label of the raw endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::V4 => "v4",
            Self::V6 => "v6",
        }
    }

    /// Family named by the first host label of an endpoint URL, if any.
    pub fn from_endpoint(url: &str) -> Option<Self> {
        let host = url.split_once("://").map_or(url, |(_, rest)| rest);
        match host.split('.').next()? {
            "v4" => Some(Self::V4),
            "v6" => Some(Self::V6),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::V4 => Self::V6,
            Self::V6 => Self::V4,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Builds `{scheme}://{family_label}.{domain}/raw`. Inputs are not validated.
pub fn endpoint_url(scheme: &str, family_label: &str, domain: &str) -> String {
    format!("{scheme}://{family_label}.{domain}/raw")
}

pub fn family_endpoint(scheme: &str, family: AddressFamily, domain: &str) -> String {
    endpoint_url(scheme, family.label(), domain)
}
