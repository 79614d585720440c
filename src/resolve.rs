use anyhow::Context;
use tracing::instrument;

use crate::{
    config::Config,
    endpoint::{family_endpoint, AddressFamily},
    fetch::{fetch_address, Transport},
    page::{DisplayTarget, Page, TitleTarget},
};

/// What happened to one display target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Already visible, no request was issued.
    Skipped,
    Updated,
    Failed,
}

impl From<bool> for Outcome {
    fn from(updated: bool) -> Self {
        if updated {
            Self::Updated
        } else {
            Self::Failed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualStackOutcome {
    pub v4: Outcome,
    pub v6: Outcome,
}

/// The capabilities an entry point is allowed to touch.
#[derive(Clone, Copy)]
pub struct Targets<'a> {
    pub ip4: &'a dyn DisplayTarget,
    pub ip6: &'a dyn DisplayTarget,
    pub title: &'a dyn TitleTarget,
}

impl<'a> From<&'a Page> for Targets<'a> {
    fn from(page: &'a Page) -> Self {
        Self {
            ip4: &page.ip4,
            ip6: &page.ip6,
            title: &page.title,
        }
    }
}

impl<'a> Targets<'a> {
    fn slot(&self, family: AddressFamily) -> &'a dyn DisplayTarget {
        match family {
            AddressFamily::V4 => self.ip4,
            AddressFamily::V6 => self.ip6,
        }
    }
}

/// Fetches the IPv4 and IPv6 addresses concurrently.
///
/// A target that is already visible is left alone. The two fetches never
/// affect each other. A successful IPv4 fetch always rewrites the title;
/// `set_title` only concerns [`resolve_single`].
#[instrument(name = "resolve_dual_stack", skip_all, fields(domain = %config.domain))]
pub async fn resolve_dual_stack<T: Transport>(
    transport: &T,
    config: &Config,
    targets: Targets<'_>,
) -> DualStackOutcome {
    let (v4, v6) = tokio::join!(
        resolve_family(transport, config, AddressFamily::V4, targets, Some(targets.title)),
        resolve_family(transport, config, AddressFamily::V6, targets, None),
    );

    DualStackOutcome { v4, v6 }
}

async fn resolve_family<T: Transport>(
    transport: &T,
    config: &Config,
    family: AddressFamily,
    targets: Targets<'_>,
    title: Option<&dyn TitleTarget>,
) -> Outcome {
    let target = targets.slot(family);
    if target.is_visible() {
        tracing::debug!(%family, "already shown, not fetching");
        return Outcome::Skipped;
    }

    let url = family_endpoint(&config.scheme, family, &config.domain);
    fetch_address(transport, &url, target, title).await.into()
}

/// Fetches the single configured endpoint into `target`.
///
/// Errors only when no endpoint is configured; fetch failures are swallowed
/// like everywhere else.
#[instrument(name = "resolve_single", skip_all)]
pub async fn resolve_single<T: Transport>(
    transport: &T,
    config: &Config,
    target: &dyn DisplayTarget,
    title: &dyn TitleTarget,
) -> anyhow::Result<Outcome> {
    let url = config
        .single_endpoint_url
        .as_deref()
        .context("no single endpoint configured")?;
    let title = config.set_title.then_some(title);

    Ok(fetch_address(transport, url, target, title).await.into())
}
