use dualstack_ip::{
    config::{known_address_from_env, Config},
    endpoint::AddressFamily,
    fetch::HttpTransport,
    page::Page,
    resolve::{resolve_dual_stack, resolve_single},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::new();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let transport = HttpTransport::default();
    let page = known_address_from_env()?.map_or_else(Page::new, Page::known);

    if let Some(url) = &config.single_endpoint_url {
        let family = AddressFamily::from_endpoint(url).unwrap_or(AddressFamily::V4);
        let outcome = resolve_single(&transport, &config, page.slot(family), &page.title).await?;
        tracing::info!(?outcome, "single endpoint done");
    } else {
        let outcome = resolve_dual_stack(&transport, &config, (&page).into()).await;
        tracing::info!(v4 = ?outcome.v4, v6 = ?outcome.v6, "dual stack done");
    }

    print!("{page}");

    Ok(())
}
