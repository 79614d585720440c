use std::net::SocketAddr;

use dualstack_ip::{
    config::Config,
    fetch::{fetch_address, HttpTransport},
    page::{Page, Slot, SlotState, PLACEHOLDER},
    resolve::{resolve_dual_stack, Outcome},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

async fn serve(status: &'static str, body: &'static str) -> SocketAddr {
    serve_raw(format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    ))
    .await
}

/// Writes `response` verbatim on every connection, then closes it.
async fn serve_raw(response: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let response = response.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    addr
}

fn transport() -> HttpTransport {
    HttpTransport::new(reqwest::Client::builder().no_proxy().build().unwrap())
}

#[tokio::test]
async fn trims_body_from_real_server() {
    let addr = serve("200 OK", "  203.0.113.5\n").await;
    let slot = Slot::hidden();

    let updated = fetch_address(&transport(), &format!("http://{addr}/raw"), &slot, None).await;

    assert!(updated);
    assert_eq!(
        slot.snapshot(),
        SlotState {
            text: "203.0.113.5".into(),
            visible: true
        }
    );
}

#[tokio::test]
async fn error_status_counts_as_failure() {
    let addr = serve("500 Internal Server Error", "oops").await;
    let slot = Slot::hidden();

    let updated = fetch_address(&transport(), &format!("http://{addr}/raw"), &slot, None).await;

    assert!(!updated);
    assert_eq!(slot.snapshot().text, PLACEHOLDER);
    assert!(!slot.snapshot().visible);
}

#[tokio::test]
async fn truncated_body_counts_as_failure() {
    let addr = serve_raw(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 64\r\nConnection: close\r\n\r\n203.0"
            .to_string(),
    )
    .await;
    let slot = Slot::hidden();

    let updated = fetch_address(&transport(), &format!("http://{addr}/raw"), &slot, None).await;

    assert!(!updated);
    assert_eq!(
        slot.snapshot(),
        SlotState {
            text: PLACEHOLDER.into(),
            visible: false
        }
    );
}

#[tokio::test]
async fn refused_connection_counts_as_failure() {
    // bind then drop to get a port nobody listens on
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let slot = Slot::hidden();

    let updated = fetch_address(&transport(), &format!("http://{addr}/raw"), &slot, None).await;

    assert!(!updated);
    assert!(!slot.snapshot().visible);
}

#[tokio::test]
async fn unresolvable_domain_leaves_page_hidden() {
    let config = Config {
        scheme: "http".into(),
        domain: "invalid.".into(),
        single_endpoint_url: None,
        set_title: true,
    };
    let page = Page::new();

    let outcome = resolve_dual_stack(&transport(), &config, (&page).into()).await;

    assert_eq!(outcome.v4, Outcome::Failed);
    assert_eq!(outcome.v6, Outcome::Failed);
    assert!(!page.ip4.snapshot().visible);
    assert!(!page.ip6.snapshot().visible);
    assert_eq!(page.title.get(), "What's your IP?");
}
