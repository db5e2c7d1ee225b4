//! Response rewriting: canonical suppression and admin script injection.

use author_gate::Overrides;

mod common;

const CANONICAL_HEADERS: &str =
    "Link: <http://site.test/style.css>; rel=preload, <http://site.test/author/jane>; rel=\"canonical\"\r\n";

const ADMIN_PAGE: &str =
    "<html><head><title>Dashboard</title></head><body>Dashboard</body></html>";

#[tokio::test]
async fn test_canonical_stripped_on_author_responses() {
    let origin = common::start_mock_origin(CANONICAL_HEADERS, "feed").await;
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(origin)).await;

    // An async author request passes the responder but is still an author
    // view, so its canonical URL must be suppressed.
    let res = common::client()
        .get(format!("http://{addr}/author/jane"))
        .header("X-Requested-With", "XMLHttpRequest")
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status().as_u16(), 200);
    let link = res.headers().get("link").unwrap().to_str().unwrap();
    assert!(!link.contains("canonical"));
    assert!(link.contains("rel=preload"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_canonical_kept_on_regular_pages() {
    let origin = common::start_mock_origin(CANONICAL_HEADERS, "page").await;
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(origin)).await;

    let res = common::client()
        .get(format!("http://{addr}/blog/post"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let link = res.headers().get("link").unwrap().to_str().unwrap();
    assert!(link.contains("canonical"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_canonical_override_hook() {
    let origin = common::start_mock_origin(CANONICAL_HEADERS, "page").await;
    let overrides =
        Overrides::new().with_canonical_url(|_| Some("http://site.test/custom".to_string()));
    let (addr, shutdown) =
        common::spawn_gateway_with_overrides(common::gateway_config(origin), overrides).await;

    let res = common::client()
        .get(format!("http://{addr}/blog/post"))
        .send()
        .await
        .unwrap();

    let links: Vec<&str> = res
        .headers()
        .get_all("link")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    let joined = links.join(", ");
    assert!(joined.contains("<http://site.test/custom>; rel=\"canonical\""));
    assert!(!joined.contains("/author/jane"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_admin_pages_get_block_script() {
    let origin = common::start_mock_origin("", ADMIN_PAGE).await;
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(origin)).await;

    let res = common::client()
        .get(format!("http://{addr}/wp-admin/index.php"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let body = res.text().await.unwrap();
    for block in [
        "core/post-author",
        "core/post-author-biography",
        "core/post-author-name",
    ] {
        assert!(body.contains(&format!("unregisterBlockType( '{block}' )")));
    }

    // Script lands inside the document head.
    let script_at = body.find("<script").unwrap();
    let head_end = body.find("</head>").unwrap();
    assert!(script_at < head_end);

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_admin_pages_left_alone() {
    let origin = common::start_mock_origin("", ADMIN_PAGE).await;
    let (addr, shutdown) = common::spawn_gateway(common::gateway_config(origin)).await;

    let res = common::client()
        .get(format!("http://{addr}/blog/post"))
        .send()
        .await
        .unwrap();

    let body = res.text().await.unwrap();
    assert!(!body.contains("unregisterBlockType"));
    assert_eq!(body, ADMIN_PAGE);

    shutdown.trigger();
}

#[tokio::test]
async fn test_disabled_gate_skips_injection() {
    let origin = common::start_mock_origin("", ADMIN_PAGE).await;
    let mut config = common::gateway_config(origin);
    config.gate.enabled = false;
    let (addr, shutdown) = common::spawn_gateway(config).await;

    let res = common::client()
        .get(format!("http://{addr}/wp-admin/index.php"))
        .send()
        .await
        .unwrap();

    let body = res.text().await.unwrap();
    assert!(!body.contains("unregisterBlockType"));

    shutdown.trigger();
}
