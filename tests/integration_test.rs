use docsrs_mcp::candidates::ItemKind;
use docsrs_mcp::config::ClientConfig;
use docsrs_mcp::docs_parser::DocsRsClient;
use docsrs_mcp::error::DocsError;
use docsrs_mcp::registry::{NO_DESCRIPTION, SortKey};
use mockito::{Matcher, Server, ServerGuard};

const TOKIO_INDEX: &str = r#"<!DOCTYPE html><html><body>
<nav class="sidebar"><a href="struct.Sidebar.html">Sidebar</a></nav>
<section id="main-content">
  <h1>Crate tokio</h1>
  <details class="toggle top-doc" open><div class="docblock">
    <p>A runtime for writing reliable network applications without compromising speed.</p>
    <pre class="rust rust-example-rendered"><code>#[tokio::main]
async fn main() {}</code></pre>
  </div></details>
</section></body></html>"#;

const TOKIO_ALL: &str = r#"<!DOCTYPE html><html><body>
<section id="main-content"><h1>List of all items</h1>
<h3 id="structs">Structs</h3><ul class="all-items">
  <li><a href="runtime/struct.Runtime.html">runtime::Runtime</a></li>
  <li><a href="runtime/struct.Builder.html">runtime::Builder</a></li>
  <li><a href="sync/struct.Mutex.html">sync::Mutex</a></li>
  <li><a href="sync/struct.Mutex.html">sync::Mutex</a></li>
</ul>
<h3 id="functions">Functions</h3><ul class="all-items">
  <li><a href="runtime/fn.spawn_runtime.html">runtime::spawn_runtime</a></li>
  <li><a href="task/fn.spawn.html">task::spawn</a></li>
</ul>
<h3 id="modules">Modules</h3><ul class="all-items">
  <li><a href="runtime/index.html">runtime</a></li>
</ul></section></body></html>"#;

async fn setup() -> (ServerGuard, DocsRsClient) {
    let server = Server::new_async().await;
    let config = ClientConfig::default()
        .with_docs_base_url(server.url())
        .with_registry_base_url(format!("{}/api/v1", server.url()));
    let client = DocsRsClient::new(config).expect("client builds");
    (server, client)
}

async fn mock_latest(server: &mut ServerGuard, krate: &str, version: &str) -> mockito::Mock {
    server
        .mock("GET", format!("/api/v1/crates/{krate}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"crate":{{"name":"{krate}","max_version":"{version}"}},"versions":[]}}"#
        ))
        .create_async()
        .await
}

#[tokio::test]
async fn test_overview_with_latest_version() {
    let (mut server, client) = setup().await;
    let registry = mock_latest(&mut server, "tokio", "1.44.2").await;
    let page = server
        .mock("GET", "/tokio/1.44.2/tokio/index.html")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(TOKIO_INDEX)
        .create_async()
        .await;

    let out = client.crate_overview("tokio", None).await.unwrap();

    registry.assert_async().await;
    page.assert_async().await;
    assert!(out.starts_with("# tokio 1.44.2\n"));
    assert!(out.contains(&format!("Source: {}/tokio/1.44.2/tokio/index.html", server.url())));
    assert!(out.contains("A runtime for writing reliable network applications"));
    assert!(out.contains("```"));
    assert!(!out.contains("Sidebar"));
}

#[tokio::test]
async fn test_overview_falls_back_to_directory_layout() {
    let (mut server, client) = setup().await;
    let missing = server
        .mock("GET", "/old/0.1.0/old/index.html")
        .with_status(404)
        .create_async()
        .await;
    let dir = server
        .mock("GET", "/old/0.1.0/old/")
        .with_status(200)
        .with_body(r#"<html><body><div id="main"><div class="docblock"><p>Legacy layout docs.</p></div></div></body></html>"#)
        .create_async()
        .await;

    let out = client.crate_overview("old", Some("0.1.0")).await.unwrap();

    missing.assert_async().await;
    dir.assert_async().await;
    assert!(out.contains("Legacy layout docs."));
}

#[tokio::test]
async fn test_overview_is_idempotent() {
    let (mut server, client) = setup().await;
    let _page = server
        .mock("GET", "/tokio/1.0.0/tokio/index.html")
        .with_status(200)
        .with_body(TOKIO_INDEX)
        .expect(2)
        .create_async()
        .await;

    let first = client.crate_overview("tokio", Some("1.0.0")).await.unwrap();
    let second = client.crate_overview("tokio", Some("1.0.0")).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_item_docs_struct_page() {
    let (mut server, client) = setup().await;
    let page = server
        .mock("GET", "/wasmtime/25.0.0/wasmtime/component/struct.Component.html")
        .with_status(200)
        .with_body(
            r#"<html><body><section id="main-content">
            <pre class="rust item-decl"><code>pub struct Component { /* private fields */ }</code></pre>
            <div class="docblock"><p>A compiled WebAssembly Component.</p></div>
            </section></body></html>"#,
        )
        .create_async()
        .await;

    let out = client
        .item_docs(
            "wasmtime",
            ItemKind::Struct,
            "wasmtime::component::Component",
            Some("25.0.0"),
        )
        .await
        .unwrap();

    page.assert_async().await;
    assert!(out.starts_with("# wasmtime::component::Component (struct)\n"));
    assert!(out.contains("A compiled WebAssembly Component."));
    assert!(out.contains("/wasmtime/25.0.0/wasmtime/component/struct.Component.html"));
}

#[tokio::test]
async fn test_item_docs_module_page() {
    let (mut server, client) = setup().await;
    let page = server
        .mock("GET", "/wasmtime/25.0.0/wasmtime/component/index.html")
        .with_status(200)
        .with_body(r#"<html><body><section id="main-content"><p>Component model support.</p></section></body></html>"#)
        .create_async()
        .await;

    let out = client
        .item_docs("wasmtime", ItemKind::Module, "wasmtime::component", Some("25.0.0"))
        .await
        .unwrap();

    page.assert_async().await;
    assert!(out.contains("Component model support."));
}

#[tokio::test]
async fn test_item_docs_missing_page_is_not_found() {
    let (mut server, client) = setup().await;
    let _page = server
        .mock("GET", "/serde/1.0.0/serde/struct.Nope.html")
        .with_status(404)
        .create_async()
        .await;

    let err = client
        .item_docs("serde", ItemKind::Struct, "serde::Nope", Some("1.0.0"))
        .await
        .unwrap_err();

    assert!(matches!(err.root(), DocsError::DocumentNotFound { tried: 1, .. }));
}

#[tokio::test]
async fn test_search_in_crate_filters_and_dedups() {
    let (mut server, client) = setup().await;
    let _page = server
        .mock("GET", "/tokio/1.44.2/tokio/all.html")
        .with_status(200)
        .with_body(TOKIO_ALL)
        .create_async()
        .await;

    let out = client
        .search_in_crate("tokio", "MUTEX", Some("1.44.2"), None)
        .await
        .unwrap();
    let base = format!("{}/tokio/1.44.2/tokio", server.url());
    assert_eq!(
        out,
        format!(
            "# Items in tokio 1.44.2 matching \"MUTEX\"\n\n- [sync::Mutex]({base}/sync/struct.Mutex.html) (struct)\n"
        )
    );
}

#[tokio::test]
async fn test_search_in_crate_kind_filter() {
    let (mut server, client) = setup().await;
    let _page = server
        .mock("GET", "/tokio/1.44.2/tokio/all.html")
        .with_status(200)
        .with_body(TOKIO_ALL)
        .create_async()
        .await;

    let out = client
        .search_in_crate("tokio", "runtime", Some("1.44.2"), Some("function"))
        .await
        .unwrap();

    assert!(out.contains("[runtime::spawn_runtime]"));
    assert!(!out.contains("[runtime::Runtime]"));
    assert!(!out.contains("[runtime::Builder]"));
    // modules are unrecognized by the classifier and never listed
    assert!(!out.contains("[runtime]("));
}

#[tokio::test]
async fn test_search_in_crate_falls_back_to_directory() {
    let (mut server, client) = setup().await;
    let _all = server
        .mock("GET", "/tiny/0.2.0/tiny/all.html")
        .with_status(404)
        .create_async()
        .await;
    let _dir = server
        .mock("GET", "/tiny/0.2.0/tiny/")
        .with_status(200)
        .with_body(r#"<html><body><section id="main-content"><a href="fn.hello.html">hello</a></section></body></html>"#)
        .create_async()
        .await;

    let out = client
        .search_in_crate("tiny", "hel", Some("0.2.0"), None)
        .await
        .unwrap();
    assert!(out.contains("- [hello]("));
    assert!(out.contains("(function)"));
}

#[tokio::test]
async fn test_search_crates_flow() {
    let (mut server, client) = setup().await;
    let m = server
        .mock("GET", "/api/v1/crates")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "async runtime".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
            Matcher::UrlEncoded("sort".into(), "relevance".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"crates":[{"name":"smol","downloads":9,"max_version":"2.0.2"}]}"#)
        .create_async()
        .await;

    let out = client
        .search_crates("async runtime", Some(150), Some(SortKey::Relevance))
        .await
        .unwrap();

    m.assert_async().await;
    assert!(out.contains("## smol (v2.0.2)"));
    assert!(out.contains(NO_DESCRIPTION));
    assert!(!out.contains("undefined"));
}

#[tokio::test]
async fn test_version_resolution_failure_aborts_before_docs_fetch() {
    let (mut server, client) = setup().await;
    let _registry = server
        .mock("GET", "/api/v1/crates/ghost")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"crate":{"name":"ghost"}}"#)
        .create_async()
        .await;
    let docs = server
        .mock("GET", Matcher::Regex("^/ghost/.*".to_string()))
        .expect(0)
        .create_async()
        .await;

    let err = client.crate_overview("ghost", Some("latest")).await.unwrap_err();

    docs.assert_async().await;
    assert!(matches!(err.root(), DocsError::VersionResolution { .. }));
    assert!(err.to_string().contains("ghost"));
}
