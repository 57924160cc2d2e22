use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use quill::posts::PostStore;
use quill::{Response, Router, Server};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

fn app() -> (Arc<PostStore>, Router) {
    let store = Arc::new(PostStore::seeded());
    (Arc::clone(&store), quill::app(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let body = body.map(|v| Bytes::from(v.to_string())).unwrap_or_default();
    let req = http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.dispatch(req).await
}

fn json_body(res: &Response) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

fn titles(res: &Response) -> Vec<String> {
    json_body(res)
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_owned())
        .collect()
}

fn ids(res: &Response) -> Vec<u64> {
    json_body(res)
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn list_defaults_to_insertion_order() {
    let (_, app) = app();
    let res = send(&app, "GET", "/api/posts", None).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(
        json_body(&res),
        json!([
            {"id": 1, "title": "First post", "content": "This is the first post."},
            {"id": 2, "title": "Second post", "content": "This is the second post."},
        ])
    );
}

#[tokio::test]
async fn list_sorted_desc_leaves_store_order_alone() {
    let (_, app) = app();
    send(&app, "POST", "/api/posts", Some(json!({"title": "Another", "content": "z"}))).await;

    let res = send(&app, "GET", "/api/posts?sort=title&direction=desc", None).await;
    assert_eq!(titles(&res), ["Second post", "First post", "Another"]);

    let res = send(&app, "GET", "/api/posts", None).await;
    assert_eq!(ids(&res), [1, 2, 3]);

    let res = send(&app, "GET", "/api/posts?direction=desc", None).await;
    assert_eq!(ids(&res), [3, 2, 1]);
}

#[tokio::test]
async fn list_rejects_unknown_sort_and_direction() {
    let (_, app) = app();
    let res = send(&app, "GET", "/api/posts?sort=colour", None).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(json_body(&res), json!({"error": "Invalid sort"}));

    let res = send(&app, "GET", "/api/posts?sort=title&direction=sideways", None).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(json_body(&res), json!({"error": "Invalid direction"}));
}

#[tokio::test]
async fn create_reports_missing_fields() {
    let (store, app) = app();
    let cases = [
        (json!({"title": "T"}), "Missing post content"),
        (json!({"content": "C"}), "Missing post title"),
        (json!({}), "Missing post title and content"),
    ];
    for (body, message) in cases {
        let res = send(&app, "POST", "/api/posts", Some(body)).await;
        assert_eq!(res.status_code(), 400);
        assert_eq!(json_body(&res), json!({"error": message}));
    }
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn create_rejects_malformed_bodies() {
    let (store, app) = app();
    let req = http::Request::post("/api/posts").body(Bytes::from_static(b"{oops")).unwrap();
    let res = app.dispatch(req).await;
    assert_eq!(res.status_code(), 400);
    assert!(json_body(&res)["error"].as_str().unwrap().starts_with("Invalid JSON body"));

    let res = send(&app, "POST", "/api/posts", Some(json!({"title": 7, "content": "C"}))).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn create_assigns_increasing_ids_that_are_never_reused() {
    let (_, app) = app();
    let body = json!({"title": "T", "content": "C"});

    let res = send(&app, "POST", "/api/posts", Some(body.clone())).await;
    assert_eq!(res.status_code(), 201);
    assert_eq!(res.header("location"), Some("/api/posts/3"));
    assert_eq!(json_body(&res), json!({"id": 3, "title": "T", "content": "C"}));

    let res = send(&app, "POST", "/api/posts", Some(body.clone())).await;
    assert_eq!(json_body(&res)["id"], 4);

    send(&app, "DELETE", "/api/posts/4", None).await;
    send(&app, "DELETE", "/api/posts/3", None).await;
    let res = send(&app, "POST", "/api/posts", Some(body)).await;
    assert_eq!(json_body(&res)["id"], 5);
}

#[tokio::test]
async fn delete_removes_only_the_target() {
    let (_, app) = app();
    let res = send(&app, "DELETE", "/api/posts/1", None).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(
        json_body(&res),
        json!({"message": "Post with id 1 has been deleted successfully."})
    );

    let res = send(&app, "GET", "/api/posts", None).await;
    assert_eq!(ids(&res), [2]);
}

#[tokio::test]
async fn delete_unknown_or_non_integer_id_is_404() {
    let (_, app) = app();
    let res = send(&app, "DELETE", "/api/posts/999", None).await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(json_body(&res), json!({"error": "Post not found"}));

    let res = send(&app, "DELETE", "/api/posts/abc", None).await;
    assert_eq!(res.status_code(), 404);
}

#[tokio::test]
async fn signed_ids_do_not_match_a_post() {
    let (store, app) = app();
    for uri in ["/api/posts/+1", "/api/posts/-1", "/api/posts/%2B1"] {
        let res = send(&app, "DELETE", uri, None).await;
        assert_eq!(res.status_code(), 404, "{uri}");
    }
    let res = send(&app, "PUT", "/api/posts/+2", Some(json!({"title": "x"}))).await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(2).unwrap().title, "Second post");
}

#[tokio::test]
async fn update_merges_present_fields() {
    let (store, app) = app();
    let res = send(&app, "PUT", "/api/posts/2", Some(json!({"content": "new"}))).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(json_body(&res), json!({"id": 2, "title": "Second post", "content": "new"}));

    let res = send(&app, "PUT", "/api/posts/2", Some(json!({"title": "Renamed", "id": 40}))).await;
    assert_eq!(json_body(&res), json!({"id": 2, "title": "Renamed", "content": "new"}));
    assert_eq!(store.get(2).unwrap().title, "Renamed");

    let res = send(&app, "GET", "/api/posts", None).await;
    assert_eq!(ids(&res), [1, 2]);
}

#[tokio::test]
async fn update_unknown_id_is_404_even_with_a_bad_body() {
    let (_, app) = app();
    let res = send(&app, "PUT", "/api/posts/999", Some(json!({"title": "x"}))).await;
    assert_eq!(res.status_code(), 404);

    let req = http::Request::put("/api/posts/999").body(Bytes::from_static(b"nope")).unwrap();
    assert_eq!(app.dispatch(req).await.status_code(), 404);

    let req = http::Request::put("/api/posts/1").body(Bytes::from_static(b"nope")).unwrap();
    assert_eq!(app.dispatch(req).await.status_code(), 400);
}

#[tokio::test]
async fn search_by_title_is_case_insensitive() {
    let (_, app) = app();
    let res = send(&app, "GET", "/api/posts/search?title=first", None).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(titles(&res), ["First post"]);
}

#[tokio::test]
async fn search_without_params_returns_everything() {
    let (_, app) = app();
    let res = send(&app, "GET", "/api/posts/search", None).await;
    assert_eq!(ids(&res), [1, 2]);

    let res = send(&app, "GET", "/api/posts/search?title=&content=", None).await;
    assert_eq!(ids(&res), [1, 2]);
}

#[tokio::test]
async fn search_ors_fields_and_may_be_empty() {
    let (_, app) = app();
    let res = send(&app, "GET", "/api/posts/search?title=second&content=FIRST", None).await;
    assert_eq!(ids(&res), [1, 2]);

    let res = send(&app, "GET", "/api/posts/search?title=zzz", None).await;
    assert_eq!(json_body(&res), json!([]));
}

#[tokio::test]
async fn search_honours_only_the_first_repeated_param() {
    let (_, app) = app();
    let res = send(&app, "GET", "/api/posts/search?content=second&content=first", None).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(titles(&res), ["Second post"]);
}

#[tokio::test]
async fn every_response_allows_any_origin() {
    let (_, app) = app();
    let res = send(&app, "GET", "/api/posts?sort=colour", None).await;
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));

    let res = send(&app, "OPTIONS", "/api/posts/1", None).await;
    assert_eq!(res.status_code(), 204);
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn unmodelled_method_is_405_with_cors() {
    let (_, app) = app();
    let res = send(&app, "PURGE", "/api/posts", None).await;
    assert_eq!(res.status_code(), 405);
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn health_probes() {
    let (_, app) = app();
    assert_eq!(send(&app, "GET", "/healthz", None).await.body(), b"ok");
    assert_eq!(send(&app, "GET", "/readyz", None).await.body(), b"ready");
}

#[tokio::test]
async fn serves_over_tcp_and_shuts_down() {
    let (_, app) = app();
    let (addr_tx, addr_rx) = oneshot::channel::<SocketAddr>();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        Server::bind("127.0.0.1:0".parse().unwrap())
            .serve_with_shutdown(
                app,
                |addr| {
                    let _ = addr_tx.send(addr);
                },
                async {
                    let _ = stop_rx.await;
                },
            )
            .await
    });

    let addr = addr_rx.await.unwrap();
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /api/posts/search?title=second HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 200 OK\r\n"), "{raw}");
    assert!(raw.to_ascii_lowercase().contains("access-control-allow-origin: *"));
    let body = raw.split("\r\n\r\n").nth(1).unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(body).unwrap(),
        json!([{"id": 2, "title": "Second post", "content": "This is the second post."}])
    );

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
