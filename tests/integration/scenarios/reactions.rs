use crate::integration::helpers::client::TestClient;
use axum::http::StatusCode;
use serde_json::json;

/// 観点: like を押すと 3 -> 4 になり、フィードにも反映される
#[tokio::test]
async fn test_like_is_reflected_in_feed() {
    let client = TestClient::with_posts(12).await;

    let (status, body) = client.react("p1", "like").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["reactions"]["like"]["count"], 4);
    assert_eq!(body["reactions"]["like"]["userReacted"], true);
    assert_eq!(body["reactions"]["love"]["count"], 0);
    assert_eq!(body["reactions"]["love"]["userReacted"], false);

    let (_, feed) = client.get_feed(None, Some(5)).await;
    assert_eq!(feed["posts"][0]["reactions"]["like"]["count"], 4);
    assert_eq!(feed["posts"][0]["reactions"]["like"]["userReacted"], true);
    assert_eq!(feed["posts"][1]["reactions"]["like"]["count"], 0);
}

/// 観点: 同じリアクションを 2 回押すと元に戻る
#[tokio::test]
async fn test_toggle_twice_restores() {
    let client = TestClient::with_posts(3).await;
    let (_, before) = client.get("/api/feed.getPostById?id=p2").await;

    client.react("p2", "wow").await;
    let (status, body) = client.react("p2", "wow").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reactions"], before["reactions"]);
}

/// 観点: 存在しない投稿は 404、不正なリアクション種別やボディは 400
#[tokio::test]
async fn test_react_errors() {
    let client = TestClient::with_posts(3).await;

    let (status, body) = client.react("ghost", "like").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Post not found");

    let (status, _) = client.react("p1", "clap").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client
        .post_json("/api/feed.reactToPost", &json!({ "postId": "p1" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client.react("", "like").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 失敗したリクエストは状態を変えない
    assert!(client.state.feed.overlay().is_empty().unwrap());
}

/// 観点: 1 件だけ clear すると、その投稿だけ初期値に戻り他は残る
#[tokio::test]
async fn test_clear_single_post() {
    let client = TestClient::with_posts(5).await;
    client.react("p1", "like").await;
    client.react("p2", "love").await;

    let (status, body) = client
        .post_json("/api/feed.clearReactions", &json!({ "postId": "p1" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, p1) = client.get("/api/feed.getPostById?id=p1").await;
    assert_eq!(p1["reactions"]["like"]["count"], 3);
    assert_eq!(p1["reactions"]["like"]["userReacted"], false);

    let (_, p2) = client.get("/api/feed.getPostById?id=p2").await;
    assert_eq!(p2["reactions"]["love"]["count"], 1);
    assert_eq!(p2["reactions"]["love"]["userReacted"], true);
}

/// 観点: ボディなし・空オブジェクトでは全件クリア
#[tokio::test]
async fn test_clear_all() {
    let client = TestClient::with_posts(5).await;

    client.react("p1", "like").await;
    client.react("p3", "sad").await;
    let (status, _) = client.post_raw("/api/feed.clearReactions", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(client.state.feed.overlay().is_empty().unwrap());

    client.react("p4", "angry").await;
    let (status, _) = client.post_json("/api/feed.clearReactions", &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(client.state.feed.overlay().is_empty().unwrap());
}

/// 観点: 壊れた JSON ボディは 400
#[tokio::test]
async fn test_clear_malformed_body() {
    let client = TestClient::with_posts(2).await;
    let (status, body) = client.post_raw("/api/feed.clearReactions", "{ nope").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}
