pub async fn root() -> &'static str {
    "Mock sports & news feed backend. Try GET /api/feed.getFeed?limit=5"
}

pub async fn health() -> &'static str {
    "OK"
}
