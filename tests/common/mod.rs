#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use frontdesk::{
    store::{AppointmentStore, ReviewStore},
    AppState, Config,
};

/// A router over fresh stores in a temporary directory, which also serves
/// as the public directory.
pub struct TestApp {
    pub dir: TempDir,
    pub router: Router,
}

pub async fn spawn() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Welcome</h1>").unwrap();

    let appointments_url = format!("sqlite://{}", dir.path().join("appointments.db").display());
    let reviews_url = format!("sqlite://{}", dir.path().join("reviews.db").display());

    let state = AppState {
        appointments: AppointmentStore::open(&appointments_url, 4).await.unwrap(),
        reviews: ReviewStore::open(&reviews_url, 4).await.unwrap(),
    };
    let router = frontdesk::app(state, &config(&dir));

    TestApp { dir, router }
}

/// A router whose stores both failed to open.
pub fn spawn_unavailable() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState {
        appointments: AppointmentStore::unavailable(),
        reviews: ReviewStore::unavailable(),
    };
    let router = frontdesk::app(state, &config(&dir));

    TestApp { dir, router }
}

fn config(dir: &TempDir) -> Config {
    let public_dir = dir.path().display().to_string();
    Config::from_lookup(|key| match key {
        "PUBLIC_DIR" => Some(public_dir.clone()),
        _ => None,
    })
    .unwrap()
}

impl TestApp {
    /// URL of one of the app's database files.
    pub fn db_url(&self, file: &str) -> String {
        format!("sqlite://{}", self.dir.path().join(file).display())
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Method::GET, uri, Body::empty(), None).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(Method::DELETE, uri, Body::empty(), None).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send(Method::POST, uri, Body::from(body.to_string()), Some("application/json"))
            .await
    }

    pub async fn post_form(&self, uri: &str, body: &'static str) -> Response<Body> {
        self.send(
            Method::POST,
            uri,
            Body::from(body),
            Some("application/x-www-form-urlencoded"),
        )
        .await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> Response<Body> {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        self.router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap()
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn expect(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
