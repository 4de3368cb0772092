use reqwest::{header, StatusCode};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the app (same router as prod) against a fresh in-memory
        // database, bound to an ephemeral port.
        let pool = quill_storage::connect_in_memory()
            .await
            .expect("failed to open in-memory database");
        let app = quill_api::app::build_app(pool).await;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One logical browser: keeps its session cookie, never follows redirects
/// (the tests assert on the 302s themselves).
fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

async fn register_and_login(client: &reqwest::Client, base_url: &str, username: &str) {
    let res = client
        .post(format!("{base_url}/auth/register"))
        .form(&[("username", username), ("password", "secret")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[header::LOCATION], "/auth/login");

    let res = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("username", username), ("password", "secret")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[header::LOCATION], "/");
}

async fn create_post(client: &reqwest::Client, base_url: &str, title: &str, body: &str) {
    let res = client
        .post(format!("{base_url}/post/create"))
        .form(&[("title", title), ("body", body)])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[header::LOCATION], "/");
}

async fn page(client: &reqwest::Client, url: String) -> String {
    let res = client.get(url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.text().await.unwrap()
}

#[tokio::test]
async fn anonymous_index_shows_auth_links_and_no_edit_links() {
    let srv = TestServer::spawn().await;

    let author = browser();
    register_and_login(&author, &srv.base_url, "alice").await;
    create_post(&author, &srv.base_url, "test title", "test\nbody").await;

    let visitor = browser();
    let html = page(&visitor, format!("{}/", srv.base_url)).await;
    assert!(html.contains("Log In"));
    assert!(html.contains("Register"));
    assert!(html.contains("test title"));
    assert!(!html.contains("href=\"/post/update/1\""));
}

#[tokio::test]
async fn login_required_posts_redirect_to_login() {
    let srv = TestServer::spawn().await;
    let client = browser();

    for path in ["/post/create", "/post/update/1", "/post/delete/1"] {
        let res = client
            .post(format!("{}{}", srv.base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND, "POST {path}");
        assert_eq!(res.headers()[header::LOCATION], "/auth/login", "POST {path}");
    }
}

#[tokio::test]
async fn index_after_login_shows_own_edit_links_only() {
    let srv = TestServer::spawn().await;

    let alice = browser();
    register_and_login(&alice, &srv.base_url, "alice").await;
    create_post(&alice, &srv.base_url, "alice's post", "").await;

    let bob = browser();
    register_and_login(&bob, &srv.base_url, "bob").await;
    create_post(&bob, &srv.base_url, "bob's post", "").await;

    let html = page(&alice, format!("{}/", srv.base_url)).await;
    assert!(html.contains("Log Out"));
    assert!(html.contains("by alice on"));
    assert!(html.contains("href=\"/post/update/1\""));
    assert!(!html.contains("href=\"/post/update/2\""));

    let html = page(&bob, format!("{}/", srv.base_url)).await;
    assert!(html.contains("href=\"/post/update/2\""));
    assert!(!html.contains("href=\"/post/update/1\""));
}

#[tokio::test]
async fn non_owner_cannot_touch_another_users_post() {
    let srv = TestServer::spawn().await;

    let alice = browser();
    register_and_login(&alice, &srv.base_url, "alice").await;
    create_post(&alice, &srv.base_url, "alice's post", "").await;

    let mallory = browser();
    register_and_login(&mallory, &srv.base_url, "mallory").await;

    let res = mallory
        .post(format!("{}/post/update/1", srv.base_url))
        .form(&[("title", "hijacked"), ("body", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = mallory
        .post(format!("{}/post/delete/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The edit page itself is owner-only too.
    let res = mallory
        .get(format!("{}/post/update/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // And the post is untouched.
    let html = page(&mallory, format!("{}/post/1", srv.base_url)).await;
    assert!(html.contains("alice&#39;s post"));
}

#[tokio::test]
async fn mutating_a_missing_post_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = browser();
    register_and_login(&client, &srv.base_url, "alice").await;

    let res = client
        .post(format!("{}/post/update/2", srv.base_url))
        .form(&[("title", "x"), ("body", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(format!("{}/post/delete/2", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_requires_a_title() {
    let srv = TestServer::spawn().await;
    let client = browser();
    register_and_login(&client, &srv.base_url, "alice").await;

    let res = client
        .post(format!("{}/post/create", srv.base_url))
        .form(&[("title", ""), ("body", "orphan body")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("Title is required."));
    // The submitted body is kept in the re-rendered form.
    assert!(html.contains("orphan body"));

    // Nothing was stored.
    let html = page(&client, format!("{}/", srv.base_url)).await;
    assert_eq!(html.matches("<article").count(), 0);
}

#[tokio::test]
async fn update_requires_a_title_too() {
    let srv = TestServer::spawn().await;
    let client = browser();
    register_and_login(&client, &srv.base_url, "alice").await;
    create_post(&client, &srv.base_url, "original", "kept").await;

    let res = client
        .post(format!("{}/post/update/1", srv.base_url))
        .form(&[("title", "   "), ("body", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("Title is required."));

    // Original title survives.
    let html = page(&client, format!("{}/post/1", srv.base_url)).await;
    assert!(html.contains("original"));
}

#[tokio::test]
async fn post_lifecycle_create_update_delete() {
    let srv = TestServer::spawn().await;
    let client = browser();
    register_and_login(&client, &srv.base_url, "alice").await;

    // Create: form page is reachable, submit redirects home, post appears.
    let html = page(&client, format!("{}/post/create", srv.base_url)).await;
    assert!(html.contains("<form"));
    create_post(&client, &srv.base_url, "created", "").await;
    let html = page(&client, format!("{}/", srv.base_url)).await;
    assert_eq!(html.matches("<article").count(), 1);
    assert!(html.contains("created"));

    // Update: edit page is prefilled, submit persists the new title.
    let html = page(&client, format!("{}/post/update/1", srv.base_url)).await;
    assert!(html.contains("created"));
    let res = client
        .post(format!("{}/post/update/1", srv.base_url))
        .form(&[("title", "updated"), ("body", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    let html = page(&client, format!("{}/post/1", srv.base_url)).await;
    assert!(html.contains("updated"));

    // Delete: redirects home, post is gone.
    let res = client
        .post(format!("{}/post/delete/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[header::LOCATION], "/");

    let res = client
        .get(format!("{}/post/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn detail_is_public_but_the_edit_page_is_not() {
    let srv = TestServer::spawn().await;

    let author = browser();
    register_and_login(&author, &srv.base_url, "alice").await;
    create_post(&author, &srv.base_url, "test title", "test body").await;

    // Anonymous visitors can read the detail page but get bounced from the
    // edit page.
    let visitor = browser();
    let html = page(&visitor, format!("{}/post/1", srv.base_url)).await;
    assert!(html.contains("test title"));
    let res = visitor
        .get(format!("{}/post/update/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[header::LOCATION], "/auth/login");

    // The owner can read both.
    let html = page(&author, format!("{}/post/1", srv.base_url)).await;
    assert!(html.contains("test title"));
    let res = author
        .get(format!("{}/post/update/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_registration_is_rejected_with_a_message() {
    let srv = TestServer::spawn().await;
    let client = browser();
    register_and_login(&client, &srv.base_url, "alice").await;

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .form(&[("username", "alice"), ("password", "other")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res
        .text()
        .await
        .unwrap()
        .contains("User alice is already registered."));
}

#[tokio::test]
async fn bad_credentials_re_render_the_login_form() {
    let srv = TestServer::spawn().await;
    let client = browser();
    register_and_login(&client, &srv.base_url, "alice").await;

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .form(&[("username", "nobody"), ("password", "secret")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("Incorrect username."));

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .form(&[("username", "alice"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("Incorrect password."));
}

#[tokio::test]
async fn empty_registration_fields_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = browser();

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .form(&[("username", ""), ("password", "pw")])
        .send()
        .await
        .unwrap();
    assert!(res.text().await.unwrap().contains("Username is required."));

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .form(&[("username", "alice"), ("password", "")])
        .send()
        .await
        .unwrap();
    assert!(res.text().await.unwrap().contains("Password is required."));
}

#[tokio::test]
async fn logout_ends_the_session() {
    let srv = TestServer::spawn().await;
    let client = browser();
    register_and_login(&client, &srv.base_url, "alice").await;

    let res = client
        .post(format!("{}/auth/logout", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[header::LOCATION], "/");

    let html = page(&client, format!("{}/", srv.base_url)).await;
    assert!(html.contains("Log In"));
    assert!(!html.contains("Log Out"));

    let res = client
        .post(format!("{}/post/create", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[header::LOCATION], "/auth/login");
}

#[tokio::test]
async fn logout_requires_a_session() {
    let srv = TestServer::spawn().await;
    let client = browser();

    let res = client
        .post(format!("{}/auth/logout", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[header::LOCATION], "/auth/login");
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = browser()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
