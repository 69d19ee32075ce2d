use std::sync::Arc;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};

use safestreets_web::{
    config::Config, router, services::auth::StubAuthenticator, state::AppState,
};

// Shared test context
struct TestContext {
    client: reqwest::Client,
    base_url: String,
}

impl TestContext {
    /// Spawns the app on an ephemeral port with a zero-latency stub
    /// authenticator and returns a cookie-carrying client against it.
    async fn spawn() -> Self {
        let config = Config {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            backend_url: None,
        };
        let state = AppState::with_authenticator(
            config,
            Arc::new(StubAuthenticator::new(Duration::ZERO)),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });

        Self {
            client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .unwrap(),
            base_url: format!("http://{}", addr),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn submit_login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .unwrap()
    }

    async fn page_body(&self, path: &str) -> String {
        self.client
            .get(self.url(path))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn login_rejects_blank_fields_without_a_credential_check() {
    let context = TestContext::spawn().await;

    for (username, password) in [("", ""), ("   ", "password123"), ("safestreets", " \t ")] {
        let response = context.submit_login(username, password).await;
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.cookies().count(), 0, "no session must be written");

        let body = response.text().await.unwrap();
        assert!(body.contains("Please enter both username and password."));
        assert!(body.contains("<form id=\"login-form\""), "form stays interactive");
    }
}

#[tokio::test]
async fn login_rejects_wrong_credentials() {
    let context = TestContext::spawn().await;

    let response = context.submit_login("safestreets", "wrong-password").await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.cookies().count(), 0);

    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid username or password. Please try again."));
    assert!(body.contains("<form id=\"login-form\""));
}

#[tokio::test]
async fn login_success_writes_the_session_and_schedules_the_redirect() {
    let context = TestContext::spawn().await;

    let response = context.submit_login("safestreets", "password123").await;
    assert_eq!(response.status().as_u16(), 200);

    let cookies: Vec<_> = response.cookies().collect();
    assert!(cookies.iter().any(|c| c.name() == "loggedInUser" && c.value() == "safestreets"));
    assert!(cookies.iter().any(|c| c.name() == "userData" && !c.value().is_empty()));

    let body = response.text().await.unwrap();
    assert!(body.contains("Login successful! Redirecting..."));
    assert!(body.contains("content=\"1.5;url=/dashboard\""));
}

#[tokio::test]
async fn dashboard_renders_the_sidebar_for_a_logged_in_user() {
    let context = TestContext::spawn().await;
    context.submit_login("safestreets", "password123").await;

    let body = context.page_body("/dashboard").await;
    assert!(!body.contains("<aside id=\"sidebar\" hidden>"));
    assert!(body.contains("Your Ride History"));
    assert!(body.contains("Asha"));
    assert!(body.contains("href=\"/logout\""));

    // Stub history renders in stored order.
    let first = body.find("From: Indiranagar").expect("first ride");
    let second = body.find("From: MG Road").expect("second ride");
    let third = body.find("From: HSR Layout").expect("third ride");
    assert!(first < second && second < third);

    // Re-rendering from unchanged storage is byte-identical.
    assert_eq!(body, context.page_body("/dashboard").await);
}

#[tokio::test]
async fn pages_without_a_session_keep_the_sidebar_hidden() {
    let context = TestContext::spawn().await;

    for path in ["/about", "/dashboard", "/profile"] {
        let body = context.page_body(path).await;
        assert!(
            body.contains("<aside id=\"sidebar\" hidden></aside>"),
            "{} should hide the sidebar region",
            path
        );
        assert!(!body.contains("Your Ride History"));
    }

    // The entry point lands on the login form.
    let body = context.page_body("/").await;
    assert!(body.contains("<form id=\"login-form\""));
}

#[tokio::test]
async fn corrupt_user_data_wipes_the_session_and_forces_login() {
    let context = TestContext::spawn().await;
    let b64 = |s: &str| general_purpose::URL_SAFE_NO_PAD.encode(s);

    // No cookie store and no redirect-following: the invalidation
    // response itself is under test.
    let plain = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let malformed = [
        "userData=".to_string(),                          // empty value
        "userData=!!!not-base64".to_string(),             // not base64
        format!("userData={}", b64("{\"firstName\":")),   // truncated JSON
        format!("userData={}", b64("[1,2,3]")),           // wrong type
    ];

    for cookie in malformed {
        let response = plain
            .get(context.url("/dashboard"))
            .header("Cookie", format!("loggedInUser=safestreets; {}", cookie))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 303, "cookie {:?}", cookie);
        assert_eq!(response.headers().get("location").unwrap(), "/login");

        let set_cookies: Vec<String> = response
            .headers()
            .get_all("set-cookie")
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert!(
            set_cookies
                .iter()
                .any(|c| c.starts_with("loggedInUser=") && c.contains("Max-Age=0")),
            "username key must be removed, got {:?}",
            set_cookies
        );
        assert!(
            set_cookies
                .iter()
                .any(|c| c.starts_with("userData=") && c.contains("Max-Age=0")),
            "profile key must be removed, got {:?}",
            set_cookies
        );
    }
}

#[tokio::test]
async fn logout_clears_the_session() {
    let context = TestContext::spawn().await;
    context.submit_login("safestreets", "password123").await;
    assert!(context.page_body("/dashboard").await.contains("Your Ride History"));

    // Logout forwards to the login page...
    let response = context.client.get(context.url("/logout")).send().await.unwrap();
    assert_eq!(response.url().path(), "/login");

    // ...and the next page load behaves exactly like "no session".
    let body = context.page_body("/dashboard").await;
    assert!(body.contains("<aside id=\"sidebar\" hidden></aside>"));
    assert!(!body.contains("Your Ride History"));
}
