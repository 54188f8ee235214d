//! Test helpers: fixture encoding and a local stand-in for the STS endpoint.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub(crate) fn encode_assertion(xml: &str) -> String {
    use base64ct::Encoding;
    base64ct::Base64::encode_string(xml.as_bytes())
}

#[derive(Clone, Debug, Default)]
struct Behavior {
    fail: HashSet<String>,
    malformed: HashSet<String>,
    delay_ms: HashMap<String, u64>,
}

#[derive(Clone, Default)]
struct MockState {
    behavior: Behavior,
    forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

/// In-process AssumeRoleWithSAML endpoint. Answers every request with a
/// canned JSON body derived from the requested RoleArn, with optional
/// per-role delays, failures, and malformed bodies.
pub(crate) struct MockSts {
    pub(crate) endpoint: String,
    forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub(crate) struct MockStsBuilder {
    behavior: Behavior,
}

impl MockSts {
    pub(crate) fn builder() -> MockStsBuilder {
        MockStsBuilder {
            behavior: Behavior::default(),
        }
    }

    pub(crate) async fn spawn() -> Self {
        Self::builder().spawn().await
    }

    /// Request bodies seen so far, as parsed form fields, in arrival order.
    pub(crate) fn recorded_forms(&self) -> Vec<HashMap<String, String>> {
        self.forms.lock().unwrap().clone()
    }
}

impl MockStsBuilder {
    pub(crate) fn fail(mut self, role_arn: &str) -> Self {
        self.behavior.fail.insert(role_arn.to_string());
        self
    }

    pub(crate) fn malformed(mut self, role_arn: &str) -> Self {
        self.behavior.malformed.insert(role_arn.to_string());
        self
    }

    pub(crate) fn delay_ms(mut self, role_arn: &str, millis: u64) -> Self {
        self.behavior.delay_ms.insert(role_arn.to_string(), millis);
        self
    }

    pub(crate) async fn spawn(self) -> MockSts {
        let state = MockState {
            behavior: self.behavior,
            forms: Default::default(),
        };
        let forms = state.forms.clone();

        let router = axum::Router::new()
            .route("/", axum::routing::post(assume_role_with_saml))
            .layer(axum::extract::Extension(state));

        let server = axum::Server::bind(&std::net::SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(router.into_make_service());
        let endpoint = format!("http://{}/", server.local_addr());
        tokio::spawn(server);

        MockSts { endpoint, forms }
    }
}

async fn assume_role_with_saml(
    axum::extract::Extension(state): axum::extract::Extension<MockState>,
    body: String,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    let form: HashMap<String, String> = url::form_urlencoded::parse(body.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let role_arn = form.get("RoleArn").cloned().unwrap_or_default();
    state.forms.lock().unwrap().push(form);

    if let Some(millis) = state.behavior.delay_ms.get(&role_arn) {
        tokio::time::sleep(std::time::Duration::from_millis(*millis)).await;
    }

    if state.behavior.fail.contains(&role_arn) {
        return (axum::http::StatusCode::FORBIDDEN, "access denied").into_response();
    }

    if state.behavior.malformed.contains(&role_arn) {
        return axum::Json(serde_json::json!({ "AssumeRoleWithSAMLResponse": {} }))
            .into_response();
    }

    let role_name = role_arn.rsplit('/').next().unwrap_or("unknown").to_string();
    axum::Json(serde_json::json!({
        "AssumeRoleWithSAMLResponse": {
            "AssumeRoleWithSAMLResult": {
                "AssumedRoleUser": {
                    "Arn": format!("arn:aws:sts::111:assumed-role/{role_name}/session"),
                    "AssumedRoleId": format!("AROEXAMPLE:{role_name}"),
                },
                "Credentials": {
                    "AccessKeyId": format!("AKIA{role_name}"),
                    "SecretAccessKey": format!("secret{role_name}"),
                    "SessionToken": format!("token{role_name}"),
                    "Expiration": 1700000000.0,
                },
            },
        },
    }))
    .into_response()
}
