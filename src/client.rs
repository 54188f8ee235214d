//! sts:AssumeRoleWithSAML API client

pub const STS_ENDPOINT: &str = "https://sts.amazonaws.com/";
const API_VERSION: &str = "2011-06-15";

/// DurationSeconds is only honored by STS within this range; out-of-range
/// requests omit the field and let the endpoint apply its default.
const SESSION_DURATION_RANGE: std::ops::RangeInclusive<u64> = 300..=86400;

/// Flattened result of one AssumeRoleWithSAML call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleCredentials {
    pub assumed_role_user_arn: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

/// https://docs.aws.amazon.com/STS/latest/APIReference/API_AssumeRoleWithSAML.html
/// (JSON rendition requested via `Accept: application/json`)
#[derive(Debug, serde::Deserialize)]
struct AssumeRoleWithSamlResponseWrapper {
    #[serde(rename = "AssumeRoleWithSAMLResponse")]
    response: AssumeRoleWithSamlResponse,
}

#[derive(Debug, serde::Deserialize)]
struct AssumeRoleWithSamlResponse {
    #[serde(rename = "AssumeRoleWithSAMLResult")]
    result: AssumeRoleWithSamlResult,
}

#[derive(Debug, serde::Deserialize)]
struct AssumeRoleWithSamlResult {
    #[serde(rename = "AssumedRoleUser")]
    assumed_role_user: AssumedRoleUser,
    #[serde(rename = "Credentials")]
    credentials: Credentials,
}

#[derive(Debug, serde::Deserialize)]
struct AssumedRoleUser {
    #[serde(rename = "Arn")]
    arn: String,
}

#[derive(Debug, serde::Deserialize)]
struct Credentials {
    #[serde(rename = "AccessKeyId")]
    access_key_id: String,
    #[serde(rename = "SecretAccessKey")]
    secret_access_key: String,
    #[serde(rename = "SessionToken")]
    session_token: String,
}

pub struct Client {
    http_client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl Client {
    pub fn new() -> Result<Self, crate::error::Error> {
        Self::with_endpoint(STS_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self, crate::error::Error> {
        let endpoint = reqwest::Url::parse(endpoint).map_err(|_| {
            crate::error::Error::ConfigError(format!("endpoint url is malformed: {endpoint}"))
        })?;
        Ok(Self {
            http_client: reqwest::Client::new(),
            endpoint,
        })
    }

    /// Exchange one role grant for temporary credentials. `assertion` is the
    /// still-transport-encoded SAMLResponse value, passed through to STS
    /// unchanged.
    pub async fn assume_role(
        &self,
        grant: &crate::assertion::RoleGrant,
        session_duration: Option<u64>,
        assertion: &str,
    ) -> Result<RoleCredentials, crate::error::Error> {
        let mut form = vec![
            ("Action", "AssumeRoleWithSAML".to_string()),
            ("Version", API_VERSION.to_string()),
            ("PrincipalArn", grant.principal_arn.clone()),
            ("RoleArn", grant.role_arn.clone()),
            ("SAMLAssertion", assertion.to_string()),
        ];
        if let Some(d) = session_duration.filter(|d| SESSION_DURATION_RANGE.contains(d)) {
            form.push(("DurationSeconds", d.to_string()));
        }

        let resp = self
            .http_client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| self.exchange_error(grant, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .map_err(|e| self.exchange_error(grant, e.to_string()))?;
            return Err(self.exchange_error(grant, format!("{status}: {body}")));
        }

        let wrapper = resp
            .json::<AssumeRoleWithSamlResponseWrapper>()
            .await
            .map_err(|e| self.exchange_error(grant, format!("unexpected response body: {e}")))?;

        let result = wrapper.response.result;
        Ok(RoleCredentials {
            assumed_role_user_arn: result.assumed_role_user.arn,
            access_key_id: result.credentials.access_key_id,
            secret_access_key: result.credentials.secret_access_key,
            session_token: result.credentials.session_token,
        })
    }

    /// Exchange every grant concurrently. Output order matches `grants`
    /// regardless of response arrival order; the first failure fails the
    /// whole call and no partial set is returned.
    pub async fn assume_roles(
        &self,
        grants: &[crate::assertion::RoleGrant],
        session_duration: Option<u64>,
        assertion: &str,
    ) -> Result<Vec<RoleCredentials>, crate::error::Error> {
        futures::future::try_join_all(
            grants
                .iter()
                .map(|grant| self.assume_role(grant, session_duration, assertion)),
        )
        .await
    }

    fn exchange_error(
        &self,
        grant: &crate::assertion::RoleGrant,
        reason: String,
    ) -> crate::error::Error {
        crate::error::Error::ExchangeError {
            role_arn: grant.role_arn.clone(),
            reason,
        }
    }
}
