//! The decode → extract → exchange → format → deliver pipeline

pub const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Process one intercepted SAML response to completion. Stages are strictly
/// sequential apart from the concurrent exchange fan-out; the first failing
/// stage aborts the run and nothing is delivered.
pub async fn run(
    client: &crate::client::Client,
    delivery: &dyn crate::delivery::Delivery,
    encoded_assertion: &str,
) -> Result<(), crate::error::Error> {
    let xml = crate::assertion::decode(encoded_assertion)?;
    let attributes = crate::assertion::extract(&xml)?;
    tracing::debug!(
        message = "Extracted role grants from SAML response",
        grants = attributes.grants.len(),
        session_duration = ?attributes.session_duration,
    );

    let credentials = client
        .assume_roles(
            &attributes.grants,
            attributes.session_duration,
            encoded_assertion,
        )
        .await?;

    // A run that processed exactly one grant names its profile `default`;
    // multi-grant runs always derive names from the assumed-role ARN.
    let document = match credentials.as_slice() {
        [single] => {
            crate::profile::format_profile(single, Some(crate::profile::DEFAULT_PROFILE_NAME))
        }
        many => crate::profile::format_profiles(many),
    };

    delivery.deliver(CREDENTIALS_FILE_NAME, &document).await?;
    tracing::info!(
        message = "Delivered credentials document",
        profiles = credentials.len(),
    );
    Ok(())
}

/// Detached entry point for the interception trigger: the caller must not
/// block on the run, so failures are only logged.
pub fn spawn(
    client: std::sync::Arc<crate::client::Client>,
    delivery: std::sync::Arc<dyn crate::delivery::Delivery>,
    encoded_assertion: String,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = run(&client, delivery.as_ref(), &encoded_assertion).await {
            tracing::error!(message = "SAML exchange run failed", error = ?e);
        }
    })
}
