//! Shared-credentials-file rendering

pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Profile name derived from an assumed-role user ARN, e.g.
/// `arn:aws:sts::111:assumed-role/Admin/session` names the profile `Admin`.
fn profile_name(credentials: &crate::client::RoleCredentials) -> &str {
    let arn = &credentials.assumed_role_user_arn;
    arn.split('/').nth(1).unwrap_or(arn)
}

/// Render one `[profile]` section. No trailing newline; callers join
/// sections themselves.
pub fn format_profile(
    credentials: &crate::client::RoleCredentials,
    profile_name_override: Option<&str>,
) -> String {
    let name = profile_name_override.unwrap_or_else(|| profile_name(credentials));
    format!(
        "[{name}]\naws_access_key_id={}\naws_secret_access_key={}\naws_session_token={}",
        credentials.access_key_id, credentials.secret_access_key, credentials.session_token,
    )
}

/// Render a section per credential set, names always derived from the ARN.
pub fn format_profiles(credentials: &[crate::client::RoleCredentials]) -> String {
    credentials
        .iter()
        .map(|c| format_profile(c, None))
        .collect::<Vec<_>>()
        .join("\n")
}
