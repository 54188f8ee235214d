#[derive(clap::Args)]
pub struct ServeArgs {
    /// Directory to write the credentials file into
    #[clap(long, value_parser, env = "SAMLKEYS_OUTPUT_DIR")]
    output_dir: std::path::PathBuf,
    /// STS endpoint override (defaults to https://sts.amazonaws.com/)
    #[clap(long)]
    endpoint: Option<String>,
}

#[tokio::main]
pub async fn run(args: &ServeArgs) -> Result<(), anyhow::Error> {
    serve(args).await?;
    Ok(())
}

pub fn make_router(
    arc_client: std::sync::Arc<crate::client::Client>,
    arc_delivery: std::sync::Arc<dyn crate::delivery::Delivery>,
) -> axum::Router {
    axum::Router::new()
        .route("/healthz", axum::routing::get(healthz))
        .route("/saml", axum::routing::post(post_saml))
        .layer(axum::extract::Extension(arc_client))
        .layer(axum::extract::Extension(arc_delivery))
}

pub async fn serve(args: &ServeArgs) -> Result<(), anyhow::Error> {
    let client = match &args.endpoint {
        Some(endpoint) => crate::client::Client::with_endpoint(endpoint)?,
        None => crate::client::Client::new()?,
    };
    let delivery = crate::delivery::DirectoryDelivery::new(&args.output_dir);

    let arc_client = std::sync::Arc::new(client);
    let arc_delivery: std::sync::Arc<dyn crate::delivery::Delivery> =
        std::sync::Arc::new(delivery);

    let mut fds = listenfd::ListenFd::from_env();

    let servers = if fds.len() == 0 {
        tracing::warn!("Using 127.0.0.1:3000 to listen because sd_listen_fds parameters are missing (use systemd.socket to control listen configuration)");
        vec![axum::Server::bind(&std::net::SocketAddr::from((
            [127, 0, 0, 1],
            3000,
        )))]
    } else {
        let mut ls = Vec::new();
        for idx in 0..fds.len() {
            let l = fds.take_tcp_listener(idx)?.unwrap();
            tracing::info!(message = "Starting a server", idx = ?idx, listener = ?l);
            ls.push(axum::Server::from_tcp(l)?);
        }
        ls
    };

    let services: Vec<_> = servers
        .into_iter()
        .map(|v| {
            tokio::spawn(
                v.serve(make_router(arc_client.clone(), arc_delivery.clone()).into_make_service()),
            )
        })
        .collect();

    for service in services {
        service.await??;
    }

    Ok(())
}

async fn healthz() -> axum::response::Result<(axum::http::StatusCode, &'static str)> {
    Ok((axum::http::StatusCode::OK, "ok"))
}

#[derive(serde::Deserialize)]
struct SamlForm {
    #[serde(rename = "SAMLResponse")]
    saml_response: String,
}

/// Receives an intercepted IdP form submission. The exchange runs as a
/// detached task; the interception side never waits on it.
async fn post_saml(
    axum::extract::Extension(client): axum::extract::Extension<
        std::sync::Arc<crate::client::Client>,
    >,
    axum::extract::Extension(delivery): axum::extract::Extension<
        std::sync::Arc<dyn crate::delivery::Delivery>,
    >,
    axum::extract::Form(form): axum::extract::Form<SamlForm>,
) -> (axum::http::StatusCode, &'static str) {
    tracing::info!(message = "Intercepted SAML response");
    crate::run::spawn(client, delivery, form.saml_response);
    (axum::http::StatusCode::OK, "ok")
}
