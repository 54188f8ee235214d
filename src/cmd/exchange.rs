#[derive(clap::Args)]
pub struct ExchangeArgs {
    /// Path to a file holding the transport-encoded SAMLResponse value, or
    /// `-` to read it from stdin
    #[clap(long, value_parser)]
    assertion_file: String,
    /// Directory to write the credentials file into
    #[clap(long, value_parser, env = "SAMLKEYS_OUTPUT_DIR")]
    output_dir: std::path::PathBuf,
    /// STS endpoint override (defaults to https://sts.amazonaws.com/)
    #[clap(long)]
    endpoint: Option<String>,
}

#[tokio::main]
pub async fn run(args: &ExchangeArgs) -> Result<(), anyhow::Error> {
    let encoded_assertion = if args.assertion_file == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        tokio::fs::read_to_string(&args.assertion_file).await?
    };

    let client = match &args.endpoint {
        Some(endpoint) => crate::client::Client::with_endpoint(endpoint)?,
        None => crate::client::Client::new()?,
    };
    let delivery = crate::delivery::DirectoryDelivery::new(&args.output_dir);

    crate::run::run(&client, &delivery, encoded_assertion.trim()).await?;
    Ok(())
}
