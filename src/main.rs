#[derive(clap::Parser)]
#[clap(version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Listen for intercepted SAML responses and exchange them as they arrive
    Serve(samlkeys::cmd::serve::ServeArgs),
    /// Exchange a single SAML response read from a file or stdin
    Exchange(samlkeys::cmd::exchange::ExchangeArgs),
}

fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Serve(args) => samlkeys::cmd::serve::run(args),
        Command::Exchange(args) => samlkeys::cmd::exchange::run(args),
    }
}
