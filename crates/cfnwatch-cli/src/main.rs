mod output;
mod shutdown;
mod watch;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cfnwatch",
    about = "Follow a CloudFormation stack's events, nested stacks included",
    version
)]
struct Cli {
    /// Name or ARN of the stack to watch
    #[arg(value_name = "STACK")]
    stack: String,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let Some(stack) = stack_arg(&cli.stack) else {
        eprintln!("error: STACK must not be empty\n\nUsage: cfnwatch <STACK>");
        std::process::exit(1);
    };

    if let Err(e) = watch::run(stack) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

/// Rejects a blank identifier. Anything else is passed on untouched:
/// stack identifiers compare as exact strings.
fn stack_arg(raw: &str) -> Option<&str> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw)
    }
}
