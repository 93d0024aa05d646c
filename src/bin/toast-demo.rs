#[path = "toast-demo/app.rs"]
mod app;
#[path = "toast-demo/cli.rs"]
mod cli;
#[path = "toast-demo/console.rs"]
mod console;
#[path = "toast-demo/script.rs"]
mod script;

use std::error::Error as StdError;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = cli::Cli::parse_args();
    match app::run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            if err.is_user_error() {
                std::process::ExitCode::from(2)
            } else {
                std::process::ExitCode::from(1)
            }
        }
    }
}

fn report_error(err: &storefront_toast::error::Error) {
    eprintln!("error: {err}");
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
