use clap::Parser;

use odoo_boost::cli::{self, Cli, Console};
use odoo_boost::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let console = Console::new();

    // Held until exit so buffered file logs are flushed
    let _log_guard = match logging::init_logging(cli.default_log_level(), cli.log_file()) {
        Ok(guard) => guard,
        Err(e) => {
            console.print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    tracing::debug!("=== odoo-boost {} ===", env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli::run(cli).await {
        tracing::error!("{:#}", e);
        console.print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
