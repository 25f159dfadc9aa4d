use duoqueue::config::Config;
use duoqueue::runner;
use duoqueue::service::QueueService;

use tokio::io::{self, BufReader};
use tokio::signal;
use tracing::{info, subscriber};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level()?)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(subscriber)?;

    let mut service = QueueService::new();
    let processed = match &config.script {
        Some(path) => {
            info!(script = %path.display(), "replaying script");
            let reader = runner::open_script(path).await?;
            runner::run(reader, io::stdout(), &mut service, signal::ctrl_c()).await?
        }
        None => {
            let reader = BufReader::new(io::stdin());
            runner::run(reader, io::stdout(), &mut service, signal::ctrl_c()).await?
        }
    };

    info!(processed, remaining = service.queue().len(), "done");
    Ok(())
}
