mod cli;
mod config;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use gravatar::{
    adapters::outbound::{FsFileReader, GravatarApiClient, SystemClock},
    domain::{ports::inbound::AvatarUploadService, services::GravatarUploader},
    AccountId, BearerToken, StatusEvent, UploadRequest,
};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    cli::{Cli, Command, UploadArgs},
    config::Settings,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gravatar=info,gravatar_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = config::read_config()?;

    match cli.command {
        Command::Upload(args) => upload(args, settings).await,
    }
}

async fn upload(args: UploadArgs, settings: Settings) -> Result<()> {
    let token = args
        .token
        .or(settings.api.token.clone())
        .context("No bearer token given, pass --token or set GRAVATAR_TOKEN")?;
    let token = BearerToken::try_from(token).context("Invalid bearer token")?;
    let account = AccountId::try_from(args.account).context("Invalid account")?;

    let host = GravatarApiClient::with_base_url(&settings.api.url, settings.api.timeout())
        .context("Failed to create Gravatar client")?;

    let (tx, mut rx) = mpsc::unbounded_channel::<StatusEvent>();
    let uploader = GravatarUploader::new(
        Arc::new(FsFileReader::new(settings.upload.max_file_size)),
        Arc::new(host),
        Arc::new(SystemClock),
        Arc::new(tx),
    );

    info!(file = %args.file.display(), %account, "Uploading avatar");
    let request = UploadRequest::new(args.file, token, account);

    let report = async {
        while let Some(event) = rx.recv().await {
            println!("{}", serde_json::to_string(&event)?);
            if event.is_terminal() {
                return Ok(Some(event));
            }
        }
        Ok::<_, anyhow::Error>(None)
    };

    let ((), outcome) = tokio::join!(uploader.upload(request), report);

    match outcome? {
        Some(StatusEvent::RequestSucceeded { receipt }) => {
            info!(status = receipt.status, "Avatar uploaded");
            Ok(())
        }
        Some(StatusEvent::RequestFailed { reason }) => {
            warn!(error = %reason, "Avatar upload failed");
            bail!(reason)
        }
        _ => bail!("Upload finished without reporting an outcome"),
    }
}
