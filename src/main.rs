use clap::Parser;
use tgbot_api::{BotApi, PollError, Update, UpdateStream};
use tgbot_core::config;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(
    name = "tgbot",
    version,
    about = "Echo bot on top of the tgbot long-polling client"
)]
struct Cli {
    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// First update_id to request. 0 lets the server pick.
    #[arg(long, default_value_t = 0)]
    offset: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut cfg = config::load(&cli.config)?.telegram;
    cfg.apply_env();
    cfg.validate()?;
    if cfg.bot_token.is_empty() {
        anyhow::bail!(
            "bot_token is empty. Set it in {} or the {} env var.",
            cli.config,
            config::TOKEN_ENV
        );
    }

    let api = BotApi::from_config(&cfg);
    let cancel = CancellationToken::new();
    let UpdateStream {
        mut updates,
        mut errors,
        handle,
    } = api.stream_updates(cli.offset, cfg.poll_timeout_secs, cancel.clone());

    info!("tgbot echo running, press Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
            Some(update) = updates.recv() => echo(&api, &update).await,
            Some(failure) = errors.recv() => report(&failure),
            else => break,
        }
    }

    handle.shutdown().await;
    Ok(())
}

async fn echo(api: &BotApi, update: &Update) {
    let Some((chat_id, text)) = update.text_message() else {
        return;
    };
    match api.send_text_message(chat_id, text).await {
        Ok(resp) => info!(
            "echoed update {} to chat {chat_id} as message {}",
            update.update_id,
            resp.message_id()
        ),
        Err(e) => error!("echo to chat {chat_id} failed: {e}"),
    }
}

fn report(failure: &PollError) {
    if failure.error.is_retryable() {
        warn!("poll failed at offset {}: {}", failure.offset, failure.error);
    } else {
        error!(
            "poll failed at offset {} (not retryable): {}",
            failure.offset, failure.error
        );
    }
}
