use std::sync::Arc;

use hwb_core::{
    api::PracticumClient,
    config::Config,
    notifier::Notifier,
    poller::{PollSettings, Poller},
    tokens::check_tokens,
};
use hwb_telegram::TelegramMessenger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), hwb_core::Error> {
    let cfg = Config::load()?;
    hwb_core::logging::init("hwb", cfg.log_file.as_deref())?;

    // No network activity happens before the credentials are known to be complete.
    // `check_tokens` has already logged every missing variable.
    let Ok(tokens) = check_tokens(&cfg.credentials) else {
        std::process::exit(1);
    };

    let api = Arc::new(PracticumClient::new(
        &cfg.endpoint,
        &tokens.practicum_token,
        cfg.request_timeout,
    )?);
    let messenger = Arc::new(TelegramMessenger::from_token(&tokens.telegram_token));
    let notifier = Notifier::new(messenger, tokens.chat_id.clone());

    tracing::info!(endpoint = %api.endpoint(), "homework bot started");

    Poller::new(api, notifier, PollSettings::starting_now(&cfg))
        .run()
        .await;

    Ok(())
}
