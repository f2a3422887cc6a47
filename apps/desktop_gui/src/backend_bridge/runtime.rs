//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use breed_core::{load_or_empty, BreedApiClient, BreedSource};
use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info};

use crate::backend_bridge::commands::{BackendCommand, FetchReason};
use crate::config::StartupConfig;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, startup: StartupConfig) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match BreedApiClient::new(startup.api_url.as_str(), startup.request_timeout())
        {
            Ok(client) => match &startup.api_key {
                Some(api_key) => client.with_api_key(api_key.clone()),
                None => client,
            },
            Err(err) => {
                error!("failed to build breeds api client: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_fetch_error(&err)));
                // Keep the interface usable with an empty catalog.
                let _ = ui_tx.try_send(UiEvent::BreedsLoaded {
                    records: Vec::new(),
                    fetched_at: Local::now(),
                });
                return;
            }
        };
        info!(endpoint = %client.endpoint(), "backend worker ready");

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchBreeds { reason } => {
                        let _ = ui_tx.try_send(UiEvent::Info(format!(
                            "Loading breeds from {}...",
                            client.endpoint()
                        )));
                        fetch_breeds(&client, reason, &ui_tx).await;
                    }
                }
            }
            info!("ui command channel closed; backend worker exiting");
        });
    });
}

async fn fetch_breeds(client: &BreedApiClient, reason: FetchReason, ui_tx: &Sender<UiEvent>) {
    match reason {
        FetchReason::Startup => {
            let outcome = load_or_empty(client).await;
            if let Some(err) = &outcome.error {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_fetch_error(err)));
            }
            let _ = ui_tx.try_send(UiEvent::BreedsLoaded {
                records: outcome.records,
                fetched_at: Local::now(),
            });
        }
        // A failed reload leaves the current session untouched.
        FetchReason::Reload => match client.fetch_breeds().await {
            Ok(records) => {
                info!(count = records.len(), reason = reason.label(), "reloaded breed records");
                let _ = ui_tx.try_send(UiEvent::BreedsLoaded {
                    records,
                    fetched_at: Local::now(),
                });
            }
            Err(err) => {
                error!(reason = reason.label(), "failed to reload breed records: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_fetch_error(&err)));
            }
        },
    }
}
