//! Backend worker: a tokio runtime on its own thread that executes queued commands.

use std::thread;

use client_core::{HttpPredictionClient, PredictionTransport};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    server_url: String,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = HttpPredictionClient::new(server_url);
            tracing::info!(url = %client.predict_url(), "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Ready; predictions go to {}",
                client.predict_url()
            )));

            while let Ok(cmd) = cmd_rx.recv() {
                let event = match cmd {
                    BackendCommand::SubmitPrediction { payload } => {
                        UiEvent::PredictionSettled(client.predict(&payload).await)
                    }
                    BackendCommand::CheckHealth => UiEvent::HealthChecked(client.health().await),
                };

                // Blocking send: a dropped settle event would strand the form in Submitting.
                if ui_tx.send(event).is_err() {
                    tracing::info!("ui event receiver closed; stopping backend worker");
                    break;
                }
            }
        });
    })
}
