use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use capture_logging::{capture_error, capture_info, redact_url};

use crate::{
    CaptureClient, CaptureEngine, CaptureInvocation, CaptureResult, CaptureSettings, EngineEvent,
    Generation, HttpCaptureEngine, TransportError,
};

enum EngineCommand {
    Capture {
        generation: Generation,
        invocation: CaptureInvocation,
    },
}

/// Runs captures on a background tokio runtime so the UI thread never blocks.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: CaptureSettings) -> Self {
        Self::with_engine(Arc::new(HttpCaptureEngine::new(settings)))
    }

    pub fn with_engine(engine: Arc<dyn CaptureEngine>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = Arc::new(CaptureClient::new(engine));

        thread::spawn(move || run_commands(client, cmd_rx, event_tx));

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn capture(&self, generation: Generation, invocation: CaptureInvocation) {
        let _ = self.cmd_tx.send(EngineCommand::Capture {
            generation,
            invocation,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

fn run_commands(
    client: Arc<CaptureClient>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            capture_error!("Failed to start capture runtime: {}", err);
            let message = TransportError::RuntimeUnavailable(err.to_string()).to_string();
            while let Ok(EngineCommand::Capture { generation, .. }) = cmd_rx.recv() {
                let _ = event_tx.send(EngineEvent::CaptureCompleted {
                    generation,
                    result: CaptureResult::Failure {
                        message: message.clone(),
                    },
                });
            }
            return;
        }
    };

    while let Ok(command) = cmd_rx.recv() {
        let client = client.clone();
        let event_tx = event_tx.clone();
        runtime.spawn(async move {
            handle_command(client.as_ref(), command, event_tx).await;
        });
    }
}

async fn handle_command(
    client: &CaptureClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Capture {
            generation,
            invocation,
        } => {
            capture_info!(
                "Capture {} dispatched for {}",
                generation,
                redact_url(&invocation.url)
            );
            let result = client.submit(&invocation).await;
            let _ = event_tx.send(EngineEvent::CaptureCompleted { generation, result });
        }
    }
}
