use std::sync::{mpsc, Arc};
use std::thread;

use crate::fetch::{ReqwestStoryFetcher, StoryFetcher};
use crate::types::{RequestId, SearchCompletion};

enum EngineCommand {
    Issue { request_id: RequestId, url: String },
}

/// Handle to the search worker. Completions come back in whatever order the
/// requests happen to resolve; dropping the handle abandons whatever is
/// still in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    completion_rx: mpsc::Receiver<SearchCompletion>,
}

impl EngineHandle {
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(ReqwestStoryFetcher::new()))
    }

    pub fn with_fetcher(fetcher: Arc<dyn StoryFetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (completion_tx, completion_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let completion_tx = completion_tx.clone();
                runtime.spawn(async move {
                    run_command(fetcher.as_ref(), command, completion_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            completion_rx,
        }
    }

    /// Queues one search. Requests are independent; a newer one neither
    /// cancels nor coalesces with those already in flight.
    pub fn issue(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Issue {
            request_id,
            url: url.into(),
        });
    }

    pub fn try_recv(&self) -> Option<SearchCompletion> {
        self.completion_rx.try_recv().ok()
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_command(
    fetcher: &dyn StoryFetcher,
    command: EngineCommand,
    completion_tx: mpsc::Sender<SearchCompletion>,
) {
    match command {
        EngineCommand::Issue { request_id, url } => {
            log::debug!("search #{request_id} dispatched: {url}");
            let result = fetcher.search(&url).await;
            let _ = completion_tx.send(SearchCompletion { request_id, result });
        }
    }
}
