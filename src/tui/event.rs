use crossterm::event::{KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::fetch::FetchOutcome;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Fetched(FetchOutcome), // a background request finished
}

/// Multiplexes terminal input, the animation tick and fetch completions onto
/// one channel consumed by the UI loop.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let input_tx = tx.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval =
                tokio::time::interval(std::time::Duration::from_millis(tick_rate_ms));
            let mut input_open = true;

            loop {
                tokio::select! {
                    maybe_event = reader.next(), if input_open => {
                        match maybe_event {
                            Some(Ok(crossterm::event::Event::Key(key))) => {
                                // Filter for Press only (Windows compatibility)
                                if key.kind == KeyEventKind::Press && input_tx.send(Event::Key(key)).is_err() {
                                    break;
                                }
                            }
                            Some(Ok(_)) | Some(Err(_)) => {}
                            None => input_open = false,
                        }
                    }
                    _ = tick_interval.tick() => {
                        if input_tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        EventHandler { tx, rx }
    }

    /// Sender for producers outside the input loop (fetch tasks)
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Event {
        self.rx.recv().await.unwrap_or(Event::Tick)
    }
}
