use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input event
    Key(KeyEvent),
    /// Paste event (bracketed paste)
    Paste(String),
    /// Periodic tick; drives the connecting -> connected transition
    Tick,
}

/// Event handler for the TUI application
pub struct EventHandler {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }

    /// Spawn the keyboard event listener task
    pub fn spawn_keyboard_listener(&self) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            loop {
                let event = reader.next().fuse();
                tokio::select! {
                    maybe_event = event => {
                        match maybe_event {
                            // Release events show up once keyboard enhancements are on
                            Some(Ok(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                                if sender.send(AppEvent::Key(key)).is_err() {
                                    break; // Channel closed, stop listener
                                }
                            }
                            Some(Ok(CrosstermEvent::Paste(text))) => {
                                if sender.send(AppEvent::Paste(text)).is_err() {
                                    break;
                                }
                            }
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                tracing::warn!("Keyboard event error: {}", e);
                            }
                            None => break,
                        }
                    }
                }
            }
        });
    }

    /// Spawn the tick timer task
    pub fn spawn_tick_timer(&self, tick_rate: Duration) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if sender.send(AppEvent::Tick).is_err() {
                    break; // Channel closed, stop timer
                }
            }
        });
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tick_timer_delivers_ticks() {
        let mut handler = EventHandler::new();
        handler.spawn_tick_timer(Duration::from_millis(5));

        let event = tokio::time::timeout(Duration::from_secs(1), handler.next())
            .await
            .unwrap();
        assert!(matches!(event, Some(AppEvent::Tick)));
    }
}
