use crossterm::event::{Event as TerminalEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{Interval, interval};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Merges terminal input with a periodic tick. Key releases are filtered so
/// each press is delivered once.
pub struct EventHandler {
    stream: EventStream,
    ticker: Interval,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            stream: EventStream::new(),
            ticker: interval(tick_rate),
        }
    }

    pub async fn next(&mut self) -> Event {
        loop {
            tokio::select! {
                _ = self.ticker.tick() => return Event::Tick,
                terminal_event = self.stream.next() => match terminal_event {
                    Some(Ok(TerminalEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                        return Event::Key(key);
                    }
                    Some(Ok(TerminalEvent::Resize(_, _))) => return Event::Resize,
                    Some(Ok(_)) | Some(Err(_)) => continue,
                    None => return Event::Tick,
                },
            }
        }
    }
}
