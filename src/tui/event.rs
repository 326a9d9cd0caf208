use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::core::{keys::Key, router::InputEvent};
use crate::domain::error::{RowdeskError, RowdeskResult};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Producer half handed to the terminal reader and the blink ticker
pub type EventSender = UnboundedSender<InputEvent>;

/// Consumer half. The queue holds no sender of its own, so it closes once
/// every producer is gone.
pub struct EventQueue {
    rx: UnboundedReceiver<InputEvent>,
}

pub fn event_channel() -> (EventSender, EventQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, EventQueue { rx })
}

impl EventQueue {
    pub async fn next(&mut self) -> Option<InputEvent> {
        self.rx.recv().await
    }

    /// Next event, or an error once the terminal reader has stopped.
    ///
    /// Blink ticks alone never keep the loop alive: without the reader no
    /// quit key can arrive.
    pub async fn next_from(&mut self, reader: &mut JoinHandle<RowdeskResult<()>>) -> RowdeskResult<InputEvent> {
        tokio::select! {
            biased;
            joined = reader => Err(match joined {
                Ok(Err(e)) => e,
                Ok(Ok(())) => RowdeskError::Tui("terminal reader stopped".to_string()),
                Err(e) => RowdeskError::Tui(format!("terminal reader failed: {}", e)),
            }),
            event = self.rx.recv() => {
                event.ok_or_else(|| RowdeskError::Tui("event queue closed".to_string()))
            }
        }
    }
}

/// Forward terminal key and resize events until the queue is dropped
pub fn spawn_terminal_reader(tx: EventSender) -> JoinHandle<RowdeskResult<()>> {
    tokio::task::spawn_blocking(move || {
        forward_events(&tx, || {
            if event::poll(POLL_INTERVAL)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })
    })
}

/// Pump `source` into the queue. A source error ends the pump with
/// [`RowdeskError::Tui`]; a closed queue ends it cleanly.
pub fn forward_events<F>(tx: &EventSender, mut source: F) -> RowdeskResult<()>
where
    F: FnMut() -> io::Result<Option<Event>>,
{
    while !tx.is_closed() {
        match source() {
            Ok(Some(event)) => {
                if let Some(input) = translate_event(event) {
                    if tx.send(input).is_err() {
                        break;
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("terminal input failed: {}", e);
                return Err(RowdeskError::Tui(format!("terminal input failed: {}", e)));
            }
        }
    }
    Ok(())
}

/// Emit a blink tick every `period`
pub fn spawn_blink_ticker(tx: EventSender, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick fires immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(InputEvent::Tick).is_err() {
                break;
            }
        }
    })
}

pub fn translate_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key).map(InputEvent::Key),
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        _ => None,
    }
}

pub fn translate_key(key: KeyEvent) -> Option<Key> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let translated = match key.code {
        KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Tab if shift => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Enter => Key::Enter,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => return None,
    };

    Some(translated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_keys() {
        let ctrl_e = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(ctrl_e), Some(Key::Ctrl('e')));

        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(translate_key(shifted), Some(Key::Char('A')));

        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(translate_key(back_tab), Some(Key::BackTab));

        let f1 = KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(translate_key(f1), None);
    }

    #[test]
    fn test_release_events_are_dropped() {
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate_key(release), None);
    }

    #[test]
    fn test_translate_resize() {
        assert_eq!(
            translate_event(Event::Resize(80, 24)),
            Some(InputEvent::Resize { width: 80, height: 24 })
        );
        assert_eq!(translate_event(Event::FocusGained), None);
    }

    #[tokio::test]
    async fn test_ticks_share_the_queue() {
        let (tx, mut queue) = event_channel();
        tx.send(InputEvent::Key(Key::Char('x'))).unwrap();
        let ticker = spawn_blink_ticker(tx, Duration::from_millis(5));

        assert_eq!(queue.next().await, Some(InputEvent::Key(Key::Char('x'))));
        assert_eq!(queue.next().await, Some(InputEvent::Tick));
        ticker.abort();
    }

    #[tokio::test]
    async fn test_queue_closes_without_producers() {
        let (tx, mut queue) = event_channel();
        tx.send(InputEvent::Tick).unwrap();
        drop(tx);

        assert_eq!(queue.next().await, Some(InputEvent::Tick));
        assert_eq!(queue.next().await, None);
    }

    #[tokio::test]
    async fn test_source_error_stops_forwarding() {
        let (tx, mut queue) = event_channel();
        let mut calls = 0;
        let result = forward_events(&tx, || {
            calls += 1;
            if calls == 1 {
                Ok(Some(Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))))
            } else {
                Err(io::Error::new(io::ErrorKind::Other, "tty gone"))
            }
        });
        drop(tx);

        assert!(matches!(result, Err(RowdeskError::Tui(_))));
        assert_eq!(queue.next().await, Some(InputEvent::Key(Key::Char('q'))));
        assert_eq!(queue.next().await, None);
    }

    #[test]
    fn test_forwarding_stops_when_queue_dropped() {
        let (tx, queue) = event_channel();
        drop(queue);
        assert!(forward_events(&tx, || Ok(None)).is_ok());
    }

    #[tokio::test]
    async fn test_reader_exit_ends_loop_despite_ticks() {
        let (tx, mut queue) = event_channel();
        let ticker = spawn_blink_ticker(tx, Duration::from_millis(5));
        let mut reader = tokio::spawn(async { Err::<(), _>(RowdeskError::Tui("tty gone".to_string())) });

        let outcome = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if let Err(e) = queue.next_from(&mut reader).await {
                    break e;
                }
            }
        })
        .await
        .expect("loop must end once the reader is gone");

        assert!(matches!(outcome, RowdeskError::Tui(_)));
        ticker.abort();
    }
}
