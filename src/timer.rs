use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
}

/// Emit one `Tick` per second until `stop` is set or the receiver goes away.
pub fn spawn_ticker(stop: Arc<AtomicBool>) -> mpsc::Receiver<TimerEvent> {
    spawn_ticker_every(Duration::from_secs(1), stop)
}

pub fn spawn_ticker_every(
    period: Duration,
    stop: Arc<AtomicBool>,
) -> mpsc::Receiver<TimerEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        thread::sleep(period);
        if stop.load(Ordering::SeqCst) {
            break;
        }
        if tx.send(TimerEvent::Tick).is_err() {
            break;
        }
    });

    rx
}

/// `MM:SS`, minutes are not wrapped into hours.
pub fn format_clock(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

