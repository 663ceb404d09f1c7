//=========================================================================
// Editor Console
//=========================================================================
//
// Log records shown in the editor's console panel.
//
// Architecture:
//   log::info!() on any thread
//     └─ ConsoleLogger (log::Log)
//          └─ crossbeam Sender ──unbounded──→ Receiver
//                                               └─ Console::drain() (main thread)
//                                                    └─ VecDeque<ConsoleLine>, oldest dropped first
//
// The logger never blocks and never fails: once the console is dropped the
// send error is ignored.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

//=== ConsoleLine =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl ConsoleLine {
    /// RGB text color for the level.
    pub fn color(&self) -> [f32; 3] {
        match self.level {
            Level::Error => [1.0, 0.3, 0.3],
            Level::Warn => [1.0, 0.8, 0.2],
            Level::Info => [0.9, 0.9, 0.9],
            Level::Debug => [0.5, 0.7, 1.0],
            Level::Trace => [0.6, 0.6, 0.6],
        }
    }
}

impl std::fmt::Display for ConsoleLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.target, self.message)
    }
}

//=== ConsoleLogger =======================================================

/// `log` backend feeding a [`Console`].
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    sender: Sender<ConsoleLine>,
    level: LevelFilter,
}

impl ConsoleLogger {
    /// Installs this logger as the process-wide `log` backend.
    ///
    /// Fails when another logger is already installed.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_logger(Box::leak(Box::new(self)))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let _ = self.sender.send(ConsoleLine {
            level: record.level(),
            target: record.target().to_owned(),
            message: record.args().to_string(),
        });
    }

    fn flush(&self) {}
}

//=== Console =============================================================

/// Bounded list of received log lines.
#[derive(Debug)]
pub struct Console {
    sender: Sender<ConsoleLine>,
    receiver: Receiver<ConsoleLine>,
    lines: VecDeque<ConsoleLine>,
    capacity: usize,
}

impl Console {
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Console capacity must be positive");
        let (sender, receiver) = unbounded();
        Self { sender, receiver, lines: VecDeque::with_capacity(capacity), capacity }
    }

    /// A logger whose records appear in this console.
    pub fn logger(&self, level: LevelFilter) -> ConsoleLogger {
        ConsoleLogger { sender: self.sender.clone(), level }
    }

    /// Moves pending records into the visible list. Returns how many
    /// arrived.
    pub fn drain(&mut self) -> usize {
        let mut received = 0;
        for line in self.receiver.try_iter() {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(line);
            received += 1;
        }
        received
    }

    pub fn lines(&self) -> impl Iterator<Item = &ConsoleLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Every visible line, one per row, for the clipboard.
    pub fn copy_text(&self) -> String {
        self.lines.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn emit(logger: &ConsoleLogger, level: Level, message: &str) {
        logger.log(&Record::builder().level(level).target("test").args(format_args!("{}", message)).build());
    }

    #[test]
    fn records_below_level_are_dropped() {
        let mut console = Console::new(8);
        let logger = console.logger(LevelFilter::Info);

        emit(&logger, Level::Info, "kept");
        emit(&logger, Level::Debug, "dropped");

        assert_eq!(console.drain(), 1);
        assert_eq!(console.copy_text(), "[INFO] test: kept");
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut console = Console::new(2);
        let logger = console.logger(LevelFilter::Trace);
        for message in ["a", "b", "c"] {
            emit(&logger, Level::Warn, message);
        }

        console.drain();
        let messages: Vec<_> = console.lines().map(|line| line.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn lines_arrive_from_other_threads() {
        let mut console = Console::new(64);
        let logger = console.logger(LevelFilter::Trace);

        thread::scope(|scope| {
            for _ in 0..4 {
                let logger = logger.clone();
                scope.spawn(move || {
                    for i in 0..8 {
                        emit(&logger, Level::Error, &i.to_string());
                    }
                });
            }
        });

        assert_eq!(console.drain(), 32);
        assert!(console.lines().all(|line| line.color() == [1.0, 0.3, 0.3]));

        console.clear();
        assert!(console.is_empty());
    }
}
