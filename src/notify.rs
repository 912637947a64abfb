// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Sink for operator-facing toasts.
pub trait Notifier {
    fn notify(&mut self, n: Notification);

    fn info(&mut self, msg: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::new(Level::Info, msg));
    }

    fn success(&mut self, msg: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::new(Level::Success, msg));
    }

    fn warning(&mut self, msg: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::new(Level::Warning, msg));
    }

    fn error(&mut self, msg: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::new(Level::Error, msg));
    }
}

/// Collects notifications in order.
impl Notifier for Vec<Notification> {
    fn notify(&mut self, n: Notification) {
        self.push(n);
    }
}

/// Prints to the terminal and mirrors into the log.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    pub failed: bool,
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, n: Notification) {
        match n.level {
            Level::Info => {
                info!("{}", n.message);
                println!("ℹ {}", n.message);
            }
            Level::Success => {
                info!("{}", n.message);
                println!("✅ {}", n.message);
            }
            Level::Warning => {
                warn!("{}", n.message);
                self.failed = true;
                eprintln!("⚠ {}", n.message);
            }
            Level::Error => {
                error!("{}", n.message);
                self.failed = true;
                eprintln!("❌ {}", n.message);
            }
        }
    }
}
