use super::strip::{StripBoard, StripGroup, StripKey};
use crate::config::Config;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays on screen.
pub const TOAST_TTL: Duration = Duration::from_millis(10_000);

const LOG_CAP: usize = 200;

/// Which row table has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Accounts,
    Posts,
    Queue,
}

impl Panel {
    pub fn next(self) -> Panel {
        match self {
            Panel::Accounts => Panel::Posts,
            Panel::Posts => Panel::Queue,
            Panel::Queue => Panel::Accounts,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountRow {
    pub handle: String,
    pub did: String,
}

#[derive(Debug, Clone)]
pub struct PostRow {
    pub uri: String,
}

#[derive(Debug, Clone)]
pub struct QueueRow {
    pub id: String,
    pub label: String,
}

/// A transient notification and the instant it disappears.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ConsoleState {
    pub base_url: String,
    pub start_time: Instant,
    pub accounts: Vec<AccountRow>,
    pub posts: Vec<PostRow>,
    pub queue: Vec<QueueRow>,
    pub strips: StripBoard,
    pub toasts: VecDeque<Toast>,
    pub logs: VecDeque<LogEntry>,
    pub focus: Panel,
    pub account_cursor: usize,
    pub post_cursor: usize,
    pub queue_cursor: usize,
    pub in_flight: usize,
}

impl ConsoleState {
    /// Build the console from the configured roster: register every strip
    /// cell and seed the selections from the last known server state.
    pub fn new(config: &Config) -> Self {
        let mut strips = StripBoard::new();

        let mut accounts = Vec::new();
        for acct in &config.accounts {
            for group in [StripGroup::FoxFeed, StripGroup::VixFeed] {
                for &value in group.values() {
                    strips.register(&StripKey::new(acct.handle.clone(), group, value));
                }
            }
            let fox = StripKey::new(acct.handle.clone(), StripGroup::FoxFeed, acct.fox_feed.into());
            let vix = StripKey::new(acct.handle.clone(), StripGroup::VixFeed, acct.vix_feed.into());
            // Cells were registered just above, so these cannot fail.
            let _ = strips.select(&fox);
            let _ = strips.select(&vix);
            accounts.push(AccountRow {
                handle: acct.handle.clone(),
                did: acct.did.clone(),
            });
        }

        let mut posts = Vec::new();
        for post in &config.posts {
            for &value in StripGroup::Pinned.values() {
                strips.register(&StripKey::new(post.uri.clone(), StripGroup::Pinned, value));
            }
            let pinned = StripKey::new(post.uri.clone(), StripGroup::Pinned, post.pinned.into());
            let _ = strips.select(&pinned);
            posts.push(PostRow {
                uri: post.uri.clone(),
            });
        }

        let queue = config
            .queue
            .iter()
            .map(|item| QueueRow {
                id: item.id.clone(),
                label: item.label.clone(),
            })
            .collect();

        Self {
            base_url: config.server.base_url.clone(),
            start_time: Instant::now(),
            accounts,
            posts,
            queue,
            strips,
            toasts: VecDeque::new(),
            logs: VecDeque::with_capacity(LOG_CAP),
            focus: Panel::Accounts,
            account_cursor: 0,
            post_cursor: 0,
            queue_cursor: 0,
            in_flight: 0,
        }
    }

    pub fn push_toast(&mut self, message: String, now: Instant) {
        self.toasts.push_back(Toast {
            message,
            expires_at: now + TOAST_TTL,
        });
    }

    /// Drop every notification whose lifetime has elapsed.
    pub fn purge_toasts(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        if self.logs.len() >= LOG_CAP {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        format!("{}h {:02}m", h, m)
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Panel::Accounts => self.accounts.len(),
            Panel::Posts => self.posts.len(),
            Panel::Queue => self.queue.len(),
        }
    }

    fn focused_cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            Panel::Accounts => &mut self.account_cursor,
            Panel::Posts => &mut self.post_cursor,
            Panel::Queue => &mut self.queue_cursor,
        }
    }

    pub fn cursor_up(&mut self) {
        let cursor = self.focused_cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let max = self.focused_len().saturating_sub(1);
        let cursor = self.focused_cursor_mut();
        *cursor = (*cursor + 1).min(max);
    }

    pub fn selected_account(&self) -> Option<&AccountRow> {
        self.accounts.get(self.account_cursor)
    }

    pub fn selected_post(&self) -> Option<&PostRow> {
        self.posts.get(self.post_cursor)
    }

    pub fn selected_queue_item(&self) -> Option<&QueueRow> {
        self.queue.get(self.queue_cursor)
    }
}
