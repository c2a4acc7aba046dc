pub mod render;

use crate::actions::{Actions, Submission};
use crate::console::state::{ConsoleState, Panel};
use crate::console::strip::{StripGroup, StripValue};
use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Run the console. Returns once the operator quits.
pub async fn run_tui(state: Arc<Mutex<ConsoleState>>, actions: Actions) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state, actions).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: Arc<Mutex<ConsoleState>>,
    actions: Actions,
) -> Result<()> {
    let mut pending: Vec<Submission> = Vec::new();

    loop {
        reap_finished(&mut pending, &state).await;

        let snapshot = {
            let mut state = state
                .lock()
                .map_err(|_| anyhow!("console state poisoned"))?;
            state.purge_toasts(Instant::now());
            state.in_flight = pending.len();
            state.clone()
        };
        terminal.draw(|f| render::draw(f, &snapshot, Instant::now()))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Tab => {
                            if let Ok(mut state) = state.lock() {
                                state.focus = state.focus.next();
                            }
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            if let Ok(mut state) = state.lock() {
                                state.cursor_up();
                            }
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            if let Ok(mut state) = state.lock() {
                                state.cursor_down();
                            }
                        }
                        KeyCode::Char('f') | KeyCode::Char('v') => {
                            let group = if key.code == KeyCode::Char('f') {
                                StripGroup::FoxFeed
                            } else {
                                StripGroup::VixFeed
                            };
                            // Read the target, then release the lock before
                            // the handler takes it again
                            let target = state.lock().ok().and_then(|state| {
                                if state.focus != Panel::Accounts {
                                    return None;
                                }
                                state.selected_account().map(|acct| {
                                    (
                                        acct.handle.clone(),
                                        acct.did.clone(),
                                        state.strips.selected_value(&acct.handle, group),
                                    )
                                })
                            });
                            if let Some((handle, did, current)) = target {
                                let include = next_inclusion(current);
                                let sent = if group == StripGroup::FoxFeed {
                                    actions.set_include_in_fox_feed(&handle, &did, include)
                                } else {
                                    actions.set_include_in_vix_feed(&handle, &did, include)
                                };
                                match sent {
                                    Ok(submission) => pending.push(submission),
                                    Err(e) => record_failure(&state, "mark", &e),
                                }
                            }
                        }
                        KeyCode::Char('p') => {
                            let target = state.lock().ok().and_then(|state| {
                                if state.focus != Panel::Posts {
                                    return None;
                                }
                                state.selected_post().map(|post| {
                                    let pinned = state
                                        .strips
                                        .selected_value(&post.uri, StripGroup::Pinned);
                                    (post.uri.clone(), pinned != Some(StripValue::True))
                                })
                            });
                            if let Some((uri, pin)) = target {
                                match actions.set_post_pinned(&uri, pin) {
                                    Ok(submission) => pending.push(submission),
                                    Err(e) => record_failure(&state, "pin post", &e),
                                }
                            }
                        }
                        KeyCode::Char('s') => {
                            let target = state.lock().ok().and_then(|state| {
                                if state.focus != Panel::Posts {
                                    return None;
                                }
                                state.selected_post().map(|post| post.uri.clone())
                            });
                            if let Some(uri) = target {
                                pending.push(actions.scan_likes(&uri));
                            }
                        }
                        KeyCode::Char('c') | KeyCode::Char('i') | KeyCode::Char('r') => {
                            let target = state.lock().ok().and_then(|state| {
                                if state.focus != Panel::Queue {
                                    return None;
                                }
                                state.selected_queue_item().map(|item| item.id.clone())
                            });
                            if let Some(id) = target {
                                let submission = match key.code {
                                    KeyCode::Char('c') => actions.cancel_post(&id),
                                    KeyCode::Char('i') => actions.post_post_immediately(&id),
                                    _ => actions.post_reschedule(&id),
                                };
                                pending.push(submission);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}

/// Await every submission that already ran to completion and log the
/// ones that failed. Unfinished ones stay pending.
async fn reap_finished(pending: &mut Vec<Submission>, state: &Arc<Mutex<ConsoleState>>) {
    let mut i = 0;
    while i < pending.len() {
        if pending[i].is_finished() {
            let submission = pending.swap_remove(i);
            match submission.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "admin call failed");
                    if let Ok(mut state) = state.lock() {
                        state.push_log("ERROR", format!("request failed: {:#}", e));
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "admin call panicked");
                    if let Ok(mut state) = state.lock() {
                        state.push_log("ERROR", format!("request task died: {}", e));
                    }
                }
            }
        } else {
            i += 1;
        }
    }
}

fn record_failure(state: &Arc<Mutex<ConsoleState>>, action: &str, err: &anyhow::Error) {
    tracing::error!(action, error = %err, "admin call not sent");
    if let Ok(mut state) = state.lock() {
        state.push_log("ERROR", format!("{}: {:#}", action, err));
    }
}

/// Next verdict in the review cycle: unreviewed, in, out, unreviewed.
fn next_inclusion(current: Option<StripValue>) -> Option<bool> {
    match current {
        None | Some(StripValue::Null) => Some(true),
        Some(StripValue::True) => Some(false),
        Some(StripValue::False) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_cycle() {
        assert_eq!(next_inclusion(None), Some(true));
        assert_eq!(next_inclusion(Some(StripValue::Null)), Some(true));
        assert_eq!(next_inclusion(Some(StripValue::True)), Some(false));
        assert_eq!(next_inclusion(Some(StripValue::False)), None);
    }
}
