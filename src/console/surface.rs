use super::state::ConsoleState;
use super::strip::StripKey;
use super::Surface;
use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// [`Surface`] backed by the shared console state the TUI renders from.
pub struct ConsoleSurface {
    state: Arc<Mutex<ConsoleState>>,
}

impl ConsoleSurface {
    pub fn new(state: Arc<Mutex<ConsoleState>>) -> Self {
        Self { state }
    }
}

impl Surface for ConsoleSurface {
    fn select(&self, key: &StripKey) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("console state poisoned"))?;
        state.strips.select(key)
    }

    fn deselect(&self, key: &StripKey) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("console state poisoned"))?;
        state.strips.deselect(key)
    }

    fn toast(&self, message: String) {
        if let Ok(mut state) = self.state.lock() {
            state.push_toast(message, Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::console::strip::{StripGroup, StripValue};

    fn shared_state() -> Arc<Mutex<ConsoleState>> {
        let config: Config = toml::from_str(
            r#"
            [[accounts]]
            handle = "vex.pawb.social"
            did = "did:plc:o5f6fsewachtl3uswlrbhnop"
            "#,
        )
        .unwrap();
        Arc::new(Mutex::new(ConsoleState::new(&config)))
    }

    #[test]
    fn test_select_flips_the_shared_board() {
        let state = shared_state();
        let surface = ConsoleSurface::new(state.clone());
        let key = StripKey::new("vex.pawb.social", StripGroup::FoxFeed, StripValue::True);

        surface.select(&key).unwrap();
        assert!(state.lock().unwrap().strips.is_selected(&key));

        surface.deselect(&key).unwrap();
        assert!(!state.lock().unwrap().strips.is_selected(&key));
    }

    #[test]
    fn test_select_rejects_unknown_cells() {
        let surface = ConsoleSurface::new(shared_state());
        let key = StripKey::new("nobody.example", StripGroup::FoxFeed, StripValue::True);

        assert!(surface.select(&key).is_err());
    }

    #[test]
    fn test_toast_lands_in_state() {
        let state = shared_state();
        let surface = ConsoleSurface::new(state.clone());

        surface.toast("200 OK - OK".to_string());

        let state = state.lock().unwrap();
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].message, "200 OK - OK");
    }
}
