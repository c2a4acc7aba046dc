use anyhow::{bail, Result};
use std::collections::HashSet;

/// Which button strip a cell belongs to. `as_str` gives the short form
/// used in cell ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripGroup {
    FoxFeed,
    VixFeed,
    Pinned,
}

impl StripGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            StripGroup::FoxFeed => "ff",
            StripGroup::VixFeed => "vf",
            StripGroup::Pinned => "pinned",
        }
    }

    /// The values a strip of this group offers, in display order. Feed
    /// strips are tri-state; the pin strip is a plain toggle.
    pub fn values(self) -> &'static [StripValue] {
        match self {
            StripGroup::FoxFeed | StripGroup::VixFeed => {
                &[StripValue::False, StripValue::Null, StripValue::True]
            }
            StripGroup::Pinned => &[StripValue::False, StripValue::True],
        }
    }
}

/// One cell's value. `Null` is the unreviewed state of a feed flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripValue {
    True,
    False,
    Null,
}

impl StripValue {
    pub fn as_str(self) -> &'static str {
        match self {
            StripValue::True => "true",
            StripValue::False => "false",
            StripValue::Null => "null",
        }
    }
}

impl From<Option<bool>> for StripValue {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => StripValue::True,
            Some(false) => StripValue::False,
            None => StripValue::Null,
        }
    }
}

impl From<bool> for StripValue {
    fn from(flag: bool) -> Self {
        if flag {
            StripValue::True
        } else {
            StripValue::False
        }
    }
}

/// Typed address of one strip cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StripKey {
    pub subject: String,
    pub group: StripGroup,
    pub value: StripValue,
}

impl StripKey {
    pub fn new(subject: impl Into<String>, group: StripGroup, value: StripValue) -> Self {
        Self {
            subject: subject.into(),
            group,
            value,
        }
    }

    /// Render the cell's `{subject}-{group}-{value}` id.
    pub fn cell_id(&self) -> String {
        format!(
            "{}-{}-{}",
            self.subject,
            self.group.as_str(),
            self.value.as_str()
        )
    }

    /// Every key in this cell's group, the cell itself included.
    pub fn group_keys(&self) -> Vec<StripKey> {
        self.group
            .values()
            .iter()
            .map(|&value| StripKey::new(self.subject.clone(), self.group, value))
            .collect()
    }
}

/// Registered strip cells and which of them are currently selected.
///
/// Exclusivity within a group is the callers' contract, not the board's:
/// handlers deselect every sibling before selecting the target.
#[derive(Debug, Clone, Default)]
pub struct StripBoard {
    cells: HashSet<String>,
    selected: HashSet<String>,
}

impl StripBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cell. Selecting a cell that was never registered is an
    /// error.
    pub fn register(&mut self, key: &StripKey) {
        self.cells.insert(key.cell_id());
    }

    pub fn select(&mut self, key: &StripKey) -> Result<()> {
        let id = key.cell_id();
        if !self.cells.contains(&id) {
            bail!("no strip cell {}", id);
        }
        self.selected.insert(id);
        Ok(())
    }

    /// No-op when the cell is not selected.
    pub fn deselect(&mut self, key: &StripKey) -> Result<()> {
        let id = key.cell_id();
        if !self.cells.contains(&id) {
            bail!("no strip cell {}", id);
        }
        self.selected.remove(&id);
        Ok(())
    }

    pub fn is_selected(&self, key: &StripKey) -> bool {
        self.selected.contains(&key.cell_id())
    }

    /// The selected value of one subject's strip, if any.
    pub fn selected_value(&self, subject: &str, group: StripGroup) -> Option<StripValue> {
        group
            .values()
            .iter()
            .copied()
            .find(|&value| self.is_selected(&StripKey::new(subject, group, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_id_joins_subject_group_value() {
        let key = StripKey::new("vex.pawb.social", StripGroup::FoxFeed, StripValue::True);
        assert_eq!(key.cell_id(), "vex.pawb.social-ff-true");

        let key = StripKey::new("at://did:plc:abc/post/1", StripGroup::Pinned, StripValue::False);
        assert_eq!(key.cell_id(), "at://did:plc:abc/post/1-pinned-false");
    }

    #[test]
    fn test_group_keys_cover_the_whole_strip() {
        let key = StripKey::new("vex", StripGroup::VixFeed, StripValue::Null);
        let ids: Vec<String> = key.group_keys().iter().map(|k| k.cell_id()).collect();
        assert_eq!(ids, vec!["vex-vf-false", "vex-vf-null", "vex-vf-true"]);

        let key = StripKey::new("at://x", StripGroup::Pinned, StripValue::True);
        assert_eq!(key.group_keys().len(), 2);
    }

    #[test]
    fn test_value_from_tri_state_flag() {
        assert_eq!(StripValue::from(Some(true)), StripValue::True);
        assert_eq!(StripValue::from(Some(false)), StripValue::False);
        assert_eq!(StripValue::from(None), StripValue::Null);
    }

    #[test]
    fn test_select_requires_registration() {
        let mut board = StripBoard::new();
        let key = StripKey::new("vex", StripGroup::FoxFeed, StripValue::True);

        assert!(board.select(&key).is_err());
        assert!(board.deselect(&key).is_err());

        board.register(&key);
        board.select(&key).unwrap();
        assert!(board.is_selected(&key));
    }

    #[test]
    fn test_deselect_is_noop_when_not_selected() {
        let mut board = StripBoard::new();
        let key = StripKey::new("vex", StripGroup::FoxFeed, StripValue::Null);
        board.register(&key);

        board.deselect(&key).unwrap();
        assert!(!board.is_selected(&key));
    }

    #[test]
    fn test_selected_value_scans_the_group() {
        let mut board = StripBoard::new();
        let target = StripKey::new("vex", StripGroup::FoxFeed, StripValue::False);
        for key in target.group_keys() {
            board.register(&key);
        }

        assert_eq!(board.selected_value("vex", StripGroup::FoxFeed), None);

        board.select(&target).unwrap();
        assert_eq!(
            board.selected_value("vex", StripGroup::FoxFeed),
            Some(StripValue::False)
        );
    }
}
