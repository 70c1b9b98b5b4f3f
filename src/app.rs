use std::time::{Duration, SystemTime};

use crate::branches::{BranchEntry, BranchKind};

/// Menu for choosing between local and remote branches.
pub struct KindMenu {
    cursor: usize,
    choice: Option<BranchKind>,
    done: bool,
}

impl KindMenu {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            choice: None,
            done: false,
        }
    }

    pub fn options(&self) -> &'static [BranchKind] {
        &BranchKind::ALL
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_down(&mut self) {
        self.cursor = (self.cursor + 1).min(BranchKind::ALL.len() - 1);
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn confirm(&mut self) {
        self.choice = Some(BranchKind::ALL[self.cursor]);
        self.done = true;
    }

    pub fn cancel(&mut self) {
        self.choice = None;
        self.done = true;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn choice(&self) -> Option<BranchKind> {
        self.choice
    }
}

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Age rounded down to its largest unit, e.g. `3days` or `5h`.
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    let unit = match secs {
        s if s >= DAY => DAY,
        s if s >= HOUR => HOUR,
        s if s >= MINUTE => MINUTE,
        _ => 1,
    };
    humantime::format_duration(Duration::from_secs(secs - secs % unit)).to_string()
}

pub struct BranchItem {
    pub entry: BranchEntry,
    pub selected: bool,
    pub age: Option<Duration>,
}

impl BranchItem {
    fn new(entry: BranchEntry, now: SystemTime) -> Self {
        let age = entry.detail.as_ref().and_then(|detail| detail.age(now));
        Self {
            entry,
            selected: false,
            age,
        }
    }
}

/// Multi-select list of deletion candidates.
pub struct BranchPicker {
    branches: Vec<BranchItem>,
    kind: BranchKind,
    cursor: usize,
    should_quit: bool,
    confirmed: bool,
    message: Option<String>,
}

impl BranchPicker {
    pub fn new(kind: BranchKind, branches: Vec<BranchEntry>) -> Self {
        let now = SystemTime::now();
        Self {
            branches: branches
                .into_iter()
                .map(|entry| BranchItem::new(entry, now))
                .collect(),
            kind,
            cursor: 0,
            should_quit: false,
            confirmed: false,
            message: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn kind(&self) -> BranchKind {
        self.kind
    }

    pub fn move_down(&mut self) {
        if self.branches.is_empty() {
            return;
        }
        self.clear_message();
        self.cursor = (self.cursor + 1).min(self.branches.len() - 1);
    }

    pub fn move_up(&mut self) {
        if self.branches.is_empty() {
            return;
        }
        self.clear_message();
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn toggle_current(&mut self) {
        if let Some(current) = self.branches.get_mut(self.cursor) {
            current.selected = !current.selected;
        }
    }

    pub fn toggle_all(&mut self) {
        let all_selected = self.branches.iter().all(|branch| branch.selected);
        for branch in &mut self.branches {
            branch.selected = !all_selected;
        }
    }

    pub fn cancel(&mut self) {
        self.should_quit = true;
    }

    pub fn confirm(&mut self) {
        if self.selected_count() == 0 {
            self.set_message("Select at least one branch before confirming.");
            return;
        }
        self.confirmed = true;
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn items(&self) -> &[BranchItem] {
        &self.branches
    }

    pub fn selected_count(&self) -> usize {
        self.branches
            .iter()
            .filter(|branch| branch.selected)
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.branches.len()
    }

    pub fn set_message<S: Into<String>>(&mut self, message: S) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Chosen branch names in list order; empty unless the user confirmed.
    pub fn selected_names(&self) -> Vec<String> {
        if !self.confirmed {
            return Vec::new();
        }
        self.branches
            .iter()
            .filter(|branch| branch.selected)
            .map(|branch| branch.entry.name.clone())
            .collect()
    }
}

/// Yes/no gate in front of the deletion. Defaults to "no".
pub struct Confirmation {
    kind: BranchKind,
    branches: Vec<String>,
    highlighted_yes: bool,
    answer: Option<bool>,
}

impl Confirmation {
    pub fn new(kind: BranchKind, branches: &[String]) -> Self {
        Self {
            kind,
            branches: branches.to_vec(),
            highlighted_yes: false,
            answer: None,
        }
    }

    pub fn question(&self) -> String {
        format!(
            "Delete these {} {} branch(es)?",
            self.branches.len(),
            self.kind
        )
    }

    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn highlighted_yes(&self) -> bool {
        self.highlighted_yes
    }

    pub fn toggle(&mut self) {
        self.highlighted_yes = !self.highlighted_yes;
    }

    pub fn answer_yes(&mut self) {
        self.answer = Some(true);
    }

    pub fn answer_no(&mut self) {
        self.answer = Some(false);
    }

    pub fn submit(&mut self) {
        self.answer = Some(self.highlighted_yes);
    }

    pub fn is_done(&self) -> bool {
        self.answer.is_some()
    }

    pub fn accepted(&self) -> bool {
        self.answer.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker(names: &[&str]) -> BranchPicker {
        BranchPicker::new(
            BranchKind::Local,
            names.iter().map(|name| BranchEntry::new(*name)).collect(),
        )
    }

    #[test]
    fn age_is_rounded_to_largest_unit() {
        assert_eq!(format_age(Duration::from_secs(3 * DAY + 5 * HOUR)), "3days");
        assert_eq!(format_age(Duration::from_secs(2 * HOUR + 59)), "2h");
        assert_eq!(format_age(Duration::from_secs(42)), "42s");
    }

    #[test]
    fn kind_menu_defaults_to_local() {
        let mut menu = KindMenu::new();
        menu.confirm();
        assert_eq!(menu.choice(), Some(BranchKind::Local));
    }

    #[test]
    fn kind_menu_moves_within_bounds() {
        let mut menu = KindMenu::new();
        menu.move_down();
        menu.move_down();
        assert_eq!(menu.cursor(), 1);
        menu.confirm();
        assert_eq!(menu.choice(), Some(BranchKind::Remote));
    }

    #[test]
    fn kind_menu_cancel_yields_no_choice() {
        let mut menu = KindMenu::new();
        menu.move_down();
        menu.cancel();
        assert!(menu.is_done());
        assert_eq!(menu.choice(), None);
    }

    #[test]
    fn picker_requires_a_selection_before_confirming() {
        let mut picker = picker(&["a", "b"]);
        picker.confirm();
        assert!(!picker.should_quit());
        assert!(picker.message().is_some());
    }

    #[test]
    fn picker_returns_selected_names_in_list_order() {
        let mut picker = picker(&["a", "b", "c"]);
        picker.move_down();
        picker.move_down();
        picker.toggle_current();
        picker.move_up();
        picker.move_up();
        picker.toggle_current();
        picker.confirm();
        assert!(picker.should_quit());
        assert_eq!(picker.selected_names(), vec!["a", "c"]);
    }

    #[test]
    fn picker_toggle_all_flips_everything() {
        let mut picker = picker(&["a", "b"]);
        picker.toggle_all();
        assert_eq!(picker.selected_count(), 2);
        picker.toggle_all();
        assert_eq!(picker.selected_count(), 0);
    }

    #[test]
    fn cancelled_picker_selects_nothing() {
        let mut picker = picker(&["a"]);
        picker.toggle_current();
        picker.cancel();
        assert!(picker.selected_names().is_empty());
    }

    #[test]
    fn confirmation_defaults_to_no() {
        let mut confirmation = Confirmation::new(BranchKind::Remote, &["a".to_string()]);
        confirmation.submit();
        assert!(!confirmation.accepted());
        assert_eq!(confirmation.question(), "Delete these 1 remote branch(es)?");
    }

    #[test]
    fn confirmation_accepts_after_toggle() {
        let mut confirmation = Confirmation::new(BranchKind::Local, &["a".to_string()]);
        confirmation.toggle();
        confirmation.submit();
        assert!(confirmation.accepted());
    }
}
