use anyhow::Result;

use crate::app::{BranchPicker, Confirmation, KindMenu};
use crate::branches::{BranchEntry, BranchKind};
use crate::tui;

/// The questions the workflow asks the user.
pub trait Prompter {
    /// `None` when the user backs out.
    fn select_kind(&mut self) -> Result<Option<BranchKind>>;

    /// Chosen names; empty when nothing was picked or the prompt was
    /// cancelled.
    fn select_branches(&mut self, kind: BranchKind, candidates: &[BranchEntry])
    -> Result<Vec<String>>;

    fn confirm(&mut self, kind: BranchKind, selected: &[String]) -> Result<bool>;
}

/// Full-screen prompts on the controlling terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select_kind(&mut self) -> Result<Option<BranchKind>> {
        let mut menu = KindMenu::new();
        tui::run(&mut menu)?;
        Ok(menu.choice())
    }

    fn select_branches(
        &mut self,
        kind: BranchKind,
        candidates: &[BranchEntry],
    ) -> Result<Vec<String>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let mut picker = BranchPicker::new(kind, candidates.to_vec());
        picker.set_message("Use space to toggle branches. Press enter to confirm.");
        tui::run(&mut picker)?;
        Ok(picker.selected_names())
    }

    fn confirm(&mut self, kind: BranchKind, selected: &[String]) -> Result<bool> {
        let mut confirmation = Confirmation::new(kind, selected);
        tui::run(&mut confirmation)?;
        Ok(confirmation.accepted())
    }
}
