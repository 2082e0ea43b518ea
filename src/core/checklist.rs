//! Verification checklist state.
//!
//! Tracks which sub-steps have been checked off and which categories are
//! collapsed. In memory only; a fresh run starts with nothing verified and
//! every category expanded.

use std::collections::HashSet;

use crate::core::catalog::{VERIFICATION_STEPS, VerificationStep};

/// Key for one sub-step, unique across categories: `<step-id>-<substep-id>`.
pub fn item_key(step_id: &str, sub_step_id: &str) -> String {
    format!("{step_id}-{sub_step_id}")
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Checklist {
    verified: HashSet<String>,
    collapsed: HashSet<&'static str>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the verified state of a sub-step. Returns the new state.
    pub fn toggle(&mut self, step_id: &str, sub_step_id: &str) -> bool {
        let key = item_key(step_id, sub_step_id);
        if self.verified.remove(&key) {
            false
        } else {
            self.verified.insert(key);
            true
        }
    }

    pub fn is_verified(&self, step_id: &str, sub_step_id: &str) -> bool {
        self.verified.contains(&item_key(step_id, sub_step_id))
    }

    pub fn toggle_category(&mut self, step: &'static VerificationStep) {
        if !self.collapsed.remove(step.id) {
            self.collapsed.insert(step.id);
        }
    }

    pub fn is_expanded(&self, step_id: &str) -> bool {
        !self.collapsed.contains(step_id)
    }

    /// `(verified, total)` for one category.
    pub fn progress(&self, step: &VerificationStep) -> (usize, usize) {
        let done = step
            .sub_steps
            .iter()
            .filter(|sub| self.is_verified(step.id, sub.id))
            .count();
        (done, step.sub_steps.len())
    }

    /// Visible rows in display order: every category header, followed by its
    /// sub-steps when expanded. Used for cursor navigation.
    pub fn rows(&self) -> Vec<ChecklistRow> {
        let mut rows = Vec::new();
        for (step_index, step) in VERIFICATION_STEPS.iter().enumerate() {
            rows.push(ChecklistRow::Category(step_index));
            if self.is_expanded(step.id) {
                rows.extend((0..step.sub_steps.len()).map(|i| ChecklistRow::SubStep(step_index, i)));
            }
        }
        rows
    }

    /// Applies the row's action: collapse/expand a header or toggle a sub-step.
    pub fn activate(&mut self, row: ChecklistRow) {
        match row {
            ChecklistRow::Category(step_index) => {
                if let Some(step) = VERIFICATION_STEPS.get(step_index) {
                    self.toggle_category(step);
                }
            }
            ChecklistRow::SubStep(step_index, sub_index) => {
                if let Some(step) = VERIFICATION_STEPS.get(step_index)
                    && let Some(sub) = step.sub_steps.get(sub_index)
                {
                    self.toggle(step.id, sub.id);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistRow {
    Category(usize),
    SubStep(usize, usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_state() {
        let mut checklist = Checklist::new();
        assert!(!checklist.is_verified("k8s-deploy", "k8s-pods"));
        assert!(checklist.toggle("k8s-deploy", "k8s-pods"));
        assert!(checklist.is_verified("k8s-deploy", "k8s-pods"));
        assert!(!checklist.toggle("k8s-deploy", "k8s-pods"));
        assert!(!checklist.is_verified("k8s-deploy", "k8s-pods"));
    }

    #[test]
    fn test_keys_are_scoped_by_category() {
        let mut checklist = Checklist::new();
        checklist.toggle("local-dev", "shared");
        assert!(!checklist.is_verified("k8s-deploy", "shared"));
    }

    #[test]
    fn test_progress_counts_verified() {
        let mut checklist = Checklist::new();
        let step = &VERIFICATION_STEPS[0];
        checklist.toggle(step.id, step.sub_steps[0].id);
        checklist.toggle(step.id, step.sub_steps[2].id);
        assert_eq!(checklist.progress(step), (2, step.sub_steps.len()));
    }

    #[test]
    fn test_rows_hide_collapsed_sub_steps() {
        let mut checklist = Checklist::new();
        let expanded = checklist.rows().len();
        let first_len = VERIFICATION_STEPS[0].sub_steps.len();

        checklist.activate(ChecklistRow::Category(0));
        assert!(!checklist.is_expanded(VERIFICATION_STEPS[0].id));
        assert_eq!(checklist.rows().len(), expanded - first_len);

        checklist.activate(ChecklistRow::Category(0));
        assert_eq!(checklist.rows().len(), expanded);
    }

    #[test]
    fn test_activate_sub_step_toggles() {
        let mut checklist = Checklist::new();
        checklist.activate(ChecklistRow::SubStep(1, 0));
        let step = &VERIFICATION_STEPS[1];
        assert!(checklist.is_verified(step.id, step.sub_steps[0].id));
        // Out of range rows are ignored
        checklist.activate(ChecklistRow::SubStep(9, 9));
    }
}
