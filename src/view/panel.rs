use crate::config::{BREAKPOINTS, DOCKING_BREAKPOINT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelMode {
    /// Side by side with the chart.
    Docked,
    /// Drawn over the chart when opened.
    Overlay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelState {
    pub mode: PanelMode,
    pub open: bool,
}

impl PanelState {
    /// A docked panel stays open.
    pub fn toggle(&mut self) {
        if self.mode == PanelMode::Overlay {
            self.open = !self.open;
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        panel_state::<&str>(&[])
    }
}

/// Names of every breakpoint whose minimum width fits in `width` columns.
pub fn matching_breakpoints(width: u16) -> Vec<String> {
    BREAKPOINTS
        .iter()
        .filter(|(_, min_width)| width >= *min_width)
        .map(|(name, _)| name.to_string())
        .collect()
}

pub fn panel_state<S: AsRef<str>>(matching: &[S]) -> PanelState {
    if matching.iter().any(|name| name.as_ref() == DOCKING_BREAKPOINT) {
        PanelState {
            mode: PanelMode::Docked,
            open: true,
        }
    } else {
        PanelState {
            mode: PanelMode::Overlay,
            open: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lg_docks_the_panel_open() {
        assert_eq!(
            panel_state(&["sm", "md", "lg"]),
            PanelState {
                mode: PanelMode::Docked,
                open: true
            }
        );
        assert_eq!(panel_state(&["lg", "xl"]).mode, PanelMode::Docked);
    }

    #[test]
    fn without_lg_the_panel_overlays_closed() {
        assert_eq!(
            panel_state(&["sm", "md"]),
            PanelState {
                mode: PanelMode::Overlay,
                open: false
            }
        );
        assert_eq!(panel_state::<String>(&[]), PanelState::default());
    }

    #[test]
    fn breakpoints_accumulate_with_width() {
        assert!(matching_breakpoints(40).is_empty());
        assert_eq!(matching_breakpoints(100), vec!["sm", "md"]);
        assert_eq!(matching_breakpoints(140), vec!["sm", "md", "lg"]);
        assert_eq!(matching_breakpoints(500), vec!["sm", "md", "lg", "xl"]);
    }

    #[test]
    fn only_an_overlay_can_be_toggled() {
        let mut overlay = panel_state(&["sm"]);
        overlay.toggle();
        assert!(overlay.open);
        overlay.toggle();
        assert!(!overlay.open);

        let mut docked = panel_state(&["lg"]);
        docked.toggle();
        assert!(docked.open);
    }
}
