use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{bright, bright_green, bright_yellow};

/// Progress tracking for the resolve, collect and persist phases
pub struct PhaseProgress {
    pb: ProgressBar,
    visible: bool,
}

impl PhaseProgress {
    pub fn start_phase_1(repository: &str, visible: bool) -> Self {
        if visible {
            eprintln!("{}  {}", bright("⚙️"), bright("Phases").underlined());
        }
        let pb = create_spinner(
            bright_yellow(format!("Phase 1/3: Resolving {repository}")).to_string(),
            visible,
        );
        Self { pb, visible }
    }

    pub fn finish_phase_1_start_phase_2(self, strategy: &str) -> Self {
        self.pb
            .finish_with_message(bright_green("Phase 1/3: Resolved repository ✓").to_string());
        let pb = create_spinner(
            bright_yellow(format!("Phase 2/3: Collecting {strategy}")).to_string(),
            self.visible,
        );
        Self {
            pb,
            visible: self.visible,
        }
    }

    pub fn finish_phase_2_start_phase_3(self, record_count: usize) -> Self {
        self.pb.finish_with_message(
            bright_green(format!("Phase 2/3: Collected {record_count} records ✓")).to_string(),
        );
        let pb = create_spinner(
            bright_yellow("Phase 3/3: Saving results").to_string(),
            self.visible,
        );
        Self {
            pb,
            visible: self.visible,
        }
    }

    pub fn finish_phase_3(self, destination: &str) {
        self.pb.finish_with_message(
            bright_green(format!("Phase 3/3: Saved to {destination} ✓")).to_string(),
        );
        if self.visible {
            eprintln!();
        }
    }
}

fn create_spinner(message: String, visible: bool) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if visible {
        pb.set_draw_target(ProgressDrawTarget::stderr());
    } else {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
