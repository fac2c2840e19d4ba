mod progress;
mod styling;
mod summary;
mod tables;

pub use progress::PhaseProgress;
pub use styling::{dim, magenta_bold};
pub use summary::print_summary;

/// Prints the `ci-stats` banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("📦 ci-stats"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("GitHub CI metadata collector")
    );
}
