//! # CLI Module
//!
//! This module is the command-line layer of sprofcli. Each command acquires
//! an access token, calls into [`crate::spotify`] or [`crate::report`], and
//! renders the result to the terminal.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the browser authorization flow and prints the token
//! - [`profile`] - First name, e-mail, country and avatar of the user
//! - [`recent`] - Recently played tracks
//! - [`genres`] - Top genres distilled from the user's top artists
//! - [`features`] - Averaged audio features of one track source
//! - [`report`] - All of the above with a single token
//!
//! ## Token Acquisition
//!
//! Every data command resolves its token through [`acquire_token`] from one of
//! three [`TokenSource`]s: a token given on the command line, an
//! authorization code given on the command line, or the interactive browser
//! flow. The token lives in memory for the duration of the command only.
//!
//! ## Error Handling
//!
//! - Missing token for a single-section command terminates with an error
//! - `report` without a token skips every request and prints empty sections
//! - A failing section of `report` is shown as a warning; other sections
//!   still render
//!
//! ## Usage Patterns
//!
//! ```bash
//! sprofcli auth                                   # Print a fresh access token
//! sprofcli --token BQC... report                  # Full report with a known token
//! sprofcli features --source top-long --properties tempo,energy
//! sprofcli genres --term short --limit 10
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

mod auth;
mod features;
mod genres;
mod profile;
mod recent;
mod render;
mod report;

pub use auth::{TokenSource, acquire_token, auth};
pub use features::features;
pub use genres::genres;
pub use profile::profile;
pub use recent::recent;
pub use report::report;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
