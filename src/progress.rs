//! Progress display module
//!
//! Styled progress bars, status lines and the end-of-run summary. Everything
//! here is advisory output and never feeds back into results.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════╗
║                                                              ║
║   ♪  L Y R I C S   V O C A B                                 ║
║                                                              ║
║      What an artist keeps coming back to, word by word       ║
║                                                     v1.0.0   ║
╚══════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.magenta());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".magenta(), text.magenta().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".magenta(), text);
}

/// Create a styled progress bar
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    let style = ProgressStyle::default_bar()
        .template("{spinner:.magenta} [{elapsed_precise}] [{bar:40.magenta/dim}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Create a styled spinner for indeterminate progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    let style = ProgressStyle::default_spinner()
        .template("{spinner:.magenta} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
    pb.set_style(style);

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Counters for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisStats {
    pub songs_fetched: usize,
    pub lyrics_bytes: u64,
    pub unique_songs: usize,
    pub duplicates_removed: usize,
    pub longer_versions_kept: usize,
    pub words_kept: usize,
    pub distinct_words_kept: usize,
    pub words_filtered_out: usize,
    pub start_time: Instant,
}

impl AnalysisStats {
    pub fn new() -> Self {
        Self {
            songs_fetched: 0,
            lyrics_bytes: 0,
            unique_songs: 0,
            duplicates_removed: 0,
            longer_versions_kept: 0,
            words_kept: 0,
            distinct_words_kept: 0,
            words_filtered_out: 0,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).magenta());
        println!("{}", "                    ANALYSIS COMPLETE".magenta().bold());
        println!("{}", "═".repeat(60).magenta());
        println!();

        println!("  {} {}", "Songs fetched:  ".magenta(), format_number(self.songs_fetched as u64));
        println!("  {} {}", "Lyrics data:    ".magenta(), ByteSize(self.lyrics_bytes));
        println!(
            "  {} {}",
            "Duplicates:     ".yellow(),
            format!(
                "{} ({} replaced by a longer version)",
                format_number(self.duplicates_removed as u64),
                format_number(self.longer_versions_kept as u64)
            )
        );
        println!(
            "  {} {}",
            "Unique songs:   ".magenta().bold(),
            format_number(self.unique_songs as u64).magenta().bold()
        );
        println!();

        println!(
            "  {} {}",
            "Words kept:     ".magenta(),
            format!(
                "{} ({} distinct)",
                format_number(self.words_kept as u64),
                format_number(self.distinct_words_kept as u64)
            )
        );
        println!("  {} {}", "Rare words:     ".yellow(), format_number(self.words_filtered_out as u64));
        println!();
        println!("  {} {}", "Duration:       ".magenta(), format_duration(self.elapsed()));
        println!();
        println!("{}", "═".repeat(60).magenta());
    }
}

impl Default for AnalysisStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }
}
