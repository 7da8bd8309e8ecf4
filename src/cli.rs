//! Command-line argument parsing for the demo page

use clap::Parser;
use std::path::PathBuf;

/// A page of single-line text fields
#[derive(Parser, Debug)]
#[command(name = "fieldline", version, about = "Single-line scrolling text fields")]
pub struct CliArgs {
    /// TTF/OTF font used to measure and draw text
    #[arg(long, value_name = "PATH")]
    pub font: PathBuf,

    /// Font size in pixels
    #[arg(long, value_name = "PX", default_value_t = 24.0)]
    pub font_size: f32,

    /// Visible width of the free-text field, in characters
    #[arg(long, value_name = "N", default_value_t = 12)]
    pub chars_wide: usize,

    /// Maximum length of the digits field
    #[arg(long, value_name = "N", default_value_t = 6)]
    pub max_length: usize,

    /// Force capitals in the free-text field
    #[arg(long)]
    pub caps: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Check values clap cannot check on its own
    pub fn validate(&self) -> Result<(), String> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(format!("Invalid font size: {}", self.font_size));
        }
        if self.chars_wide == 0 {
            return Err("--chars-wide must be at least 1".to_string());
        }
        Ok(())
    }
}
