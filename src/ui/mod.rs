//! User interface module.
//!
//! - `formatter` - Printing of banners, status lines and warnings
//! - This module - Small value formatting helpers shared by the commands

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_banner, display_boundary_warning, display_command_banner, display_commands,
    display_detail, display_error, display_failure, display_field, display_section,
    display_status, display_step, display_success,
};

/// Format a byte count as megabytes with two decimals (`1.50 MB`).
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Format a byte count as kilobytes with one decimal (`12.3 KB`).
pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(0), "0.00 MB");
        assert_eq!(format_megabytes(1024 * 1024 * 3 / 2), "1.50 MB");
    }

    #[test]
    fn test_format_kilobytes() {
        assert_eq!(format_kilobytes(2048), "2.0 KB");
        assert_eq!(format_kilobytes(1536), "1.5 KB");
    }
}
