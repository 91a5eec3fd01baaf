//! User-facing console output.
//! Prefixed, coloured lines for humans (colour only on a TTY) and plain
//! lines for results that scripts may consume.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tag {
    Info,
    Warn,
    Error,
}

fn is_tty(stderr: bool) -> bool {
    atty::is(if stderr { atty::Stream::Stderr } else { atty::Stream::Stdout })
}

fn emit(tag: Tag, msg: &str) {
    let (label, to_stderr) = match tag {
        Tag::Info => ("info:", false),
        Tag::Warn => ("warn:", true),
        Tag::Error => ("error:", true),
    };
    let line = if is_tty(to_stderr) {
        let coloured = match tag {
            Tag::Info => label.cyan().bold().to_string(),
            Tag::Warn => label.yellow().bold().to_string(),
            Tag::Error => label.red().bold().to_string(),
        };
        format!("{coloured} {msg}")
    } else {
        format!("{label} {msg}")
    };
    if to_stderr {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn print_info(msg: &str) {
    emit(Tag::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tag::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tag::Error, msg);
}

/// Plain result line (no prefix, no colour).
pub fn print_user(msg: &str) {
    println!("{msg}");
}

/// `label: value` result line, label padded for alignment.
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("{:<12} {value}", format!("{label}:"));
}

/// Human-readable byte count (binary units).
pub fn format_bytes(n: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    const TB: f64 = GB * 1024.0;
    let f = n as f64;
    if f >= TB {
        format!("{:.1} TiB", f / TB)
    } else if f >= GB {
        format!("{:.1} GiB", f / GB)
    } else if f >= MB {
        format!("{:.1} MiB", f / MB)
    } else if f >= KB {
        format!("{:.1} KiB", f / KB)
    } else {
        format!("{n} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GiB");
    }
}
