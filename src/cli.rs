//! CLI definition and parsing.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Copy flags are OR-ed with `copy_options` from the config file.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::{CopyOptions, Perms};

/// POSIX filesystem operations from the command line.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "POSIX filesystem operations with structured errors")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print type and permissions of a path.
    Stat {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        /// Do not follow a final symlink (lstat).
        #[arg(long)]
        no_follow: bool,
    },
    /// Copy files, symlinks or directory trees.
    Copy {
        #[arg(value_hint = ValueHint::AnyPath)]
        from: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        to: PathBuf,
        #[command(flatten)]
        flags: CopyFlags,
    },
    /// Copy a single regular file.
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        #[command(flatten)]
        flags: CopyFlags,
    },
    /// Remove a file or empty directory (`-r`: a whole tree).
    Rm {
        path: PathBuf,
        #[arg(short, long)]
        recursive: bool,
    },
    /// Create a directory (`-p`: with missing parents).
    Mkdir {
        path: PathBuf,
        #[arg(short, long)]
        parents: bool,
    },
    /// Create a hard link (`-s`: a symlink) at LINK pointing to TARGET.
    Ln {
        target: PathBuf,
        link: PathBuf,
        #[arg(short, long)]
        symbolic: bool,
    },
    /// Rename a path.
    Mv { from: PathBuf, to: PathBuf },
    /// Resize a file to exactly SIZE bytes.
    Truncate { path: PathBuf, size: u64 },
    /// Change permission bits (octal MODE).
    Chmod {
        #[arg(value_parser = parse_octal_mode)]
        mode: u32,
        path: PathBuf,
        /// Add the bits to the current permissions.
        #[arg(long, conflicts_with = "remove")]
        add: bool,
        /// Clear the bits from the current permissions.
        #[arg(long)]
        remove: bool,
        /// Change a symlink itself where the platform allows it.
        #[arg(long)]
        no_follow: bool,
    },
    /// Set the modification time to now.
    Touch { path: PathBuf },
    /// Print the size of a regular file.
    Size { path: PathBuf },
    /// Print capacity/free/available space of a filesystem.
    Space {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Print the canonical form of a path.
    Canonical {
        path: PathBuf,
        #[arg(long)]
        base: Option<PathBuf>,
    },
    /// Print a path completed against BASE (default: current directory).
    Absolute {
        path: String,
        #[arg(long)]
        base: Option<String>,
    },
    /// Exit 0 when both paths name the same file, 1 otherwise.
    Equivalent { a: PathBuf, b: PathBuf },
    /// Print the temporary-files directory.
    TempDir,
    /// Print the target of a symlink.
    Readlink { path: PathBuf },
    /// Print the components of a path.
    Decompose { path: String },
}

/// Flags shared by `copy` and `copy-file`.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct CopyFlags {
    #[arg(short, long)]
    pub recursive: bool,
    #[arg(long, group = "symlinks")]
    pub copy_symlinks: bool,
    #[arg(long, group = "symlinks")]
    pub skip_symlinks: bool,
    #[arg(long, group = "form")]
    pub create_symlinks: bool,
    #[arg(long, group = "form")]
    pub create_hard_links: bool,
    #[arg(long, group = "form")]
    pub directories_only: bool,
    #[arg(long, group = "existing")]
    pub skip_existing: bool,
    #[arg(long, group = "existing")]
    pub overwrite: bool,
    #[arg(long, group = "existing")]
    pub update: bool,
}

impl CopyFlags {
    pub fn options(&self) -> CopyOptions {
        let mut o = CopyOptions::empty();
        o.set(CopyOptions::RECURSIVE, self.recursive);
        o.set(CopyOptions::COPY_SYMLINKS, self.copy_symlinks);
        o.set(CopyOptions::SKIP_SYMLINKS, self.skip_symlinks);
        o.set(CopyOptions::CREATE_SYMLINKS, self.create_symlinks);
        o.set(CopyOptions::CREATE_HARD_LINKS, self.create_hard_links);
        o.set(CopyOptions::DIRECTORIES_ONLY, self.directories_only);
        o.set(CopyOptions::SKIP_EXISTING, self.skip_existing);
        o.set(CopyOptions::OVERWRITE_EXISTING, self.overwrite);
        o.set(CopyOptions::UPDATE_EXISTING, self.update);
        o
    }
}

fn parse_octal_mode(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0o");
    let mode = u32::from_str_radix(digits, 8).map_err(|e| format!("invalid octal mode '{s}': {e}"))?;
    if mode > Perms::MASK.bits() {
        return Err(format!("mode '{s}' exceeds {:o}", Perms::MASK.bits()));
    }
    Ok(mode)
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(f) = &self.log_file {
            cfg.log_file = Some(f.clone());
        }
        if self.json {
            cfg.json_logs = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("fsops").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn copy_flags_map_to_options() {
        let a = args(&["copy", "-r", "--skip-symlinks", "--update", "a", "b"]);
        let Command::Copy { flags, .. } = a.command else { panic!("expected copy") };
        assert_eq!(
            flags.options(),
            CopyOptions::RECURSIVE | CopyOptions::SKIP_SYMLINKS | CopyOptions::UPDATE_EXISTING
        );
    }

    #[test]
    fn conflicting_existing_policies_rejected() {
        let r = Args::try_parse_from(["fsops", "copy-file", "--overwrite", "--update", "a", "b"]);
        assert!(r.is_err());
    }

    #[test]
    fn chmod_parses_octal() {
        let a = args(&["chmod", "0755", "f"]);
        assert!(matches!(a.command, Command::Chmod { mode: 0o755, .. }));
        assert!(Args::try_parse_from(["fsops", "chmod", "999", "f"]).is_err());
        assert!(Args::try_parse_from(["fsops", "chmod", "--add", "--remove", "7", "f"]).is_err());
    }

    #[test]
    fn overrides_apply_and_debug_wins() {
        let a = args(&["--log-level", "quiet", "-d", "--json", "temp-dir"]);
        let mut cfg = Config::default();
        a.apply_overrides(&mut cfg);
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert!(cfg.json_logs);
        assert!(cfg.log_file.is_none());
    }
}
