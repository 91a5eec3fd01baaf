//! Application orchestrator.
//! Loads/merges config, initializes logging and dispatches one subcommand to
//! the library.

use filetime::FileTime;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, error, info};

use fsops::cli::{Args, Command};
use fsops::config::{load_config, Config};
use fsops::output::{self as out, format_bytes};
use fsops::{FsError, FsPath, Perms};

use crate::logging::init_tracing;

/// Failure of a CLI run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error("{0:#}")]
    Setup(anyhow::Error),
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode, AppError> {
    let mut cfg: Config = load_config().map_err(AppError::Setup)?;
    args.apply_overrides(&mut cfg);
    // Hold the guard so the file appender flushes on exit.
    let _guard = init_tracing(&cfg).map_err(AppError::Setup)?;
    debug!(?cfg, "effective config");

    let res = dispatch(&args.command, &cfg);
    if let Err(AppError::Fs(e)) = &res {
        error!(
            op = e.op(),
            path1 = ?e.path1(),
            path2 = ?e.path2(),
            errno = e.errno(),
            "operation failed"
        );
    }
    res
}

fn dispatch(command: &Command, cfg: &Config) -> Result<ExitCode, AppError> {
    match command {
        Command::Stat { path, no_follow } => {
            let st = if *no_follow { fsops::symlink_status(path)? } else { fsops::status(path)? };
            out::print_field("path", path.display());
            out::print_field("type", st.file_type());
            if st.exists() {
                out::print_field("mode", format_args!("{:04o}", st.permissions().mode()));
                if !st.is_symlink() {
                    out::print_field("links", fsops::hard_link_count(path)?);
                }
            }
        }
        Command::Copy { from, to, flags } => {
            let options = flags.options() | cfg.copy_defaults;
            fsops::copy(from, to, options)?;
            info!(from = %from.display(), to = %to.display(), ?options, "copy done");
        }
        Command::CopyFile { from, to, flags } => {
            let options = flags.options() | cfg.copy_defaults;
            if fsops::copy_file(from, to, options)? {
                info!(from = %from.display(), to = %to.display(), "copied file");
            } else {
                out::print_info(&format!("skipped: '{}' left unchanged", to.display()));
            }
        }
        Command::Rm { path, recursive } => {
            if *recursive {
                let n = fsops::remove_all(path)?;
                info!(path = %path.display(), removed = n, "remove_all done");
                out::print_user(&n.to_string());
            } else {
                fsops::remove(path)?;
            }
        }
        Command::Mkdir { path, parents } => {
            let created = if *parents {
                fsops::create_directories(path)?
            } else {
                fsops::create_directory(path)?
            };
            if !created {
                out::print_info(&format!("'{}' already exists", path.display()));
            }
        }
        Command::Ln { target, link, symbolic } => {
            if *symbolic {
                fsops::create_symlink(target, link)?;
            } else {
                fsops::create_hard_link(target, link)?;
            }
        }
        Command::Mv { from, to } => fsops::rename(from, to)?,
        Command::Truncate { path, size } => fsops::resize_file(path, *size)?,
        Command::Chmod { mode, path, add, remove, no_follow } => {
            let mut prms = Perms::from_mode(*mode);
            prms.set(Perms::ADD_PERMS, *add);
            prms.set(Perms::REMOVE_PERMS, *remove);
            prms.set(Perms::RESOLVE_SYMLINKS, !*no_follow);
            fsops::permissions(path, prms)?;
        }
        Command::Touch { path } => fsops::set_last_write_time(path, FileTime::now())?,
        Command::Size { path } => out::print_user(&fsops::file_size(path)?.to_string()),
        Command::Space { path } => {
            let s = fsops::space(path)?;
            out::print_field("capacity", format_bytes(s.capacity));
            out::print_field("free", format_bytes(s.free));
            out::print_field("available", format_bytes(s.available));
        }
        Command::Canonical { path, base } => {
            let base = match base {
                Some(b) => b.clone(),
                None => fsops::current_path()?,
            };
            out::print_user(&fsops::canonical(path, base)?.display().to_string());
        }
        Command::Absolute { path, base } => {
            let base = match base {
                Some(b) => FsPath::from(b.as_str()),
                None => FsPath::from(fsops::current_path()?),
            };
            out::print_user(&fsops::absolute(&FsPath::from(path.as_str()), &base)?.to_string());
        }
        Command::Equivalent { a, b } => {
            let same = fsops::equivalent(a, b)?;
            out::print_user(if same { "true" } else { "false" });
            return Ok(if same { ExitCode::SUCCESS } else { ExitCode::from(1) });
        }
        Command::TempDir => out::print_user(&fsops::temp_directory_path()?.display().to_string()),
        Command::Readlink { path } => {
            out::print_user(&fsops::read_symlink(path)?.display().to_string())
        }
        Command::Decompose { path } => decompose(&FsPath::from(path.as_str())),
    }
    Ok(ExitCode::SUCCESS)
}

fn decompose(p: &FsPath) {
    out::print_field("root_name", p.root_name());
    out::print_field("root_dir", p.root_directory());
    out::print_field("root_path", p.root_path());
    out::print_field("relative", p.relative_path());
    out::print_field("parent", p.parent_path());
    out::print_field("filename", p.filename());
    out::print_field("stem", p.stem());
    out::print_field("extension", p.extension());
    let elems: Vec<String> = p.iter().map(|e| format!("'{}'", e.to_string_lossy())).collect();
    out::print_field("elements", elems.join(" "));
}
