use colored::*;
use rootshell::ops::MountEntry;
use rootshell::shell::CommandResult;
use std::io::{self, Write};

pub struct ConsoleUi;

impl ConsoleUi {
    pub fn write_banner() {
        println!("{}\n", "rootshell".bright_cyan().bold());
    }

    pub fn read_line() -> String {
        let mut buf = String::new();
        print!("> ");
        let _ = io::stdout().flush();
        if io::stdin().read_line(&mut buf).is_err() {
            return String::new();
        }
        buf.trim().to_string()
    }

    pub fn prompt(label: &str) -> String {
        println!("{}", label);
        Self::read_line()
    }

    pub fn info(msg: &str) {
        println!("{} {}", "[INFO]".bright_blue(), msg);
    }

    pub fn warn(msg: &str) {
        println!("{} {}", "[WARN]".bright_yellow(), msg);
    }

    pub fn error(msg: &str) {
        eprintln!("{} {}", "[ERROR]".bright_red().bold(), msg);
    }

    pub fn success(msg: &str) {
        println!("{}", msg.bright_green());
    }

    pub fn report(ok: bool, what: &str) {
        if ok {
            Self::success(&format!("{}: ok", what));
        } else {
            Self::warn(&format!("{}: failed", what));
        }
    }

    pub fn render_result(result: &CommandResult) {
        if !result.message().is_empty() {
            print!("{}", result.message());
        }
        match result.failure() {
            None => Self::success("command finished"),
            Some(reason) => Self::error(&format!("command failed: {}", reason)),
        }
    }

    pub fn render_mount_table(entries: &[MountEntry]) {
        if entries.is_empty() {
            Self::warn("mount table is empty or unreadable");
            return;
        }

        let sep = "-".repeat(80);
        println!("{}", sep.bright_black());

        println!(
            "{:<32} {:<28} {:<10} {:<4}",
            "Device".bright_cyan(),
            "Mount point".bright_cyan(),
            "Type".bright_cyan(),
            "Mode".bright_cyan()
        );

        println!("{}", sep.bright_black());

        for entry in entries {
            let mode = if entry.is_read_only() {
                "ro".bright_yellow()
            } else {
                "rw".bright_green()
            };
            println!(
                "{:<32} {:<28} {:<10} {:<4}",
                entry.device.bright_white(),
                entry.mount_point,
                entry.fs_type,
                mode
            );
        }

        println!("{}", sep.bright_black());
        println!();
    }
}
