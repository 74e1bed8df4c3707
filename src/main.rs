mod ui;
use rootshell::ops::FileAccess;
use rootshell::root::PermissionOutcome;
use rootshell::{Config, Roots};
use tracing_subscriber::EnvFilter;
use ui::{ConsoleUi, Menu};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    ConsoleUi::write_banner();
    let config = Config::load()?;
    let roots = match Roots::new(config.clone()) {
        Ok(r) => r,
        Err(e) => {
            ConsoleUi::error(&format!("cannot set up the root shell: {}", e));
            return Ok(());
        }
    };

    let menu = Menu::new(config);
    loop {
        menu.render(roots.has_rooted());
        let choice = ConsoleUi::read_line();
        if choice.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        match Menu::parse_index(&choice) {
            Some(0) => detection_report(&roots),
            Some(1) => match roots.check_root_permission() {
                PermissionOutcome::Granted => ConsoleUi::success("root permission granted"),
                PermissionOutcome::NotRoot => ConsoleUi::warn("shell is not running as uid 0"),
                PermissionOutcome::Failed(reason) => {
                    ConsoleUi::error(&format!("root request failed: {}", reason))
                }
            },
            Some(2) => {
                let command = ConsoleUi::prompt("Command:");
                ConsoleUi::render_result(&roots.run_command(&command));
            }
            Some(3) => {
                let name = ConsoleUi::prompt("Process name:");
                if roots.is_process_running(&name) {
                    ConsoleUi::success(&format!("{} is running", name));
                } else {
                    ConsoleUi::warn(&format!("{} is not running", name));
                }
            }
            Some(4) => {
                let name = ConsoleUi::prompt("Process name:");
                ConsoleUi::report(roots.kill_process_by_name(&name), "kill");
            }
            Some(5) => {
                let path = ConsoleUi::prompt("Output file (e.g. /sdcard/shot.png):");
                ConsoleUi::report(roots.screen_cap(&path), "screen capture");
            }
            Some(6) => {
                let path = ConsoleUi::prompt("Path:");
                let mode = ConsoleUi::prompt("Mode (rw/ro):");
                ConsoleUi::report(roots.remount(&path, &mode), "remount");
            }
            Some(7) => ConsoleUi::render_mount_table(&roots.mount_table()),
            Some(8) => change_permissions(&roots),
            Some(9) => {
                let path = ConsoleUi::prompt("Output file (e.g. /sdcard/demo.mp4):");
                ConsoleUi::info(&format!(
                    "recording for up to {}s...",
                    roots.config().screenrecord_time_limit
                ));
                ConsoleUi::report(roots.screen_record(&path), "screen recording");
            }
            Some(10) => copy_file(&roots),
            Some(11) => {
                let answer =
                    ConsoleUi::prompt("This kills zygote and restarts the UI. Continue? (y/N):");
                if answer.eq_ignore_ascii_case("y") {
                    ConsoleUi::report(roots.restart_device(), "restart");
                }
            }
            _ => ConsoleUi::warn("invalid choice, try again"),
        }
    }
}

fn detection_report(roots: &Roots) {
    ConsoleUi::info("searching for the su binary...");
    match roots.detector().locate_su() {
        Some(path) => ConsoleUi::success(&format!("su found at {}", path.display())),
        None => {
            ConsoleUi::warn("su not found in:");
            for dir in roots.detector().search_dirs() {
                println!("  {}", dir.display());
            }
        }
    }
    match roots.permissions().cached() {
        Some(outcome) => ConsoleUi::info(&format!("last permission check: {:?}", outcome)),
        None => ConsoleUi::info("root permission not requested yet"),
    }
}

fn copy_file(roots: &Roots) {
    let source = ConsoleUi::prompt("Source file:");
    let target = ConsoleUi::prompt("Target directory, or a file path ending in the new name:");
    let copied = if std::path::Path::new(&target).is_dir() {
        roots.copy_file(&source, &target)
    } else {
        roots.copy_file_to(&source, &target)
    };
    ConsoleUi::report(copied, "copy");
}

fn change_permissions(roots: &Roots) {
    let path = ConsoleUi::prompt("Path:");
    let access = match ConsoleUi::prompt("Access (r/w/x/full):").as_str() {
        "r" => FileAccess::Read,
        "w" => FileAccess::Write,
        "x" => FileAccess::Execute,
        "full" => FileAccess::Full,
        _ => {
            ConsoleUi::warn("unknown access");
            return;
        }
    };
    let grant = !ConsoleUi::prompt("Grant or revoke (g/r):").eq_ignore_ascii_case("r");
    let journal = ConsoleUi::prompt("Database with journal? (y/N):").eq_ignore_ascii_case("y");
    if journal {
        let pair = roots.chmod_with_journal(&path, access, grant);
        ConsoleUi::render_result(&pair.database);
        ConsoleUi::render_result(&pair.journal);
    } else {
        ConsoleUi::render_result(&roots.chmod(&path, access, grant));
    }
}
