use rootshell::core::config::DEFAULT_MENU_LABELS;
use rootshell::Config;

pub struct Menu {
    config: Config,
}

impl Menu {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn parse_index(input: &str) -> Option<usize> {
        let s = input.trim();
        if let Ok(n) = s.parse::<usize>() {
            return Some(n);
        }
        // Full-width digits, as typed by CJK input methods.
        let clean: String = s
            .chars()
            .map(|c| match c {
                '０'..='９' => ((c as u32 - '０' as u32) + '0' as u32) as u8 as char,
                _ => c,
            })
            .filter(|c| c.is_ascii_digit())
            .collect();
        clean.parse::<usize>().ok()
    }

    pub fn render(&self, rooted: bool) {
        use colored::*;
        let status = if rooted {
            "su found".bright_green()
        } else {
            "su not found".bright_yellow()
        };
        println!(
            "\n{} {} [{}] {}",
            "===".bright_cyan(),
            "rootshell".bright_white().bold(),
            status,
            "===".bright_cyan()
        );
        for (k, def_label) in DEFAULT_MENU_LABELS {
            let lbl = self.config.get_label(k, def_label);
            println!("  {}) {}", k.bright_cyan(), lbl);
        }
        println!("  {}) {}", "q".bright_red(), "Quit");
        print!("\nChoose an entry: ");
        let _ = std::io::Write::flush(&mut std::io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_ascii_and_full_width_digits() {
        assert_eq!(Menu::parse_index(" 7 "), Some(7));
        assert_eq!(Menu::parse_index("０"), Some(0));
        assert_eq!(Menu::parse_index("１２"), Some(12));
        assert_eq!(Menu::parse_index("q"), None);
    }
}
