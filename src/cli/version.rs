//! Version and usage output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: formula [OPTIONS]

Interactive formula entry with autocomplete tags.

Options:
  --endpoint <URL>     Suggestion service URL (env FORMULA_SUGGEST_URL)
  --var <NAME=VALUE>   Bind a tag identifier to a number (repeatable, env FORMULA_VARS)
  --cache-ttl <SECS>   Suggestion cache lifetime (env FORMULA_CACHE_TTL_SECS)
  --log-file <PATH>    Log destination (env FORMULA_LOG_FILE, filter FORMULA_LOG)
  -e, --eval <EXPR>    Evaluate EXPR, print the result and exit
  -V, --version        Print version
  -h, --help           Print this help";

/// Handle the --version command.
pub fn handle_version_command() -> ! {
    println!("formula {}", VERSION);
    std::process::exit(0)
}

/// Handle the --help command.
pub fn handle_help_command() -> ! {
    println!("{}", USAGE);
    std::process::exit(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_usage_lists_every_flag() {
        for flag in ["--endpoint", "--var", "--cache-ttl", "--log-file", "--eval", "--version", "--help"] {
            assert!(USAGE.contains(flag), "missing {}", flag);
        }
    }
}
