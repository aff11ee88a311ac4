use anyhow::{bail, Result};
use std::path::PathBuf;

pub const USAGE: &str = "Usage: generate microsoft <sourceFileName> <configFileName>\n       generate google <sourceFileName> <configFileName>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// TypeScript bindings at `source_file`, function manifest at `config_file`.
    Microsoft {
        source_file: PathBuf,
        config_file: PathBuf,
    },
    Google {
        source_file: PathBuf,
        config_file: PathBuf,
    },
}

/// Parse the arguments following the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [platform, source_file, config_file] => {
            let source_file = PathBuf::from(source_file);
            let config_file = PathBuf::from(config_file);
            match platform.as_str() {
                "microsoft" => Ok(Command::Microsoft {
                    source_file,
                    config_file,
                }),
                "google" => Ok(Command::Google {
                    source_file,
                    config_file,
                }),
                other => bail!("Unknown platform '{}'\n{}", other, USAGE),
            }
        }
        _ => bail!("Expected 3 arguments, got {}\n{}", args.len(), USAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_parse_microsoft() {
        let command = parse_args(&args(&["microsoft", "src/functions.ts", "functions.json"])).unwrap();
        assert_eq!(
            command,
            Command::Microsoft {
                source_file: PathBuf::from("src/functions.ts"),
                config_file: PathBuf::from("functions.json"),
            }
        );
    }

    #[test]
    fn test_parse_google() {
        let command = parse_args(&args(&["google", "Code.gs", "appsscript.json"])).unwrap();
        assert!(matches!(command, Command::Google { .. }));
    }

    #[test]
    fn test_parse_unknown_platform() {
        let error = parse_args(&args(&["apple", "a", "b"])).unwrap_err();
        assert!(error.to_string().contains("Unknown platform 'apple'"));
        assert!(error.to_string().contains("Usage:"));
    }

    #[test]
    fn test_parse_wrong_argument_count() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["microsoft", "only-one"])).is_err());
        assert!(parse_args(&args(&["microsoft", "a", "b", "c"])).is_err());
    }
}
