use hexarray::Layout;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use tracing::Level;

#[derive(Debug, PartialEq)]
enum Input {
    Stdin,
    File(String),
    Hex(String),
}

#[derive(Debug, PartialEq)]
struct Options {
    input: Input,
    line_max: Option<usize>,
    indent: Option<usize>,
    config: Option<String>,
    output: Option<String>,
    legacy: bool,
}

enum State {
    Normal,
    File,
    Hex,
    LineMax,
    Indent,
    Config,
    Output,
}

fn usage(message: impl Into<String>) -> ! {
    let message = message.into();
    if !message.is_empty() {
        eprintln!("{}", message);
    }
    eprintln!(
        "{}",
        r#"hexarray-cli

Usage:
    hexarray-cli [--file in.bin | --hex 0a0bff] [options]

Reads bytes from the file, the hex string, or stdin, and prints them as a hex array.

Options:
    -n, --line-max N     values per line (env HEXARRAY_LINE_MAX)
    -i, --indent N       tabs before the braces (env HEXARRAY_INDENT)
    -c, --config FILE    JSON layout, e.g. {"line_max": 8, "indent": 1}
    -o, --output FILE    write the array to FILE instead of stdout
    --legacy             reproduce the old table dumper output exactly
"#
    );

    std::process::exit(1);
}

fn parse_number(flag: &str, value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("Expected a number for {}, got {:?}", flag, value))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        input: Input::Stdin,
        line_max: None,
        indent: None,
        config: None,
        output: None,
        legacy: false,
    };

    let mut state = State::Normal;
    for arg in args {
        match state {
            State::Normal => match arg.as_str() {
                "-f" | "--file" => state = State::File,
                "-x" | "--hex" => state = State::Hex,
                "-n" | "--line-max" => state = State::LineMax,
                "-i" | "--indent" => state = State::Indent,
                "-c" | "--config" => state = State::Config,
                "-o" | "--output" => state = State::Output,
                "--legacy" => options.legacy = true,
                x => return Err(format!("Unexpected argument {:?}", x)),
            },
            State::File | State::Hex if options.input != Input::Stdin => {
                return Err("Only one of --file and --hex may be given".into());
            }
            State::File => {
                options.input = Input::File(arg);
                state = State::Normal
            }
            State::Hex => {
                options.input = Input::Hex(arg);
                state = State::Normal
            }
            State::LineMax => {
                options.line_max = Some(parse_number("--line-max", &arg)?);
                state = State::Normal
            }
            State::Indent => {
                options.indent = Some(parse_number("--indent", &arg)?);
                state = State::Normal
            }
            State::Config => {
                options.config = Some(arg);
                state = State::Normal
            }
            State::Output => {
                options.output = Some(arg);
                state = State::Normal
            }
        }
    }

    match state {
        State::Normal => Ok(options),
        _ => Err("Missing a value for the last option".into()),
    }
}

fn env_number(
    env_var: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<usize>, String> {
    env_var(key).map(|value| parse_number(key, &value)).transpose()
}

/// Flags win over the config file, which wins over the environment. The environment is only
/// consulted for values nothing else supplied.
fn resolve_layout(
    options: &Options,
    env_var: impl Fn(&str) -> Option<String>,
) -> Result<Layout, String> {
    let config = match &options.config {
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| format!("Failed to open {} for reading.\n    {:?}", path, err))?;
            let layout: Layout = serde_json::from_reader(file)
                .map_err(|err| format!("Failed to parse the layout in {}.\n    {}", path, err))?;
            Some(layout)
        }
        None => None,
    };

    let line_max = match options.line_max.or_else(|| config.map(|c| c.line_max())) {
        Some(line_max) => line_max,
        None => env_number(&env_var, "HEXARRAY_LINE_MAX")?
            .unwrap_or_else(|| Layout::default().line_max()),
    };
    let indent = match options.indent.or_else(|| config.map(|c| c.indent())) {
        Some(indent) => indent,
        None => env_number(&env_var, "HEXARRAY_INDENT")?
            .unwrap_or_else(|| Layout::default().indent()),
    };

    Layout::new(line_max, indent).map_err(|err| err.to_string())
}

fn read_input(input: &Input) -> Result<Vec<u8>, String> {
    match input {
        Input::Stdin => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|err| format!("Failed to read stdin.\n    {:?}", err))?;
            Ok(bytes)
        }
        Input::File(path) => std::fs::read(path)
            .map_err(|err| format!("Failed to open {} for reading.\n    {:?}", path, err)),
        Input::Hex(s) => decode_hex(s),
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>, String> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&digits).map_err(|err| format!("Invalid hex input {:?}: {}", s, err))
}

fn init_logging() {
    let level = env::var("HEXARRAY_LOG")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

/// The error's message followed by each of its sources, e.g. the `io::Error` behind a
/// `DumpError::Write`.
fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(err) = source {
        message.push_str(": ");
        message.push_str(&err.to_string());
        source = err.source();
    }
    message
}

fn run(options: &Options) -> Result<(), String> {
    let layout = resolve_layout(options, |key| env::var(key).ok())?;
    let bytes = read_input(&options.input)?;
    tracing::debug!(
        len = bytes.len(),
        line_max = layout.line_max(),
        indent = layout.indent(),
        legacy = options.legacy,
        "dumping input"
    );

    let write = |out: &mut dyn Write| {
        if options.legacy {
            hexarray::legacy::dump(out, &bytes, layout.line_max(), layout.indent())
        } else {
            layout.write_to(out, &bytes)
        }
    };

    match &options.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|err| format!("Failed to open {} for writing.\n    {:?}", path, err))?;
            let mut file = BufWriter::new(file);
            write(&mut file)
                .map_err(|err| format!("Failed to write {}.\n    {}", path, describe(&err)))?;
            file.flush()
                .map_err(|err| format!("Failed to write {}.\n    {}", path, describe(&err)))?;
            eprintln!("Wrote {} values to {}", bytes.len(), path);
        }
        None => {
            let stdout = io::stdout();
            let mut stdout = stdout.lock();
            write(&mut stdout)
                .map_err(|err| format!("Failed to write to stdout.\n    {}", describe(&err)))?;
            writeln!(stdout).map_err(|err| format!("Failed to write to stdout.\n    {:?}", err))?;
        }
    }

    Ok(())
}

fn main() {
    init_logging();

    let options = parse_args(env::args().skip(1)).unwrap_or_else(|message| usage(message));

    if let Err(message) = run(&options) {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn parse_defaults_to_stdin() {
        let options = parse_args(args(&[])).unwrap();
        assert_eq!(options.input, Input::Stdin);
        assert_eq!(options.line_max, None);
        assert!(!options.legacy);
    }

    #[test]
    fn parse_all_options() {
        let options = parse_args(args(&[
            "-f", "table.bin", "-n", "8", "--indent", "1", "--legacy", "-o", "out.h",
        ]))
        .unwrap();
        assert_eq!(options.input, Input::File("table.bin".into()));
        assert_eq!(options.line_max, Some(8));
        assert_eq!(options.indent, Some(1));
        assert_eq!(options.output, Some("out.h".into()));
        assert!(options.legacy);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(parse_args(args(&["stray"])).is_err());
        assert!(parse_args(args(&["-n", "eight"])).is_err());
        assert!(parse_args(args(&["--indent"])).is_err());
        assert!(parse_args(args(&["-f", "a.bin", "-x", "00"])).is_err());
    }

    #[test]
    fn flags_override_environment() {
        let options = parse_args(args(&["-n", "4"])).unwrap();
        let env = |key: &str| match key {
            "HEXARRAY_LINE_MAX" => Some("16".to_owned()),
            "HEXARRAY_INDENT" => Some("2".to_owned()),
            _ => None,
        };
        assert_eq!(resolve_layout(&options, env).unwrap(), Layout::new(4, 2).unwrap());
    }

    #[test]
    fn flags_skip_malformed_environment() {
        let options = parse_args(args(&["-n", "4", "-i", "1"])).unwrap();
        let env = |key: &str| match key {
            "HEXARRAY_LINE_MAX" => Some("wide".to_owned()),
            "HEXARRAY_INDENT" => Some("deep".to_owned()),
            _ => None,
        };
        assert_eq!(resolve_layout(&options, env).unwrap(), Layout::new(4, 1).unwrap());
    }

    #[test]
    fn malformed_environment_is_reported_when_used() {
        let options = parse_args(args(&["-n", "4"])).unwrap();
        let env = |key: &str| match key {
            "HEXARRAY_INDENT" => Some("deep".to_owned()),
            _ => None,
        };
        let err = resolve_layout(&options, env).unwrap_err();
        assert!(err.contains("HEXARRAY_INDENT"));
    }

    #[test]
    fn describe_includes_io_source() {
        let err = hexarray::DumpError::from(io::Error::new(io::ErrorKind::Other, "disk full"));
        let message = describe(&err);
        assert!(message.starts_with("An underlying IO error occurred while dumping"));
        assert!(message.ends_with(": disk full"));
    }

    #[test]
    fn zero_line_max_is_reported() {
        let options = parse_args(args(&["-n", "0"])).unwrap();
        let err = resolve_layout(&options, no_env).unwrap_err();
        assert!(err.contains("line_max"));
    }

    #[test]
    fn default_layout_without_env() {
        let options = parse_args(args(&[])).unwrap();
        assert_eq!(resolve_layout(&options, no_env).unwrap(), Layout::default());
    }

    #[test]
    fn hex_input_ignores_whitespace() {
        assert_eq!(decode_hex("de ad\nbe ef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(decode_hex("abc").is_err());
    }
}
