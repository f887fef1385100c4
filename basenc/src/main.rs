use std::fs;
use std::io::{self, Read as _, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use basencoding::{BaseSpec, TextEncoding};
use clap::{ArgAction, Parser};

mod config;
mod logging;

use config::BConfig;

/// Converts byte sequences to integers in bases 2 to 36, and back.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The file to read.
    ///
    /// Reads standard input if omitted or `-`.
    input: Option<PathBuf>,

    /// Decode data instead of encoding it.
    #[arg(short, long)]
    decode: bool,

    /// The base, either as one base-36 digit or as a decimal number.
    ///
    /// A letter also picks the letter case of the output: `g` is lowercase
    /// base 16, `G` uppercase base 16. `0` and `1` are base 36. Decimal
    /// numbers with two or more digits, such as `16`, mix cases randomly.
    ///
    /// If omitted, encoding picks a random base and decoding guesses it.
    #[arg(short, long)]
    base: Option<BaseSpec>,

    /// The text encoding decoded data must be valid in when guessing the base.
    #[arg(short, long)]
    encoding: Option<TextEncoding>,

    /// The file to write.
    ///
    /// Writes to standard output if omitted or `-`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// A config file to load instead of `basenc.toml`.
    ///
    /// Unlike `basenc.toml`, this file must exist.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log more details to standard error. Repeat for even more.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// The settings for one conversion, after merging the config and the command
/// line.
#[derive(Debug, Clone, Copy)]
struct Job {
    decode: bool,
    base: BaseSpec,
    encoding: TextEncoding,
}

impl Job {
    fn new(cli: &Cli, config: &BConfig) -> anyhow::Result<Self> {
        let config_base = config.codec.base()?;
        let config_encoding = config.codec.encoding()?;

        Ok(Self {
            decode: cli.decode,
            base: cli.base.unwrap_or(config_base),
            encoding: cli.encoding.unwrap_or(config_encoding),
        })
    }

    fn run(self, input: &[u8]) -> Result<Vec<u8>, basencoding::Error> {
        if self.decode {
            basencoding::decode(input, self.base, self.encoding)
        } else {
            basencoding::encode(input, self.base)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = BConfig::load(cli.config.as_deref())?;
    logging::init(&config.log, cli.verbose)?;

    let res = run(&cli, &config);
    if let Err(why) = &res {
        log::error!("Exiting due to error: {why:?}");
    }

    log::logger().flush();
    res
}

fn run(cli: &Cli, config: &BConfig) -> anyhow::Result<()> {
    let job = Job::new(cli, config)?;
    log::debug!("Running {job:?}");

    let input = read_input(cli.input.as_deref())?;
    let output = job.run(&input).with_context(|| {
        if job.decode {
            "cannot decode input"
        } else {
            "cannot encode input"
        }
    })?;

    write_output(cli.output.as_deref(), &output)
}

/// Filters out `-`, which stands for a standard stream like an absent path.
fn file_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| *p != Path::new("-"))
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match file_path(path) {
        Some(path) => fs::read(path).with_context(|| format!("cannot read input {path:?}")),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("cannot read standard input")?;
            Ok(buf)
        },
    }
}

fn write_output(path: Option<&Path>, data: &[u8]) -> anyhow::Result<()> {
    match file_path(path) {
        Some(path) => fs::write(path, data).with_context(|| format!("cannot write output {path:?}")),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush().context("cannot write standard output")
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    fn job(args: &[&str], config: &str) -> Job {
        use crate::config::setup::{Builder, TomlText};

        let cli = Cli::try_parse_from(args).expect("args are valid");
        let config: BConfig = Builder::new()
            .add_layer(TomlText::new(include_str!("../assets/default_config.toml")))
            .add_layer(TomlText::new(config))
            .build()
            .expect("config is valid");

        Job::new(&cli, &config).expect("job is valid")
    }

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_overrides_config() {
        let job = job(
            &["basenc", "-d", "-b", "G", "-e", "ascii"],
            "codec = { base = 'z', encoding = 'latin-1' }",
        );

        assert!(job.decode);
        assert_eq!(job.base, BaseSpec::Char(b'G'));
        assert_eq!(job.encoding, TextEncoding::Ascii);
    }

    #[test]
    fn config_fills_gaps() {
        let job = job(&["basenc"], "codec = { base = '16', encoding = 'utf-16-le' }");

        assert!(!job.decode);
        assert_eq!(job.base, BaseSpec::Decimal(16));
        assert_eq!(job.encoding, TextEncoding::Utf16Le);
    }

    #[test]
    fn encode_then_decode() {
        let encoded = job(&["basenc", "-b", "0"], "").run(b"basenc").expect("encodes");
        assert_eq!(encoded.last(), Some(&b'\n'));
        assert!(!encoded.iter().any(u8::is_ascii_uppercase), "lowercase base 36");

        let decoded = job(&["basenc", "-d", "-b", "0"], "").run(&encoded).expect("decodes");
        assert_eq!(decoded, b"basenc");
    }

    #[test]
    fn bad_args_are_rejected() {
        assert!(Cli::try_parse_from(["basenc", "-b", "37x"]).is_err(), "invalid base");
        assert!(Cli::try_parse_from(["basenc", "-e", "klingon"]).is_err(), "invalid encoding");
    }

    #[test]
    fn dash_file_path() {
        assert_eq!(file_path(None), None);
        assert_eq!(file_path(Some(Path::new("-"))), None);
        assert_eq!(file_path(Some(Path::new("in.txt"))), Some(Path::new("in.txt")));
    }
}
