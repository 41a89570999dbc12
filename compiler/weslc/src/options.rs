//! Command-line options shared by `link` and `check`.

use std::path::PathBuf;

use wesl_ir::ModulePath;
use wesl_link::LinkConfig;

/// Options after the command name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// The root `.wesl` file.
    pub root: PathBuf,
    /// Directory the `package` modules are relative to. Defaults to the
    /// root file's directory.
    pub base: Option<PathBuf>,
    /// `(name, dir)` library roots.
    pub libs: Vec<(String, PathBuf)>,
    /// Output file; stdout when absent.
    pub output: Option<PathBuf>,
    pub source_map: Option<PathBuf>,
    pub params: Vec<(String, String)>,
    pub conditions: Vec<(String, bool)>,
}

impl LinkOptions {
    /// The package directory.
    pub fn base_dir(&self) -> PathBuf {
        match &self.base {
            Some(base) => base.clone(),
            None => self
                .root
                .parent()
                .map(PathBuf::from)
                .unwrap_or_default(),
        }
    }

    /// Link configuration for the module at `root`.
    pub fn link_config(&self, root: ModulePath) -> LinkConfig {
        let mut config = LinkConfig::new(root);
        for (name, value) in &self.params {
            config = config.with_param(name, value);
        }
        for (name, value) in &self.conditions {
            config = config.with_condition(name, *value);
        }
        config
    }
}

/// Malformed command lines.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("missing root file")]
    MissingRoot,
    #[error("`{0}` expects a value")]
    MissingValue(String),
    #[error("`{flag}` expects NAME=VALUE, found `{found}`")]
    ExpectedPair { flag: String, found: String },
    #[error("`--cond {name}={value}`: expected `true` or `false`")]
    InvalidBool { name: String, value: String },
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

/// Parse everything after `weslc <command>`.
///
/// Flags take their value as the next argument or after `=`
/// (`--base dir`, `--base=dir`).
pub fn parse_link_options(args: &[String]) -> Result<LinkOptions, OptionsError> {
    let mut options = LinkOptions::default();
    let mut root = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if arg.starts_with("--") => (flag, Some(value.to_owned())),
            _ => (arg.as_str(), None),
        };
        let mut value = || {
            inline
                .clone()
                .or_else(|| iter.next().cloned())
                .ok_or_else(|| OptionsError::MissingValue(flag.to_owned()))
        };

        match flag {
            "--base" => options.base = Some(PathBuf::from(value()?)),
            "-o" | "--output" => options.output = Some(PathBuf::from(value()?)),
            "--source-map" => options.source_map = Some(PathBuf::from(value()?)),
            "--lib" => {
                let (name, dir) = pair(flag, &value()?)?;
                options.libs.push((name, PathBuf::from(dir)));
            }
            "--param" => options.params.push(pair(flag, &value()?)?),
            "--cond" => {
                let raw = value()?;
                let condition = match raw.split_once('=') {
                    None => (raw, true),
                    Some((name, "true")) => (name.to_owned(), true),
                    Some((name, "false")) => (name.to_owned(), false),
                    Some((name, other)) => {
                        return Err(OptionsError::InvalidBool {
                            name: name.to_owned(),
                            value: other.to_owned(),
                        })
                    }
                };
                options.conditions.push(condition);
            }
            _ if flag.starts_with('-') => return Err(OptionsError::UnknownOption(arg.clone())),
            _ if root.is_none() => root = Some(PathBuf::from(arg)),
            _ => return Err(OptionsError::UnexpectedArgument(arg.clone())),
        }
    }

    options.root = root.ok_or(OptionsError::MissingRoot)?;
    Ok(options)
}

fn pair(flag: &str, text: &str) -> Result<(String, String), OptionsError> {
    match text.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        _ => Err(OptionsError::ExpectedPair {
            flag: flag.to_owned(),
            found: text.to_owned(),
        }),
    }
}
