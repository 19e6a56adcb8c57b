//! Front-end configuration and command-line parsing.

use std::fmt;
use std::time::Duration;

use pathstep_search::GridConfig;

/// Command-line help text.
pub const USAGE: &str = "\
Usage: pathstep [OPTIONS]

Options:
  --size N        initial grid size (clamped to 10..=40, default 20)
  --tick-ms MS    auto-run interval in milliseconds (default 50)
  --density F     obstacle probability for random layouts, 0..=1 (default 0.3)
  --seed N        seed for random layouts
  --no-mouse      do not capture the mouse
  -h, --help      show this message";

/// Settings for the terminal visualizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub grid: GridConfig,
    /// Interval between automatic steps.
    pub tick: Duration,
    pub mouse: bool,
    pub obstacle_density: f64,
    /// Fixed seed for random layouts; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            tick: Duration::from_millis(50),
            mouse: true,
            obstacle_density: 0.3,
            seed: None,
        }
    }
}

impl Config {
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse = enabled;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.obstacle_density = density;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build a config from command-line arguments (program name excluded).
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Err(ConfigError::HelpRequested),
                "--no-mouse" => config.mouse = false,
                "--size" => {
                    let n: i32 = parse_value(&arg, args.next())?;
                    config.grid = config.grid.with_default_size(n);
                }
                "--tick-ms" => {
                    let ms: u64 = parse_value(&arg, args.next())?;
                    config.tick = Duration::from_millis(ms);
                }
                "--density" => {
                    let raw = args.next();
                    let d: f64 = parse_value(&arg, raw.clone())?;
                    if !(0.0..=1.0).contains(&d) {
                        return Err(ConfigError::InvalidValue {
                            flag: arg,
                            value: raw.unwrap_or_default(),
                        });
                    }
                    config.obstacle_density = d;
                }
                "--seed" => config.seed = Some(parse_value(&arg, args.next())?),
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }
        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}

/// Errors from [`Config::from_args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `-h` / `--help` was given.
    HelpRequested,
    /// A flag that takes a value was last on the line.
    MissingValue(String),
    InvalidValue { flag: String, value: String },
    UnknownArgument(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HelpRequested => f.write_str("help requested"),
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::InvalidValue { flag, value } => write!(f, "invalid value {value:?} for {flag}"),
            Self::UnknownArgument(arg) => write!(f, "unknown argument {arg:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_gives_defaults() {
        let c = Config::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.tick, Duration::from_millis(50));
        assert!(c.mouse);
    }

    #[test]
    fn parses_all_flags() {
        let c = Config::from_args([
            "--size",
            "33",
            "--tick-ms",
            "10",
            "--density",
            "0.5",
            "--seed",
            "9",
            "--no-mouse",
        ])
        .unwrap();
        assert_eq!(c.grid.initial_size(), 33);
        assert_eq!(c.tick, Duration::from_millis(10));
        assert_eq!(c.obstacle_density, 0.5);
        assert_eq!(c.seed, Some(9));
        assert!(!c.mouse);
    }

    #[test]
    fn oversize_grid_is_clamped_later() {
        let c = Config::from_args(["--size", "500"]).unwrap();
        assert_eq!(c.grid.initial_size(), 40);
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            Config::from_args(["--size"]),
            Err(ConfigError::MissingValue("--size".into()))
        );
        assert_eq!(
            Config::from_args(["--tick-ms", "soon"]),
            Err(ConfigError::InvalidValue {
                flag: "--tick-ms".into(),
                value: "soon".into()
            })
        );
        assert_eq!(
            Config::from_args(["--density", "1.5"]),
            Err(ConfigError::InvalidValue {
                flag: "--density".into(),
                value: "1.5".into()
            })
        );
        assert_eq!(
            Config::from_args(["--fast"]),
            Err(ConfigError::UnknownArgument("--fast".into()))
        );
        assert_eq!(Config::from_args(["-h"]), Err(ConfigError::HelpRequested));
    }

    #[test]
    fn builders() {
        let c = Config::default()
            .with_tick(Duration::ZERO)
            .with_mouse(false)
            .with_density(0.1)
            .with_seed(4)
            .with_grid(GridConfig::default().with_default_size(12));
        assert_eq!(c.tick, Duration::ZERO);
        assert!(!c.mouse);
        assert_eq!(c.obstacle_density, 0.1);
        assert_eq!(c.seed, Some(4));
        assert_eq!(c.grid.initial_size(), 12);
    }
}
