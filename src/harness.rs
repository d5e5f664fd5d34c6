//! Differential testing of `SplaySet` against `HashSet`.
//!
//! Each trial starts both sets empty and applies the same sequence of randomly chosen operations
//! with random values from `[0, domain)`. Every answer is compared, and so is the membership of
//! both sets after each step. The first mismatch ends the run.

use crate::simple_set::SimpleSet;
use crate::splay_tree::SplaySet;
use log::{debug, info, trace, LevelFilter};
use rand::Rng;
use std::collections::HashSet;
use std::error;
use std::fmt;
use std::num::ParseIntError;
use std::result;
use std::str::FromStr;

/// Environment variable holding the log level of the harness binary.
pub const LOG_LEVEL_VAR: &str = "SPLAY_SET_LOG";

#[derive(Debug)]
pub enum Error {
    MissingArgument(&'static str),
    InvalidArgument(&'static str, ParseIntError),
    EmptyDomain,
    InvalidLogLevel(String),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::InvalidArgument(_, error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingArgument(name) => write!(f, "missing argument `{}`", name),
            Error::InvalidArgument(name, error) => write!(f, "invalid argument `{}`: {}", name, error),
            Error::EmptyDomain => write!(f, "`domain` must be greater than zero"),
            Error::InvalidLogLevel(level) => write!(f, "invalid log level `{}`", level),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Parameters of a differential run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Number of times both sets are reset and driven from scratch.
    pub trials: usize,
    /// Number of operations per trial.
    pub operations: usize,
    /// Exclusive upper bound of the values operated on.
    pub domain: u32,
}

impl Config {
    /// Parses `<trials> <operations> <domain>` from command line arguments, excluding the program
    /// name. Arguments past the third are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::harness::Config;
    ///
    /// let config = Config::from_args(vec!["10", "100", "50"]).unwrap();
    /// assert_eq!(config.trials, 10);
    /// assert_eq!(config.operations, 100);
    /// assert_eq!(config.domain, 50);
    ///
    /// assert!(Config::from_args(vec!["10", "x", "50"]).is_err());
    /// ```
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let config = Config {
            trials: next_argument(&mut args, "trials")?,
            operations: next_argument(&mut args, "operations")?,
            domain: next_argument(&mut args, "domain")?,
        };
        if config.domain == 0 {
            return Err(Error::EmptyDomain);
        }
        Ok(config)
    }
}

fn next_argument<T, I, S>(args: &mut I, name: &'static str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let arg = args.next().ok_or(Error::MissingArgument(name))?;
    parse_argument(name, arg.as_ref())
}

fn parse_argument<T>(name: &'static str, arg: &str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    arg.trim().parse().map_err(|error| Error::InvalidArgument(name, error))
}

/// Parses a log level such as `info` or `trace`. `None` selects `info`.
pub fn parse_log_level(level: Option<&str>) -> Result<LevelFilter> {
    match level {
        None => Ok(LevelFilter::Info),
        Some(level) => LevelFilter::from_str(level.trim())
            .map_err(|_| Error::InvalidLogLevel(level.to_string())),
    }
}

/// A single step of a trial.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Size,
    Insert(u32),
    Remove(u32),
    Contains(u32),
}

impl Operation {
    /// Picks an operation uniformly at random, with a value uniform in `[0, domain)`.
    pub fn random<R>(rng: &mut R, domain: u32) -> Self
    where
        R: Rng,
    {
        let kind = rng.gen_range(0, 4);
        let value = rng.gen_range(0, domain);
        match kind {
            0 => Operation::Size,
            1 => Operation::Insert(value),
            2 => Operation::Remove(value),
            _ => Operation::Contains(value),
        }
    }

    /// Applies the operation to a set and returns its answer.
    pub fn apply<S>(self, set: &mut S) -> Answer
    where
        S: SimpleSet<u32>,
    {
        match self {
            Operation::Size => Answer::Size(set.len()),
            Operation::Insert(value) => Answer::Flag(set.insert(value)),
            Operation::Remove(value) => Answer::Flag(set.remove(&value)),
            Operation::Contains(value) => Answer::Flag(set.contains(&value)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::Size => write!(f, "size()"),
            Operation::Insert(value) => write!(f, "add({})", value),
            Operation::Remove(value) => write!(f, "remove({})", value),
            Operation::Contains(value) => write!(f, "contains({})", value),
        }
    }
}

/// The result of applying an `Operation`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Answer {
    Size(usize),
    Flag(bool),
}

/// How the splay set and the reference set disagreed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Mismatch {
    /// The operation returned different answers.
    Answer { expected: Answer, actual: Answer },
    /// The answers agreed but the sets hold different elements afterwards.
    Membership,
}

/// The first point where the splay set disagreed with the reference set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Divergence {
    pub trial: usize,
    pub step: usize,
    pub operation: Operation,
    pub mismatch: Mismatch,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: trial {}, operation {}", self.operation, self.trial, self.step)?;
        match &self.mismatch {
            Mismatch::Answer { expected, actual } => {
                write!(f, " (expected {:?}, got {:?})", expected, actual)
            },
            Mismatch::Membership => write!(f, " (membership differs)"),
        }
    }
}

/// Totals of a run without divergence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Report {
    pub trials: usize,
    pub operations: usize,
}

fn same_members(splay: &SplaySet<u32>, reference: &HashSet<u32>) -> bool {
    splay.len() == reference.len() && splay.iter().all(|value| reference.contains(value))
}

/// Runs every trial of `config`, stopping at the first divergence.
pub fn run<R>(config: &Config, rng: &mut R) -> result::Result<Report, Divergence>
where
    R: Rng,
{
    let mut report = Report {
        trials: 0,
        operations: 0,
    };
    for trial in 0..config.trials {
        info!("trial {} of {}", trial + 1, config.trials);
        let mut splay = SplaySet::new();
        let mut reference = HashSet::new();

        for step in 0..config.operations {
            let operation = Operation::random(rng, config.domain);
            debug!("operation: {}", operation);

            let actual = operation.apply(&mut splay);
            let expected = operation.apply(&mut reference);
            trace!("{}", splay);

            let mismatch = if actual != expected {
                Some(Mismatch::Answer { expected, actual })
            } else if !same_members(&splay, &reference) {
                Some(Mismatch::Membership)
            } else {
                None
            };
            if let Some(mismatch) = mismatch {
                return Err(Divergence {
                    trial,
                    step,
                    operation,
                    mismatch,
                });
            }
            report.operations += 1;
        }
        report.trials += 1;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::{parse_log_level, run, Answer, Config, Divergence, Error, Mismatch, Operation};
    use crate::splay_tree::SplaySet;
    use log::LevelFilter;
    use rand::{SeedableRng, XorShiftRng};
    use std::collections::HashSet;

    #[test]
    fn test_config_from_args() {
        let config = Config::from_args(vec!["3", " 20 ", "7", "ignored"]).unwrap();
        assert_eq!(
            config,
            Config {
                trials: 3,
                operations: 20,
                domain: 7,
            },
        );
    }

    #[test]
    fn test_config_missing_argument() {
        match Config::from_args(vec!["3", "20"]) {
            Err(Error::MissingArgument(name)) => assert_eq!(name, "domain"),
            other => panic!("expected a missing argument, got {:?}", other),
        }
    }

    #[test]
    fn test_config_invalid_argument() {
        match Config::from_args(vec!["3", "-1", "7"]) {
            Err(Error::InvalidArgument(name, _)) => assert_eq!(name, "operations"),
            other => panic!("expected an invalid argument, got {:?}", other),
        }
        match Config::from_args(vec!["3", "1", "99999999999"]) {
            Err(Error::InvalidArgument(name, _)) => assert_eq!(name, "domain"),
            other => panic!("expected an invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn test_config_empty_domain() {
        match Config::from_args(vec!["3", "20", "0"]) {
            Err(Error::EmptyDomain) => {},
            other => panic!("expected an empty domain, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level(None).unwrap(), LevelFilter::Info);
        assert_eq!(parse_log_level(Some("TRACE")).unwrap(), LevelFilter::Trace);
        assert_eq!(parse_log_level(Some("off")).unwrap(), LevelFilter::Off);
        assert!(parse_log_level(Some("loud")).is_err());
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Size.to_string(), "size()");
        assert_eq!(Operation::Insert(4).to_string(), "add(4)");
        assert_eq!(Operation::Remove(4).to_string(), "remove(4)");
        assert_eq!(Operation::Contains(4).to_string(), "contains(4)");
    }

    #[test]
    fn test_scenario() {
        let operations = [
            Operation::Insert(5),
            Operation::Insert(3),
            Operation::Insert(8),
            Operation::Contains(3),
            Operation::Remove(5),
            Operation::Contains(5),
            Operation::Size,
        ];
        let mut splay: SplaySet<u32> = SplaySet::new();
        let mut reference: HashSet<u32> = HashSet::new();
        let answers = operations
            .iter()
            .map(|operation| {
                let answer = operation.apply(&mut splay);
                assert_eq!(answer, operation.apply(&mut reference));
                answer
            })
            .collect::<Vec<Answer>>();
        assert_eq!(
            answers,
            vec![
                Answer::Flag(true),
                Answer::Flag(true),
                Answer::Flag(true),
                Answer::Flag(true),
                Answer::Flag(true),
                Answer::Flag(false),
                Answer::Size(2),
            ],
        );
    }

    #[test]
    fn test_run() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let config = Config {
            trials: 20,
            operations: 500,
            domain: 64,
        };
        let report = run(&config, &mut rng).unwrap();
        assert_eq!(report.trials, 20);
        assert_eq!(report.operations, 20 * 500);
    }

    #[test]
    fn test_run_empty() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let config = Config {
            trials: 0,
            operations: 10,
            domain: 1,
        };
        assert_eq!(run(&config, &mut rng).unwrap().operations, 0);
    }

    #[test]
    fn test_divergence_display() {
        let divergence = Divergence {
            trial: 2,
            step: 17,
            operation: Operation::Remove(9),
            mismatch: Mismatch::Answer {
                expected: Answer::Flag(true),
                actual: Answer::Flag(false),
            },
        };
        assert_eq!(
            divergence.to_string(),
            "remove(9): trial 2, operation 17 (expected Flag(true), got Flag(false))",
        );
    }
}
