//! Run configuration: defaults, optional TOML run file, command-line overrides
//!
//! Precedence is flags > run file > defaults. Operands are parsed straight into
//! `i8`, so an out-of-range value is rejected here and never reaches the adder.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use verified::{GuardPolicy, Narrowing};

/// Accumulator used when nothing overrides it.
pub const DEFAULT_A: i8 = 127;
/// Increment used when nothing overrides it.
pub const DEFAULT_ADD: i8 = 1;

/// Guard policy as named on the command line and in run files
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyArg {
    /// Guard positive overflow only
    PositiveOnly,
    /// Also guard negative overflow (changes behaviour for sums below -128)
    Symmetric,
}

impl From<PolicyArg> for GuardPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::PositiveOnly => GuardPolicy::PositiveOnly,
            PolicyArg::Symmetric => GuardPolicy::Symmetric,
        }
    }
}

/// Narrowing rule as named on the command line and in run files
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NarrowingArg {
    /// Keep the low 8 bits
    Wrapping,
    /// Clamp to [-128, 127]
    Saturating,
}

impl From<NarrowingArg> for Narrowing {
    fn from(arg: NarrowingArg) -> Self {
        match arg {
            NarrowingArg::Wrapping => Narrowing::Wrapping,
            NarrowingArg::Saturating => Narrowing::Saturating,
        }
    }
}

/// Contents of a run file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunFile {
    pub a: Option<i8>,
    pub add: Option<i8>,
    pub policy: Option<PolicyArg>,
    pub narrowing: Option<NarrowingArg>,
}

impl RunFile {
    /// Parse a run file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read run file: {}", path.display()))?;

        Self::parse_content(&content)
            .with_context(|| format!("Invalid run file: {}", path.display()))
    }

    /// Parse run file content
    pub fn parse_content(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Fully resolved inputs for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub a: i8,
    pub add: i8,
    pub policy: GuardPolicy,
    pub narrowing: Narrowing,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            a: DEFAULT_A,
            add: DEFAULT_ADD,
            policy: GuardPolicy::default(),
            narrowing: Narrowing::default(),
        }
    }
}

/// Values given on the command line, if any
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub a: Option<i8>,
    pub add: Option<i8>,
    pub policy: Option<PolicyArg>,
    pub narrowing: Option<NarrowingArg>,
}

impl RunConfig {
    /// Layer a run file over the defaults
    pub fn with_file(self, file: RunFile) -> Self {
        self.with_overrides(Overrides {
            a: file.a,
            add: file.add,
            policy: file.policy,
            narrowing: file.narrowing,
        })
    }

    /// Layer explicit values over the current ones
    pub fn with_overrides(self, overrides: Overrides) -> Self {
        Self {
            a: overrides.a.unwrap_or(self.a),
            add: overrides.add.unwrap_or(self.add),
            policy: overrides.policy.map(Into::into).unwrap_or(self.policy),
            narrowing: overrides.narrowing.map(Into::into).unwrap_or(self.narrowing),
        }
    }

    /// Defaults, then the run file at `path` (if given), then `overrides`
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path {
            log::debug!("Loading run file {}", path.display());
            config = config.with_file(RunFile::load(path)?);
        }
        Ok(config.with_overrides(overrides))
    }
}
