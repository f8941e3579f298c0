//! Runtime configuration.
//!
//! Selects between message variants the surrounding engine's fixtures were
//! written against. Enum settings (not trait parameters) so a config is a
//! plain `Copy` value the `Context` can hand out freely.

/// Source-language version whose messages the runtime reproduces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CompatVersion {
    /// 3.4 spelling: "list indices must be integers, not <kind>".
    Py34,
    /// 3.5+ spelling: "list indices must be integers or slices, not <kind>".
    #[default]
    Py35,
}

impl CompatVersion {
    /// Parse a version string such as `"3.4"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "3.4" | "34" => Some(Self::Py34),
            "3.5" | "35" => Some(Self::Py35),
            _ => None,
        }
    }
}

/// How `sum()` reports failures raised while folding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SumErrorPolicy {
    /// Every failure becomes "bad operand type for sum(): 'NoneType'".
    #[default]
    Compat,
    /// Failures propagate unmodified.
    Precise,
}

impl SumErrorPolicy {
    /// Parse a policy name (`"compat"` or `"precise"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compat" => Some(Self::Compat),
            "precise" => Some(Self::Precise),
            _ => None,
        }
    }
}

/// Environment variable selecting `CompatVersion`.
pub const COMPAT_ENV: &str = "TARN_COMPAT";

/// Environment variable selecting `SumErrorPolicy`.
pub const SUM_ERRORS_ENV: &str = "TARN_SUM_ERRORS";

/// Runtime configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RuntimeConfig {
    /// Message variant selection.
    pub compat: CompatVersion,
    /// Error reporting for `sum()`.
    pub sum_errors: SumErrorPolicy,
}

impl RuntimeConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compatibility version.
    #[must_use]
    pub fn compat(mut self, compat: CompatVersion) -> Self {
        self.compat = compat;
        self
    }

    /// Set the `sum()` error policy.
    #[must_use]
    pub fn sum_errors(mut self, policy: SumErrorPolicy) -> Self {
        self.sum_errors = policy;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults; unrecognized values are logged
    /// and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(COMPAT_ENV) {
            match CompatVersion::parse(&raw) {
                Some(compat) => config.compat = compat,
                None => tracing::warn!(value = %raw, "ignoring unrecognized {COMPAT_ENV}"),
            }
        }
        if let Some(raw) = lookup(SUM_ERRORS_ENV) {
            match SumErrorPolicy::parse(&raw) {
                Some(policy) => config.sum_errors = policy,
                None => tracing::warn!(value = %raw, "ignoring unrecognized {SUM_ERRORS_ENV}"),
            }
        }
        config
    }
}
