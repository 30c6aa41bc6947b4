use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The sign of a single regulation.
///
/// Persisted as a numeric code (`1` = positive, `0` = negative).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Interaction {
    Negative,
    Positive,
}

/// The function used by a node with several inputs to combine its (sign-adjusted) inputs.
///
/// Persisted as a numeric code (`1` = OR, `0` = AND).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Gate {
    And,
    Or,
}

impl Interaction {
    pub const ALL: [Interaction; 2] = [Interaction::Positive, Interaction::Negative];

    /// Transform the value of a regulator according to this interaction: positive
    /// regulation passes the value through, negative regulation inverts it.
    pub fn apply(self, value: bool) -> bool {
        match self {
            Interaction::Positive => value,
            Interaction::Negative => !value,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Interaction::Negative => 0,
            Interaction::Positive => 1,
        }
    }

    /// The arrow used in the textual network notation.
    pub fn arrow(self) -> &'static str {
        match self {
            Interaction::Positive => "->",
            Interaction::Negative => "-|",
        }
    }
}

impl Gate {
    pub const ALL: [Gate; 2] = [Gate::Or, Gate::And];

    /// Combine the given values: `OR` is the maximum, `AND` is the minimum.
    ///
    /// An empty input is the neutral element of the gate (`false` for `OR`, `true` for `AND`),
    /// but the simulator never evaluates gates without inputs.
    pub fn evaluate<I: IntoIterator<Item = bool>>(self, values: I) -> bool {
        let mut values = values.into_iter();
        match self {
            Gate::Or => values.any(|it| it),
            Gate::And => values.all(|it| it),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Gate::And => 0,
            Gate::Or => 1,
        }
    }
}

/// Check that an alphabet of values is non-empty and has no repeated entries.
///
/// Repeated entries would make the assigners produce the same network several times.
pub fn validate_alphabet<T: PartialEq + Display>(
    name: &'static str,
    alphabet: &[T],
) -> Result<(), ConfigurationError> {
    if alphabet.is_empty() {
        return Err(ConfigurationError::EmptyAlphabet(name));
    }
    for (i, value) in alphabet.iter().enumerate() {
        if alphabet[..i].contains(value) {
            return Err(ConfigurationError::DuplicateInAlphabet {
                alphabet: name,
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

impl From<Interaction> for u8 {
    fn from(value: Interaction) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for Interaction {
    type Error = ConfigurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Interaction::Negative),
            1 => Ok(Interaction::Positive),
            _ => Err(ConfigurationError::UnknownInteraction(value.to_string())),
        }
    }
}

impl From<Gate> for u8 {
    fn from(value: Gate) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for Gate {
    type Error = ConfigurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Gate::And),
            1 => Ok(Gate::Or),
            _ => Err(ConfigurationError::UnknownGate(value.to_string())),
        }
    }
}

impl FromStr for Interaction {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "+" | "positive" | "activation" => Ok(Interaction::Positive),
            "0" | "-" | "negative" | "inhibition" => Ok(Interaction::Negative),
            _ => Err(ConfigurationError::UnknownInteraction(s.to_string())),
        }
    }
}

impl FromStr for Gate {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "or" => Ok(Gate::Or),
            "0" | "and" => Ok(Gate::And),
            _ => Err(ConfigurationError::UnknownGate(s.to_string())),
        }
    }
}

impl Display for Interaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Interaction::Positive => write!(f, "positive"),
            Interaction::Negative => write!(f, "negative"),
        }
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Gate::Or => write!(f, "OR"),
            Gate::And => write!(f, "AND"),
        }
    }
}
