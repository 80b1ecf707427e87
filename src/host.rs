use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CACHE_FILE_CHANNEL: &str = "cacheFileName";
pub const PADDING_CHANNEL: &str = "padding";
pub const FRAME_CHANNEL: &str = "frame";
pub const MODE_CHANNEL: &str = "partioMode";

// Unset cache items carry the wildcard placeholder, not an empty string.
pub const DEFAULT_CACHE_FILE_VALUE: &str = "*.*";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostValue {
    Integer(i64),
    Float(f64),
    Str(String),
}

impl HostValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            HostValue::Integer(value) => Some(*value),
            HostValue::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            HostValue::Integer(value) => Some(*value as f64),
            HostValue::Float(value) => Some(*value),
            HostValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("dialog cancelled")]
    Cancelled,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown channel '{0}'")]
    UnknownChannel(String),
    #[error("malformed expression '{0}'")]
    Expression(String),
    #[error("dialog error: {0}")]
    Dialog(String),
}

impl HostError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HostError::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandArg {
    pub name: String,
    pub value: String,
}

impl CommandArg {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

pub trait ScriptingHost {
    fn run_command(&mut self, command: &str, args: &[CommandArg]) -> Result<(), HostError>;
    fn eval(&mut self, expression: &str) -> Result<HostValue, HostError>;
    fn log(&mut self, message: &str);
}

pub fn channel_query(channel: &str) -> String {
    format!("item.channel {channel} ?")
}

pub fn channel_assignment(channel: &str, value: &str) -> String {
    format!("item.channel {channel} {value}")
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelExpr {
    Query(String),
    Assign(String, HostValue),
}

pub fn parse_channel_expr(expression: &str) -> Result<ChannelExpr, HostError> {
    let malformed = || HostError::Expression(expression.to_string());
    let rest = expression.strip_prefix("item.channel ").ok_or_else(malformed)?;
    let rest = rest.trim_start();
    let Some((channel, literal)) = rest.split_once(' ') else {
        return Err(malformed());
    };
    let literal = literal.trim();
    if channel.is_empty() || literal.is_empty() {
        return Err(malformed());
    }
    if literal == "?" {
        return Ok(ChannelExpr::Query(channel.to_string()));
    }
    Ok(ChannelExpr::Assign(channel.to_string(), parse_literal(literal).ok_or_else(malformed)?))
}

fn parse_literal(literal: &str) -> Option<HostValue> {
    if let Some(inner) = literal.strip_prefix('"') {
        let inner = inner.strip_suffix('"')?;
        return Some(HostValue::Str(inner.to_string()));
    }
    if let Ok(value) = literal.parse::<i64>() {
        return Some(HostValue::Integer(value));
    }
    if let Ok(value) = literal.parse::<f64>() {
        return Some(HostValue::Float(value));
    }
    // bare single token, the evaluator accepts it as a string
    if literal.contains(char::is_whitespace) {
        None
    } else {
        Some(HostValue::Str(literal.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemChannels {
    values: BTreeMap<String, HostValue>,
}

impl ItemChannels {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn partio_item() -> Self {
        let mut channels = Self::default();
        channels.define(CACHE_FILE_CHANNEL, HostValue::Str(DEFAULT_CACHE_FILE_VALUE.to_string()));
        channels.define(PADDING_CHANNEL, HostValue::Integer(0));
        channels.define(FRAME_CHANNEL, HostValue::Integer(0));
        channels.define(MODE_CHANNEL, HostValue::Integer(0));
        channels
    }

    pub fn define(&mut self, name: impl Into<String>, value: HostValue) {
        self.values.insert(name.into(), value);
    }

    pub fn read(&self, name: &str) -> Result<&HostValue, HostError> {
        self.values.get(name).ok_or_else(|| HostError::UnknownChannel(name.to_string()))
    }

    // Assignment requires the channel to exist; items do not grow channels on write.
    pub fn write(&mut self, name: &str, value: HostValue) -> Result<(), HostError> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(HostError::UnknownChannel(name.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&HostValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HostValue)> {
        self.values.iter()
    }
}
