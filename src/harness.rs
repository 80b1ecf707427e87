use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dialog::DIALOG_RESULT_QUERY;
use crate::host::{
    parse_channel_expr, ChannelExpr, CommandArg, HostError, HostValue, ItemChannels, ScriptingHost,
};
use crate::selector::{CacheFileSelector, DialogPolicy, SELECT_FILE_COMMAND};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostCall {
    Command { name: String, args: Vec<CommandArg> },
    Eval { expression: String },
}

// Stand-in for the application side of the scripting interface. Dialog
// behaviour is scripted up front, channel traffic hits a real channel store,
// and every call is recorded in order.
#[derive(Debug)]
pub struct ReplayHost {
    pub channels: ItemChannels,
    pub dialog_result: Option<String>,
    pub fail_command: Option<String>,
    pub calls: Vec<HostCall>,
    pub log_lines: Vec<String>,
    dialog_ready: bool,
    dialog_confirmed: bool,
}

impl ReplayHost {
    pub fn new() -> Self {
        Self {
            channels: ItemChannels::partio_item(),
            dialog_result: None,
            fail_command: None,
            calls: Vec::new(),
            log_lines: Vec::new(),
            dialog_ready: false,
            dialog_confirmed: false,
        }
    }

    pub fn picking(path: impl Into<String>) -> Self {
        let mut host = Self::new();
        host.dialog_result = Some(path.into());
        host
    }

    pub fn command_count(&self, name: &str) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::Command { name: called, .. } if called == name))
            .count()
    }

    pub fn eval_expressions(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Eval { expression } => Some(expression.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for ReplayHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptingHost for ReplayHost {
    fn run_command(&mut self, command: &str, args: &[CommandArg]) -> Result<(), HostError> {
        self.calls.push(HostCall::Command { name: command.to_string(), args: args.to_vec() });
        if self.fail_command.as_deref() == Some(command) {
            return Err(HostError::Dialog(format!("scripted failure in {command}")));
        }
        match command {
            "dialog.setup" => {
                self.dialog_ready = true;
                Ok(())
            }
            "dialog.title" | "dialog.fileTypeCustom" => Ok(()),
            "dialog.open" => {
                if !self.dialog_ready {
                    return Err(HostError::Dialog("dialog.open before dialog.setup".to_string()));
                }
                // no scripted pick means the user dismissed the dialog
                if self.dialog_result.is_some() {
                    self.dialog_confirmed = true;
                    Ok(())
                } else {
                    Err(HostError::Cancelled)
                }
            }
            other => Err(HostError::UnknownCommand(other.to_string())),
        }
    }

    fn eval(&mut self, expression: &str) -> Result<HostValue, HostError> {
        self.calls.push(HostCall::Eval { expression: expression.to_string() });
        if expression == DIALOG_RESULT_QUERY {
            return match (&self.dialog_result, self.dialog_confirmed) {
                (Some(path), true) => Ok(HostValue::Str(path.clone())),
                _ => Err(HostError::Dialog("dialog.result without a confirmed dialog".to_string())),
            };
        }
        match parse_channel_expr(expression)? {
            ChannelExpr::Query(name) => self.channels.read(&name).cloned(),
            ChannelExpr::Assign(name, value) => {
                self.channels.write(&name, value.clone())?;
                Ok(value)
            }
        }
    }

    fn log(&mut self, message: &str) {
        self.log_lines.push(message.to_string());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarnessFixture {
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default)]
    pub dialog_result: Option<String>,
    #[serde(default)]
    pub channels: BTreeMap<String, HostValue>,
    // absent means the kit-level policy applies
    #[serde(default)]
    pub dialog_policy: Option<DialogPolicy>,
    #[serde(default)]
    pub fail_command: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarnessReport {
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_path: Option<String>,
    pub calls: Vec<HostCall>,
    pub log_lines: Vec<String>,
    pub channels: ItemChannels,
}

pub fn run_fixture(fixture: &HarnessFixture) -> HarnessReport {
    run_fixture_with(fixture, DialogPolicy::default())
}

pub fn run_fixture_with(fixture: &HarnessFixture, kit_policy: DialogPolicy) -> HarnessReport {
    let mut host = ReplayHost::new();
    host.dialog_result = fixture.dialog_result.clone();
    host.fail_command = fixture.fail_command.clone();
    for (name, value) in &fixture.channels {
        host.channels.define(name.clone(), value.clone());
    }
    let selector = CacheFileSelector::new(fixture.dialog_policy.unwrap_or(kit_policy));
    let outcome = selector.run(&mut host, &fixture.args);
    HarnessReport {
        outcome: outcome.label().to_string(),
        selected_path: outcome.selected_path().map(|path| path.to_string_lossy().into_owned()),
        calls: host.calls,
        log_lines: host.log_lines,
        channels: host.channels,
    }
}

pub fn load_fixture<P: AsRef<Path>>(path: P) -> Result<HarnessFixture> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("opening fixture '{}'", path.as_ref().display()))?;
    serde_json::from_reader(file).context("parsing fixture JSON")
}

fn default_args() -> Vec<String> {
    vec![SELECT_FILE_COMMAND.to_string()]
}
