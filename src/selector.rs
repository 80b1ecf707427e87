use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dialog::{DialogStyle, FileDialogSpec};
use crate::host::{
    channel_assignment, channel_query, HostError, ScriptingHost, CACHE_FILE_CHANNEL, MODE_CHANNEL,
};

pub const SELECT_FILE_COMMAND: &str = "SelectFile";

// partioMode value that flips the picker into save mode.
pub const SAVE_MODE: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogPolicy {
    #[default]
    FollowModeChannel,
    AlwaysSave,
}

#[derive(Debug)]
pub enum SelectorOutcome {
    Ignored,
    Selected(PathBuf),
    Cancelled,
    Failed(HostError),
}

impl SelectorOutcome {
    pub fn selected_path(&self) -> Option<&Path> {
        match self {
            SelectorOutcome::Selected(path) => Some(path),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SelectorOutcome::Ignored => "ignored",
            SelectorOutcome::Selected(_) => "selected",
            SelectorOutcome::Cancelled => "cancelled",
            SelectorOutcome::Failed(_) => "failed",
        }
    }
}

pub fn double_quote(text: &str) -> String {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return text.to_string();
    }
    format!("\"{text}\"")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CacheFileSelector {
    policy: DialogPolicy,
}

impl CacheFileSelector {
    pub fn new(policy: DialogPolicy) -> Self {
        Self { policy }
    }

    fn dialog_style(&self, host: &mut dyn ScriptingHost) -> Result<DialogStyle, HostError> {
        match self.policy {
            DialogPolicy::AlwaysSave => Ok(DialogStyle::FileSave),
            DialogPolicy::FollowModeChannel => {
                let mode = host.eval(&channel_query(MODE_CHANNEL))?;
                if mode.as_int() == Some(SAVE_MODE) {
                    Ok(DialogStyle::FileSave)
                } else {
                    Ok(DialogStyle::FileOpen)
                }
            }
        }
    }

    pub fn select_file(&self, host: &mut dyn ScriptingHost) -> Result<PathBuf, HostError> {
        let style = self.dialog_style(host)?;
        let picked = FileDialogSpec::cache_file(style).present(host)?;
        std::path::absolute(&picked).map_err(|err| {
            HostError::Dialog(format!("cannot absolutize '{}': {err}", picked.display()))
        })
    }

    fn select_and_store(&self, host: &mut dyn ScriptingHost) -> Result<PathBuf, HostError> {
        let path = self.select_file(host)?;
        let quoted = double_quote(&path.to_string_lossy());
        host.eval(&channel_assignment(CACHE_FILE_CHANNEL, &quoted))?;
        Ok(path)
    }

    // Command entry point. Everything thrown past this frame comes out as a
    // log entry instead of an abort in the host, and a cancel never touches
    // the item.
    pub fn run(&self, host: &mut dyn ScriptingHost, args: &[String]) -> SelectorOutcome {
        let Some(command) = args.first() else {
            return SelectorOutcome::Ignored;
        };
        if command.as_str() != SELECT_FILE_COMMAND {
            return SelectorOutcome::Ignored;
        }
        match self.select_and_store(host) {
            Ok(path) => SelectorOutcome::Selected(path),
            Err(err) if err.is_cancelled() => {
                host.log("partio.select: cancelled, cacheFileName left untouched");
                SelectorOutcome::Cancelled
            }
            Err(err) => {
                host.log(&format!("partio.select: {err}"));
                SelectorOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_quote_wraps_plain_paths() {
        assert_eq!(double_quote("/caches/burst.bin"), "\"/caches/burst.bin\"");
        assert_eq!(double_quote("/my caches/burst.bin"), "\"/my caches/burst.bin\"");
        assert_eq!(double_quote(""), "\"\"");
    }

    #[test]
    fn double_quote_leaves_quoted_paths_alone() {
        assert_eq!(double_quote("\"/caches/burst.bin\""), "\"/caches/burst.bin\"");
        assert_eq!(double_quote("\""), "\"\"\"");
    }

    #[test]
    fn policy_defaults_to_the_mode_channel() {
        assert_eq!(DialogPolicy::default(), DialogPolicy::FollowModeChannel);
    }

    #[test]
    fn policy_names_match_the_config_spelling() {
        let json = serde_json::to_string(&DialogPolicy::AlwaysSave).expect("serialize");
        assert_eq!(json, "\"always_save\"");
        let parsed: DialogPolicy = serde_json::from_str("\"follow_mode_channel\"").expect("deserialize");
        assert_eq!(parsed, DialogPolicy::FollowModeChannel);
    }

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(SelectorOutcome::Ignored.label(), "ignored");
        assert_eq!(SelectorOutcome::Cancelled.label(), "cancelled");
        assert_eq!(SelectorOutcome::Selected(PathBuf::from("/a")).label(), "selected");
        assert_eq!(SelectorOutcome::Failed(HostError::Cancelled).label(), "failed");
    }
}
