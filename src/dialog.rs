use std::path::PathBuf;

use crate::formats::{cache_formats, FormatFilter};
use crate::host::{CommandArg, HostError, HostValue, ScriptingHost};

pub const DIALOG_TITLE: &str = "Select Cache File";
pub const DIALOG_RESULT_QUERY: &str = "dialog.result ?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogStyle {
    FileOpen,
    FileSave,
}

impl DialogStyle {
    pub fn setup_value(self) -> &'static str {
        match self {
            DialogStyle::FileOpen => "fileOpen",
            DialogStyle::FileSave => "fileSave",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileDialogSpec {
    pub style: DialogStyle,
    pub title: String,
    pub filters: Vec<FormatFilter>,
}

impl FileDialogSpec {
    pub fn cache_file(style: DialogStyle) -> Self {
        Self {
            style,
            title: DIALOG_TITLE.to_string(),
            filters: cache_formats().to_vec(),
        }
    }

    // Issues the fixed setup sequence, then blocks in the host until the user
    // confirms a file or dismisses the dialog. The picked path comes back raw,
    // normalization is the caller's job.
    pub fn present(&self, host: &mut dyn ScriptingHost) -> Result<PathBuf, HostError> {
        host.run_command("dialog.setup", &[CommandArg::new("style", self.style.setup_value())])?;
        host.run_command("dialog.title", &[CommandArg::new("title", self.title.as_str())])?;
        for filter in &self.filters {
            host.run_command(
                "dialog.fileTypeCustom",
                &[
                    CommandArg::new("format", filter.format),
                    CommandArg::new("username", filter.username),
                    CommandArg::new("loadPattern", filter.load_pattern),
                    CommandArg::new("saveExtension", filter.save_extension),
                ],
            )?;
        }
        host.run_command("dialog.open", &[])?;
        match host.eval(DIALOG_RESULT_QUERY)? {
            HostValue::Str(path) => Ok(PathBuf::from(path)),
            other => Err(HostError::Dialog(format!("dialog.result returned {other:?}"))),
        }
    }
}
