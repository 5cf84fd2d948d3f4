//! uiset Command Grammar
//!
//! The remote harness accepts single-line text commands of the form:
//!
//! ```text
//! uiset --object=<path> [--value=<v>] [--wait_condition="<type>;<args...>"]
//! ```
//!
//! Commands are sent as one write with no terminator or length prefix.
//! The harness answers every command with two payloads: an acknowledgment
//! followed by the final result.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;

use crate::error::{DriverError, Result};

/// Command verb understood by the harness
pub const VERB: &str = "uiset";

/// Object path of the live mode button
pub const LIVE_BUTTON: &str = "livebutton";

/// Object path of the main menu
pub const MAIN_MENU: &str = "mainmenu";

/// Menu entry that resets all views
pub const RESET_VIEWS_ACTION: &str = "UI|Reset Views";

/// Signal emitted by a view once it finished loading data
pub const DATA_LOADED_SIGNAL: &str = "dataLoaded";

/// Upper bound (exclusive) for slider values
pub const SLIDER_MAX: u32 = 100;

/// Condition the harness waits for before reporting the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitCondition {
    /// Wait a fixed amount of time
    Delay(Duration),
    /// Wait until `object` emits `signal`, or give up after `timeout`
    Signal {
        object: String,
        signal: String,
        timeout: Duration,
    },
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitCondition::Delay(delay) => write!(f, "delay;{}", delay.as_millis()),
            WaitCondition::Signal { object, signal, timeout } => {
                write!(f, "signal;{};{};{}", object, signal, timeout.as_millis())
            }
        }
    }
}

/// Value argument of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandValue {
    /// Rendered bare, e.g. `--value=42`
    Int(u32),
    /// Rendered in double quotes, e.g. `--value="UI|Reset Views"`
    Text(String),
}

impl fmt::Display for CommandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandValue::Int(v) => write!(f, "{}", v),
            CommandValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// A single uiset command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiCommand {
    /// Target widget path
    pub object: String,
    pub value: Option<CommandValue>,
    pub wait_condition: Option<WaitCondition>,
}

impl UiCommand {
    /// Create a command addressing `object` with no arguments
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            value: None,
            wait_condition: None,
        }
    }

    pub fn with_value(mut self, value: CommandValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_wait_condition(mut self, condition: WaitCondition) -> Self {
        self.wait_condition = Some(condition);
        self
    }

    /// Set the time filter slider of `view` to `value`
    pub fn slider_set(view: &str, value: u32, wait: Duration) -> Self {
        Self::new(format!("{}.timefilter.slider", view))
            .with_value(CommandValue::Int(value))
            .with_wait_condition(WaitCondition::Delay(wait))
    }

    /// Press the live button and wait for `view` to report loaded data
    pub fn live_toggle(view: &str, timeout: Duration) -> Self {
        Self::new(LIVE_BUTTON).with_wait_condition(WaitCondition::Signal {
            object: view.to_string(),
            signal: DATA_LOADED_SIGNAL.to_string(),
            timeout,
        })
    }

    /// Trigger the "Reset Views" main menu action
    pub fn reset_views() -> Self {
        Self::new(MAIN_MENU).with_value(CommandValue::Text(RESET_VIEWS_ACTION.to_string()))
    }

    /// Check the command can be sent as a single unframed line
    pub fn validate(&self) -> Result<()> {
        if self.object.is_empty() {
            return Err(DriverError::InvalidCommand("empty object path".to_string()));
        }
        let text = self.to_string();
        if text.contains('\n') || text.contains('\r') {
            return Err(DriverError::InvalidCommand(
                format!("line break in command: {:?}", text)
            ));
        }
        Ok(())
    }

    /// Serialize to the bytes written on the socket
    pub fn encode(&self) -> Result<Bytes> {
        self.validate()?;
        Ok(Bytes::from(self.to_string()))
    }
}

impl fmt::Display for UiCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --object={}", VERB, self.object)?;
        if let Some(value) = &self.value {
            write!(f, " --value={}", value)?;
        }
        if let Some(condition) = &self.wait_condition {
            write!(f, " --wait_condition=\"{}\"", condition)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_command_format() {
        let cmd = UiCommand::slider_set("ScatterPlotView0", 42, Duration::from_secs(30));
        assert_eq!(
            cmd.to_string(),
            "uiset --object=ScatterPlotView0.timefilter.slider --value=42 --wait_condition=\"delay;30000\""
        );
    }

    #[test]
    fn test_slider_value_appears_verbatim() {
        for value in 0..SLIDER_MAX {
            let text = UiCommand::slider_set("v", value, Duration::from_secs(30)).to_string();
            assert!(text.contains(&format!("--value={} ", value)));
        }
    }

    #[test]
    fn test_live_toggle_format() {
        let cmd = UiCommand::live_toggle("ScatterPlotView0", Duration::from_secs(10));
        assert_eq!(
            cmd.to_string(),
            "uiset --object=livebutton --wait_condition=\"signal;ScatterPlotView0;dataLoaded;10000\""
        );
    }

    #[test]
    fn test_reset_views_format() {
        assert_eq!(
            UiCommand::reset_views().to_string(),
            "uiset --object=mainmenu --value=\"UI|Reset Views\""
        );
    }

    #[test]
    fn test_sub_second_delay_in_millis() {
        let cond = WaitCondition::Delay(Duration::from_millis(250));
        assert_eq!(cond.to_string(), "delay;250");
    }

    #[test]
    fn test_encode_rejects_line_breaks() {
        let cmd = UiCommand::new("main\nmenu");
        assert!(matches!(cmd.encode(), Err(DriverError::InvalidCommand(_))));

        let cmd = UiCommand::new("");
        assert!(matches!(cmd.encode(), Err(DriverError::InvalidCommand(_))));
    }

    #[test]
    fn test_encode_bytes() {
        let bytes = UiCommand::reset_views().encode().unwrap();
        assert_eq!(&bytes[..], b"uiset --object=mainmenu --value=\"UI|Reset Views\"");
    }
}
