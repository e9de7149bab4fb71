//! Power state transitions through the platform's own tools

use crate::capability::native::{OsFamily, Tool};
use crate::capability::{CapResult, CapabilityError, PowerController};
use crate::core::types::PowerAction;
use std::time::Duration;

const CAPABILITY: &str = "PowerController";

pub struct ShellPower {
    os: OsFamily,
    shutdown: Tool,
}

impl ShellPower {
    /// Requires the `shutdown` program; everything else is looked up per call
    pub fn detect(os: OsFamily) -> Option<Self> {
        Tool::find("shutdown").map(|shutdown| Self { os, shutdown })
    }

    fn required(name: &'static str) -> CapResult<Tool> {
        Tool::find(name)
            .ok_or_else(|| CapabilityError::unavailable(CAPABILITY, format!("{} not found", name)))
    }
}

/// `shutdown` on Unix schedules in whole minutes
fn unix_delay(delay: Duration) -> String {
    let minutes = delay.as_secs().div_ceil(60);
    if minutes == 0 {
        "now".to_string()
    } else {
        format!("+{}", minutes)
    }
}

impl PowerController for ShellPower {
    fn sleep(&self) -> CapResult<()> {
        match self.os {
            OsFamily::Windows => {
                Self::required("rundll32")?.run(["powrprof.dll,SetSuspendState", "0,1,0"])?;
            }
            OsFamily::MacOs => {
                Self::required("pmset")?.run(["sleepnow"])?;
            }
            OsFamily::Linux => {
                Self::required("systemctl")?.run(["suspend"])?;
            }
            OsFamily::Other => {
                return Err(CapabilityError::unavailable(
                    CAPABILITY,
                    format!("sleep is not supported on {}", self.os.name()),
                ))
            }
        }
        Ok(())
    }

    fn lock(&self) -> CapResult<()> {
        match self.os {
            OsFamily::Windows => {
                Self::required("rundll32")?.run(["user32.dll,LockWorkStation"])?;
            }
            OsFamily::MacOs => {
                Self::required("pmset")?.run(["displaysleepnow"])?;
            }
            OsFamily::Linux => {
                Self::required("loginctl")?.run(["lock-session"])?;
            }
            OsFamily::Other => {
                return Err(CapabilityError::unavailable(
                    CAPABILITY,
                    format!("lock is not supported on {}", self.os.name()),
                ))
            }
        }
        Ok(())
    }

    fn schedule(&self, action: PowerAction, delay: Duration) -> CapResult<()> {
        tracing::warn!("Scheduling {:?} in {}s", action, delay.as_secs());
        match self.os {
            OsFamily::Windows => {
                let (flag, reason) = match action {
                    PowerAction::Restart => ("/r", "Jarvis restarting system as requested"),
                    PowerAction::Shutdown => ("/s", "Jarvis shutting down system as requested"),
                };
                let secs = delay.as_secs().to_string();
                self.shutdown.run([flag, "/t", secs.as_str(), "/c", reason])?;
            }
            _ => {
                let flag = match action {
                    PowerAction::Restart => "-r",
                    PowerAction::Shutdown => "-h",
                };
                let when = unix_delay(delay);
                self.shutdown.run([flag, when.as_str()])?;
            }
        }
        Ok(())
    }

    fn abort(&self) -> CapResult<()> {
        match self.os {
            OsFamily::Windows => self.shutdown.run(["/a"])?,
            _ => self.shutdown.run(["-c"])?,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_delay_rounds_up_to_minutes() {
        assert_eq!(unix_delay(Duration::from_secs(0)), "now");
        assert_eq!(unix_delay(Duration::from_secs(10)), "+1");
        assert_eq!(unix_delay(Duration::from_secs(60)), "+1");
        assert_eq!(unix_delay(Duration::from_secs(61)), "+2");
    }
}
