use crate::capability::{CapResult, CapabilityError, ClipboardProvider};

const CAPABILITY: &str = "ClipboardProvider";

/// System clipboard through `arboard`
///
/// A handle is opened per call. On X11 copied text outlives the handle only
/// when a clipboard manager is running.
pub struct ArboardClipboard;

impl ArboardClipboard {
    /// Fails when no clipboard can be opened (e.g. no display server)
    pub fn open() -> CapResult<Self> {
        arboard::Clipboard::new()
            .map(|_| ArboardClipboard)
            .map_err(|e| CapabilityError::unavailable(CAPABILITY, e.to_string()))
    }

    fn with<T>(
        &self,
        f: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> CapResult<T> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| CapabilityError::unavailable(CAPABILITY, e.to_string()))?;
        f(&mut clipboard).map_err(|e| match e {
            arboard::Error::ContentNotAvailable => {
                CapabilityError::NotFound("text on the clipboard".into())
            }
            arboard::Error::ClipboardNotSupported => {
                CapabilityError::unavailable(CAPABILITY, e.to_string())
            }
            other => CapabilityError::Failed(other.to_string()),
        })
    }
}

impl ClipboardProvider for ArboardClipboard {
    fn read_text(&self) -> CapResult<String> {
        self.with(|clipboard| clipboard.get_text())
    }

    fn write_text(&self, text: &str) -> CapResult<()> {
        self.with(|clipboard| clipboard.set_text(text))
    }
}
