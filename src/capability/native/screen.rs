use crate::capability::native::{OsFamily, Tool};
use crate::capability::{CapResult, ScreenCapture};
use std::path::Path;

/// Screenshot programs, in probe order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grabber {
    MacScreencapture,
    GnomeScreenshot,
    Scrot,
    ImageMagick,
}

impl Grabber {
    fn program(&self) -> &'static str {
        match self {
            Grabber::MacScreencapture => "screencapture",
            Grabber::GnomeScreenshot => "gnome-screenshot",
            Grabber::Scrot => "scrot",
            Grabber::ImageMagick => "import",
        }
    }
}

/// Full-screen capture through whichever grabber is installed
pub struct ToolScreenCapture {
    grabber: Grabber,
    tool: Tool,
}

impl ToolScreenCapture {
    pub fn detect(os: OsFamily) -> Option<Self> {
        let candidates: &[Grabber] = match os {
            OsFamily::MacOs => &[Grabber::MacScreencapture],
            OsFamily::Linux | OsFamily::Other => {
                &[Grabber::GnomeScreenshot, Grabber::Scrot, Grabber::ImageMagick]
            }
            OsFamily::Windows => &[],
        };
        candidates.iter().find_map(|grabber| {
            Tool::find(grabber.program()).map(|tool| Self {
                grabber: *grabber,
                tool,
            })
        })
    }
}

impl ScreenCapture for ToolScreenCapture {
    fn capture(&self, path: &Path) -> CapResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let target = path.as_os_str();
        match self.grabber {
            Grabber::MacScreencapture => self.tool.run([std::ffi::OsStr::new("-x"), target])?,
            Grabber::GnomeScreenshot => self.tool.run([std::ffi::OsStr::new("-f"), target])?,
            Grabber::Scrot => self.tool.run([target])?,
            Grabber::ImageMagick => self.tool.run([
                std::ffi::OsStr::new("-window"),
                std::ffi::OsStr::new("root"),
                target,
            ])?,
        };
        tracing::info!("Screenshot written to {}", path.display());
        Ok(())
    }
}
