//! Identification of the window which synthesized input is addressed to.

use ::std::fmt;
use ::tracing::{debug, warn};

use crate::{errors::*, platform::WindowLocator, types::*};

/// Describes a top-level window by any combination of handle, owning process
/// and title.
///
/// Resolution tries the handle first, then the process id, then the process
/// name, then the title. The empty target resolves to nothing, or to the
/// foreground window when the caller allows that fallback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WindowTarget {
    pub handle: Option<WindowHandle>,
    pub process_id: Option<u32>,
    pub process_name: Option<String>,
    pub title: Option<String>,
}

impl WindowTarget {
    /// A target which names nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// A target for a known window handle.
    pub fn handle(handle: WindowHandle) -> Self {
        Self {
            handle: Some(handle),
            ..Default::default()
        }
    }

    /// A target for the main window of process `pid`.
    pub fn process_id(pid: u32) -> Self {
        Self {
            process_id: Some(pid),
            ..Default::default()
        }
    }

    /// A target for the main window of the first process named `name`, for
    /// example `notepad` or `notepad.exe`.
    pub fn process_name(name: impl Into<String>) -> Self {
        Self {
            process_name: Some(name.into()),
            ..Default::default()
        }
    }

    /// A target for the top-level window titled exactly `title`.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Returns `true` if the target names nothing.
    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
            && self.process_id.is_none()
            && non_blank(&self.process_name).is_none()
            && non_blank(&self.title).is_none()
    }

    /// Resolves the target to a window handle, without any fallback.
    pub fn find<L>(&self, locator: &L) -> Option<WindowHandle>
    where
        L: WindowLocator + ?Sized,
    {
        if let Some(handle) = self.handle {
            return Some(handle);
        }

        if let Some(handle) = self
            .process_id
            .filter(|pid| *pid != 0)
            .and_then(|pid| locator.window_for_process(pid))
        {
            return Some(handle);
        }

        if let Some(handle) = non_blank(&self.process_name).and_then(|name| {
            locator
                .processes_by_name(name)
                .into_iter()
                .find_map(|pid| locator.window_for_process(pid))
        }) {
            return Some(handle);
        }

        non_blank(&self.title).and_then(|title| locator.find_window_by_title(title))
    }

    /// Resolves the target to a window handle, falling back to the foreground
    /// window if `foreground_fallback` is set.
    ///
    /// Fails with [`ErrorKind::TargetNotFound`] when nothing resolves.
    pub fn resolve<L>(&self, locator: &L, foreground_fallback: bool) -> Result<WindowHandle>
    where
        L: WindowLocator + ?Sized,
    {
        let found = self.find(locator).or_else(|| {
            foreground_fallback
                .then(|| locator.foreground_window())
                .flatten()
        });

        match found {
            Some(handle) => {
                debug!(target = %self, %handle, "Resolved window target");
                Ok(handle)
            }
            None => Err(Error::target_not_found(self.to_string())),
        }
    }
}

impl fmt::Display for WindowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(handle) = self.handle {
            parts.push(format!("handle {handle}"));
        }
        if let Some(pid) = self.process_id {
            parts.push(format!("pid {pid}"));
        }
        if let Some(name) = &self.process_name {
            parts.push(format!("process {name:?}"));
        }
        if let Some(title) = &self.title {
            parts.push(format!("title {title:?}"));
        }

        if parts.is_empty() {
            f.write_str("<none>")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

impl From<WindowHandle> for WindowTarget {
    fn from(handle: WindowHandle) -> Self {
        Self::handle(handle)
    }
}

/// Optionally shows `window`, then brings it to the foreground.
pub fn bring_to_front<L>(locator: &L, window: WindowHandle, show: bool) -> Result<()>
where
    L: WindowLocator + ?Sized,
{
    if show {
        if let Err(err) = locator.show(window) {
            warn!(%window, %err, "Failed to show window");
        }
    }

    locator
        .set_foreground(window)
        .context(format!("Failed to bring window {window} to the foreground"))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FakeWindow, RecordingPlatform};

    use ::pretty_assertions::assert_eq;

    fn handle(raw: isize) -> WindowHandle {
        WindowHandle::new(raw).unwrap()
    }

    fn platform() -> RecordingPlatform {
        let platform = RecordingPlatform::new();
        platform.add_window(FakeWindow {
            handle: handle(0x10),
            process_id: 42,
            process_name: "notepad.exe".into(),
            title: "Untitled - Notepad".into(),
        });
        platform.add_window(FakeWindow {
            handle: handle(0x20),
            process_id: 77,
            process_name: "calc.exe".into(),
            title: "Calculator".into(),
        });
        platform.set_foreground_window(Some(handle(0x20)));
        platform
    }

    #[test]
    fn test_handle_wins() {
        let target = WindowTarget {
            handle: Some(handle(0x999)),
            process_id: Some(42),
            ..Default::default()
        };
        assert_eq!(target.find(&platform()), Some(handle(0x999)));
    }

    #[test]
    fn test_process_id_then_name_then_title() {
        let platform = platform();

        assert_eq!(WindowTarget::process_id(42).find(&platform), Some(handle(0x10)));
        assert_eq!(
            WindowTarget::process_name("NOTEPAD").find(&platform),
            Some(handle(0x10))
        );
        assert_eq!(
            WindowTarget::title("Calculator").find(&platform),
            Some(handle(0x20))
        );

        let stale_pid = WindowTarget {
            process_id: Some(1234),
            title: Some("Calculator".into()),
            ..Default::default()
        };
        assert_eq!(stale_pid.find(&platform), Some(handle(0x20)));
    }

    #[test]
    fn test_empty_target_without_fallback_fails() {
        let err = WindowTarget::none()
            .resolve(&platform(), false)
            .unwrap_err();
        assert!(err.is_target_not_found());
        assert!(WindowTarget::title("   ").is_empty());
    }

    #[test]
    fn test_foreground_fallback() {
        assert_eq!(
            WindowTarget::process_name("missing").resolve(&platform(), true),
            Ok(handle(0x20))
        );
    }

    #[test]
    fn test_display() {
        let target = WindowTarget {
            process_id: Some(7),
            title: Some("Editor".into()),
            ..Default::default()
        };
        assert_eq!(target.to_string(), "pid 7, title \"Editor\"");
        assert_eq!(WindowTarget::none().to_string(), "<none>");
    }

    #[test]
    fn test_bring_to_front() {
        let platform = platform();
        bring_to_front(&platform, handle(0x10), true).unwrap();
        assert_eq!(platform.foreground_window(), Some(handle(0x10)));

        let err = bring_to_front(&platform, handle(0x55), false).unwrap_err();
        assert!(err.to_string().starts_with("Failed to bring window 0x55"));
    }
}
