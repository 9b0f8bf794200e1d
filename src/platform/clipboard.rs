//! Clipboard access
//!
//! Copying is fire-and-forget from the tool's point of view: callers log
//! failures and move on. The trait exists so the controller can be driven
//! against an in-memory clipboard in tests and headless sessions.

/// Errors that can occur while writing to a clipboard
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("no system clipboard is available on this platform")]
    Unsupported,
    #[error("clipboard is held by another application")]
    Busy,
    #[error("failed to allocate clipboard memory")]
    AllocationFailed,
    #[error("Windows API error: {0}")]
    Win32Error(String),
}

/// Destination for copied text
pub trait Clipboard {
    /// Replaces the clipboard content with `text`
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that keeps the last copied text in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text copied, if any
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// The operating system clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        win32::set_unicode_text(text)
    }
}

#[cfg(not(windows))]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unsupported)
    }
}

#[cfg(windows)]
mod win32 {
    use super::ClipboardError;
    use windows::Win32::Foundation::{HANDLE, HWND};
    use windows::Win32::System::DataExchange::{
        CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
    };
    use windows::Win32::System::Memory::{
        GlobalAlloc, GlobalFree, GlobalLock, GlobalUnlock, GMEM_MOVEABLE,
    };
    use windows::Win32::System::Ole::CF_UNICODETEXT;

    /// Closes the clipboard when dropped, whatever happened in between
    struct OpenClipboardGuard;

    impl OpenClipboardGuard {
        fn open() -> Result<Self, ClipboardError> {
            unsafe { OpenClipboard(HWND(0)) }.map_err(|_| ClipboardError::Busy)?;
            Ok(Self)
        }
    }

    impl Drop for OpenClipboardGuard {
        fn drop(&mut self) {
            let _ = unsafe { CloseClipboard() };
        }
    }

    pub(super) fn set_unicode_text(text: &str) -> Result<(), ClipboardError> {
        let wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
        let byte_len = wide.len() * std::mem::size_of::<u16>();

        let _guard = OpenClipboardGuard::open()?;
        unsafe { EmptyClipboard() }.map_err(|e| ClipboardError::Win32Error(format!("{e:?}")))?;

        let hmem = unsafe { GlobalAlloc(GMEM_MOVEABLE, byte_len) }
            .map_err(|_| ClipboardError::AllocationFailed)?;

        unsafe {
            let dst = GlobalLock(hmem) as *mut u16;
            if dst.is_null() {
                let _ = GlobalFree(hmem);
                return Err(ClipboardError::AllocationFailed);
            }
            std::ptr::copy_nonoverlapping(wide.as_ptr(), dst, wide.len());
            let _ = GlobalUnlock(hmem);
        }

        // On success the system owns the memory; on failure we still do.
        let format = u32::from(CF_UNICODETEXT.0);
        if let Err(e) = unsafe { SetClipboardData(format, HANDLE(hmem.0 as isize)) } {
            let _ = unsafe { GlobalFree(hmem) };
            return Err(ClipboardError::Win32Error(format!("{e:?}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_text() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);

        clipboard.set_text("first").unwrap();
        clipboard.set_text("second").unwrap();
        assert_eq!(clipboard.contents(), Some("second"));
    }

    #[cfg(not(windows))]
    #[test]
    fn system_clipboard_unsupported_off_windows() {
        let err = SystemClipboard::new().set_text("x").unwrap_err();
        assert!(matches!(err, ClipboardError::Unsupported));
    }
}
