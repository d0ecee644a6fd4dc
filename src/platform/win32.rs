//! The Win32 platform backend.

use ::std::mem::size_of;
use ::sysinfo::{ProcessesToUpdate, System};
use ::tap::Pipe;
use ::tracing::{debug, trace};
use ::widestring::U16CString;
use ::windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{BOOL, HWND, LPARAM, POINT, WPARAM},
        UI::{
            Input::KeyboardAndMouse::{
                keybd_event, mouse_event, GetAsyncKeyState, GetKeyState, GetKeyboardState,
                MapVirtualKeyW, SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE,
                KEYBDINPUT, KEYBD_EVENT_FLAGS, MAPVK_VK_TO_VSC, MOUSEINPUT, MOUSE_EVENT_FLAGS,
                VIRTUAL_KEY,
            },
            WindowsAndMessaging::{
                EnumWindows, FindWindowW, GetCursorPos, GetForegroundWindow, GetMessageExtraInfo,
                GetSystemMetrics, GetWindow, GetWindowThreadProcessId, IsWindow, IsWindowVisible,
                PostMessageW, SendMessageW, SetCursorPos, SetForegroundWindow, ShowWindow,
                GW_OWNER, SM_CXSCREEN, SM_CYSCREEN, SW_SHOW,
            },
        },
    },
};

use super::{normalize_process_name, InputSink, KeyStateProvider, WindowLocator};
use crate::{
    errors::*,
    input::{
        keyboard::VirtualKey,
        record::{InputRecord, KeyboardRecord, MouseRecord},
    },
    types::*,
};

/// The live Win32 backend. Stateless: every call goes straight to the OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct Win32;

impl KeyStateProvider for Win32 {
    fn key_state(&self, vk: VirtualKey) -> i16 {
        unsafe { GetKeyState(vk.value() as i32) }
    }

    fn async_key_state(&self, vk: VirtualKey) -> i16 {
        unsafe { GetAsyncKeyState(vk.value() as i32) }
    }

    fn keyboard_state(&self) -> Result<[u8; 256]> {
        let mut state = [0u8; 256];
        unsafe { GetKeyboardState(&mut state) }
            .ok()
            .function("GetKeyboardState")
            .map(|_| state)
    }
}

impl WindowLocator for Win32 {
    fn window_for_process(&self, pid: u32) -> Option<WindowHandle> {
        let mut search = ProcessWindowSearch { pid, found: None };

        // The callback stops the enumeration early, which EnumWindows reports
        // as failure, so the return value carries no information.
        let _ = unsafe {
            EnumWindows(
                Some(find_process_window),
                LPARAM(&mut search as *mut ProcessWindowSearch as isize),
            )
        };

        trace!(pid, found = ?search.found, "Searched for process main window");
        search.found
    }

    fn processes_by_name(&self, name: &str) -> Vec<u32> {
        let wanted = normalize_process_name(name);

        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::All, true);

        system
            .processes()
            .iter()
            .filter(|(_, process)| {
                normalize_process_name(&process.name().to_string_lossy()) == wanted
            })
            .map(|(pid, _)| pid.as_u32())
            .collect()
    }

    fn find_window_by_title(&self, title: &str) -> Option<WindowHandle> {
        let title = U16CString::from_str(title).ok()?;
        unsafe { FindWindowW(PCWSTR::null(), PCWSTR(title.as_ptr())) }
            .pipe(|hwnd| WindowHandle::new(hwnd.0))
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        unsafe { GetForegroundWindow() }.pipe(|hwnd| WindowHandle::new(hwnd.0))
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        unsafe { IsWindow(hwnd(window)) }.as_bool()
    }

    fn set_foreground(&self, window: WindowHandle) -> Result<()> {
        unsafe { SetForegroundWindow(hwnd(window)) }
            .ok()
            .function("SetForegroundWindow")
    }

    fn show(&self, window: WindowHandle) -> Result<()> {
        // The return value is the previous visibility, not an error flag.
        let _ = unsafe { ShowWindow(hwnd(window), SW_SHOW) };
        get_last_err().function("ShowWindow")
    }
}

impl InputSink for Win32 {
    fn message_extra_info(&self) -> usize {
        unsafe { GetMessageExtraInfo() }.0 as usize
    }

    fn scan_code(&self, vk: VirtualKey) -> u8 {
        unsafe { MapVirtualKeyW(vk.value() as u32, MAPVK_VK_TO_VSC) } as u8
    }

    fn send_input(&self, records: &[InputRecord]) -> Result<u32> {
        let inputs: Vec<INPUT> = records.iter().map(to_input).collect();
        let accepted = unsafe { SendInput(&inputs, size_of::<INPUT>() as i32) };

        if accepted == 0 && !inputs.is_empty() {
            // Blocked outright, e.g. by UIPI. Report the reason but let the
            // caller decide whether zero is fatal.
            if let Err(err) = get_last_err().function("SendInput") {
                debug!(%err, "SendInput accepted no records");
            }
        }

        Ok(accepted)
    }

    fn legacy_keyboard(&self, record: &KeyboardRecord) {
        let vk = record.vk.value() as u8;
        let scan = (record.scan & 0xFF) as u8;
        unsafe {
            keybd_event(
                vk,
                scan,
                KEYBD_EVENT_FLAGS(record.flags.bits()),
                record.extra_info,
            )
        };
    }

    fn legacy_mouse(&self, record: &MouseRecord) {
        unsafe {
            mouse_event(
                MOUSE_EVENT_FLAGS(record.flags.bits()),
                record.dx,
                record.dy,
                record.data,
                record.extra_info,
            )
        };
    }

    fn post_message(
        &self,
        window: WindowHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    ) -> Result<()> {
        unsafe { PostMessageW(hwnd(window), msg, WPARAM(wparam), LPARAM(lparam)) }
            .ok()
            .function("PostMessageW")
    }

    fn send_message(&self, window: WindowHandle, msg: u32, wparam: usize, lparam: isize) -> isize {
        unsafe { SendMessageW(hwnd(window), msg, WPARAM(wparam), LPARAM(lparam)) }.0
    }

    fn cursor_pos(&self) -> Result<ScreenPoint> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }
            .ok()
            .function("GetCursorPos")
            .map(|_| ScreenPoint {
                x: point.x,
                y: point.y,
            })
    }

    fn set_cursor_pos(&self, pos: ScreenPoint) -> Result<()> {
        unsafe { SetCursorPos(pos.x, pos.y) }
            .ok()
            .function("SetCursorPos")
    }

    fn screen_size(&self) -> ScreenSize {
        unsafe {
            ScreenSize {
                width: GetSystemMetrics(SM_CXSCREEN),
                height: GetSystemMetrics(SM_CYSCREEN),
            }
        }
    }
}

/// State threaded through [`EnumWindows`] by [`find_process_window`].
struct ProcessWindowSearch {
    pid: u32,
    found: Option<WindowHandle>,
}

/// Stops at the first visible, unowned top-level window of the searched
/// process.
unsafe extern "system" fn find_process_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let search = &mut *(lparam.0 as *mut ProcessWindowSearch);

    let mut pid = 0u32;
    GetWindowThreadProcessId(hwnd, Some(&mut pid as *mut u32));

    let is_main = pid == search.pid
        && IsWindowVisible(hwnd).as_bool()
        && GetWindow(hwnd, GW_OWNER).0 == 0;

    if is_main {
        search.found = WindowHandle::new(hwnd.0);
        false.into()
    } else {
        true.into()
    }
}

const fn hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw())
}

fn to_input(record: &InputRecord) -> INPUT {
    match record {
        InputRecord::Keyboard(k) => INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(k.vk.value()),
                    wScan: k.scan,
                    dwFlags: KEYBD_EVENT_FLAGS(k.flags.bits()),
                    time: k.time,
                    dwExtraInfo: k.extra_info,
                },
            },
        },
        InputRecord::Mouse(m) => INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: m.dx,
                    dy: m.dy,
                    mouseData: m.data as _,
                    dwFlags: MOUSE_EVENT_FLAGS(m.flags.bits()),
                    time: m.time,
                    dwExtraInfo: m.extra_info,
                },
            },
        },
    }
}
