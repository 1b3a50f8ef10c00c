//! Relaunching with elevated privileges
//!
//! Only Windows has a separate elevated process mode we can request from a
//! running program (UAC "runas"). Elsewhere the [`Unsupported`] stub is used.

use std::ffi::OsString;
use thiserror::Error;

/// What happened when a restart was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    /// No elevation mechanism on this platform
    Unsupported,
    /// Already running elevated; restarting wouldn't change anything
    AlreadyElevated,
    /// A new elevated process was requested; this one should exit
    Launched,
}

#[derive(Debug, Error)]
pub enum ElevationError {
    #[error("Could not determine current executable: {0}")]
    CurrentExe(#[source] std::io::Error),

    #[error("Elevated launch was refused or failed (code {0})")]
    Launch(isize),
}

/// Capability to restart the current program with elevated privileges
pub trait Elevator {
    /// Request a relaunch with `args`; fire-and-forget
    fn restart_elevated(&self, args: &[OsString]) -> Result<RestartOutcome, ElevationError>;
}

/// Platforms without a runtime elevation request
pub struct Unsupported;

impl Elevator for Unsupported {
    fn restart_elevated(&self, _args: &[OsString]) -> Result<RestartOutcome, ElevationError> {
        Ok(RestartOutcome::Unsupported)
    }
}

/// UAC relaunch through `ShellExecuteW` with the `runas` verb
#[cfg(windows)]
pub struct RunAs;

#[cfg(windows)]
impl Elevator for RunAs {
    fn restart_elevated(&self, args: &[OsString]) -> Result<RestartOutcome, ElevationError> {
        if win::is_elevated() {
            return Ok(RestartOutcome::AlreadyElevated);
        }

        let exe = std::env::current_exe().map_err(ElevationError::CurrentExe)?;
        let params = join_args(args);
        log::debug!("Relaunching {} {} via runas", exe.display(), params);

        win::shell_execute_runas(&exe, &params)?;
        Ok(RestartOutcome::Launched)
    }
}

/// Pick the elevation mechanism for the running platform
pub fn platform_elevator() -> Box<dyn Elevator> {
    #[cfg(windows)]
    {
        Box::new(RunAs)
    }

    #[cfg(not(windows))]
    {
        Box::new(Unsupported)
    }
}

/// Build a command line that `CommandLineToArgvW` splits back into `args`
#[cfg_attr(not(windows), allow(dead_code))]
fn join_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| quote_arg(&a.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg_attr(not(windows), allow(dead_code))]
fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '"']) {
        return arg.to_string();
    }

    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    let mut backslashes = 0;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                // Backslashes before a quote are escapes, so double them and escape the quote
                out.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                out.push('"');
                backslashes = 0;
            }
            _ => {
                out.extend(std::iter::repeat('\\').take(backslashes));
                out.push(c);
                backslashes = 0;
            }
        }
    }
    out.extend(std::iter::repeat('\\').take(backslashes * 2));
    out.push('"');
    out
}

#[cfg(windows)]
mod win {
    use super::ElevationError;
    use std::ffi::OsStr;
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;
    use std::ptr;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcessToken};
    use winapi::um::securitybaseapi::GetTokenInformation;
    use winapi::um::shellapi::ShellExecuteW;
    use winapi::um::winnt::{TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY};
    use winapi::um::winuser::SW_SHOWNORMAL;

    fn wide(s: &OsStr) -> Vec<u16> {
        s.encode_wide().chain(once(0)).collect()
    }

    /// Whether the process token is elevated
    pub fn is_elevated() -> bool {
        unsafe {
            let mut token = ptr::null_mut();
            if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token) == 0 {
                return false;
            }

            let mut elevation = TOKEN_ELEVATION { TokenIsElevated: 0 };
            let mut ret_len = 0u32;
            let ok = GetTokenInformation(
                token,
                TokenElevation,
                &mut elevation as *mut _ as *mut _,
                std::mem::size_of::<TOKEN_ELEVATION>() as u32,
                &mut ret_len,
            );
            CloseHandle(token);

            ok != 0 && elevation.TokenIsElevated != 0
        }
    }

    pub fn shell_execute_runas(exe: &Path, params: &str) -> Result<(), ElevationError> {
        let verb = wide(OsStr::new("runas"));
        let file = wide(exe.as_os_str());
        let params = wide(OsStr::new(params));

        let code = unsafe {
            ShellExecuteW(
                ptr::null_mut(),
                verb.as_ptr(),
                file.as_ptr(),
                params.as_ptr(),
                ptr::null(),
                SW_SHOWNORMAL,
            )
        } as isize;

        // Values above 32 mean success
        if code > 32 {
            Ok(())
        } else {
            Err(ElevationError::Launch(code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_stub() {
        let outcome = Unsupported.restart_elevated(&[]).unwrap();
        assert_eq!(outcome, RestartOutcome::Unsupported);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_platform_elevator_is_stub() {
        let outcome = platform_elevator()
            .restart_elevated(&[OsString::from("--no-pause")])
            .unwrap();
        assert_eq!(outcome, RestartOutcome::Unsupported);
    }

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote_arg("--no-pause"), "--no-pause");
        assert_eq!(quote_arg(r"C:\Unity"), r"C:\Unity");
    }

    #[test]
    fn test_quote_spaces() {
        assert_eq!(
            quote_arg(r"C:\Program Files\Unity"),
            r#""C:\Program Files\Unity""#
        );
    }

    #[test]
    fn test_quote_trailing_backslash() {
        assert_eq!(quote_arg(r"C:\My Dir\"), r#""C:\My Dir\\""#);
    }

    #[test]
    fn test_quote_embedded_quote() {
        assert_eq!(quote_arg(r#"a"b"#), r#""a\"b""#);
        assert_eq!(quote_arg(r#"a\"b"#), r#""a\\\"b""#);
    }

    #[test]
    fn test_quote_empty() {
        assert_eq!(quote_arg(""), r#""""#);
    }

    #[test]
    fn test_join_args() {
        let args = [
            OsString::from("--root"),
            OsString::from(r"D:\Unity Editors"),
            OsString::from("-y"),
        ];
        assert_eq!(join_args(&args), r#"--root "D:\Unity Editors" -y"#);
    }
}
