//! Process-based terminal implementation over the controlling tty.

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};

use libc::{self, c_int};
use signal_hook::iterator::Signals;

use crate::core::terminal::Terminal;

/// Environment variable naming a file that receives a copy of every terminal write.
pub const WRITE_LOG_ENV: &str = "REDREC_TUI_WRITE_LOG";

fn wait_writable(fd: c_int) -> io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result == 0 {
            continue;
        }
        if (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }

        return Err(io::Error::other(format!(
            "poll(POLLOUT) returned revents=0x{:x}",
            fds.revents
        )));
    }
}

fn write_all_fd_with<FWrite, FWait>(
    fd: c_int,
    bytes: &[u8],
    mut write_once: FWrite,
    mut wait_writable: FWait,
) -> io::Result<()>
where
    FWrite: FnMut(c_int, &[u8]) -> io::Result<usize>,
    FWait: FnMut(c_int) -> io::Result<()>,
{
    let mut written = 0;
    while written < bytes.len() {
        match write_once(fd, &bytes[written..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "write returned 0",
                ));
            }
            Ok(count) => {
                let remaining = bytes.len() - written;
                if count > remaining {
                    return Err(io::Error::other(
                        "write returned more bytes than requested",
                    ));
                }
                written += count;
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                continue;
            }
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                wait_writable(fd)?;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn write_fd(fd: c_int, data: &str) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    write_all_fd_with(
        fd,
        data.as_bytes(),
        |fd, buf| {
            let result = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
            if result < 0 {
                Err(io::Error::last_os_error())
            } else {
                Ok(result as usize)
            }
        },
        wait_writable,
    )
}

fn read_byte_fd(fd: c_int) -> io::Result<u8> {
    let mut byte = 0u8;
    loop {
        let result = unsafe { libc::read(fd, &mut byte as *mut u8 as *mut libc::c_void, 1) };
        if result == 1 {
            return Ok(byte);
        }
        if result == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "terminal input closed",
            ));
        }
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            continue;
        }
        return Err(err);
    }
}

fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Saved terminal configuration that can be re-applied from another thread.
#[derive(Clone, Copy)]
pub struct TermiosSnapshot {
    fd: c_int,
    termios: libc::termios,
}

impl TermiosSnapshot {
    pub fn capture(fd: c_int) -> io::Result<Self> {
        Ok(Self {
            fd,
            termios: get_termios(fd)?,
        })
    }

    pub fn restore(&self) -> io::Result<()> {
        set_termios(self.fd, &self.termios)
    }
}

pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
    write_log_path: Option<PathBuf>,
    write_log_failed: bool,
}

impl ProcessTerminal {
    pub fn new() -> Self {
        Self::from_fds(libc::STDIN_FILENO, libc::STDOUT_FILENO)
    }

    /// Terminal over arbitrary descriptors (a pty slave in tests).
    pub fn from_fds(stdin_fd: c_int, stdout_fd: c_int) -> Self {
        let write_log_path = match env::var_os(WRITE_LOG_ENV) {
            Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
            _ => None,
        };

        Self {
            stdin_fd,
            stdout_fd,
            original_termios: None,
            write_log_path,
            write_log_failed: false,
        }
    }

    pub fn is_raw(&self) -> bool {
        self.original_termios.is_some()
    }

    fn append_write_log(&mut self, data: &str) {
        if self.write_log_failed {
            return;
        }
        if let Some(path) = self.write_log_path.as_ref() {
            let result = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut file| file.write_all(data.as_bytes()));
            if let Err(err) = result {
                tracing::warn!(path = %path.display(), error = %err, "disabling terminal write log");
                self.write_log_failed = true;
            }
        }
    }
}

impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for ProcessTerminal {
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        let original = match self.original_termios {
            Some(original) => original,
            None => get_termios(self.stdin_fd)?,
        };
        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
        }
        set_termios(self.stdin_fd, &raw)?;
        self.original_termios = Some(original);
        tracing::debug!(fd = self.stdin_fd, "terminal raw mode enabled");
        Ok(())
    }

    fn restore_mode(&mut self) -> io::Result<()> {
        let Some(original) = self.original_termios.take() else {
            return Ok(());
        };

        // Flush input before leaving raw mode to avoid buffered bytes leaking to the shell.
        let _ = unsafe { libc::tcflush(self.stdin_fd, libc::TCIFLUSH) };

        set_termios(self.stdin_fd, &original)?;
        tracing::debug!(fd = self.stdin_fd, "terminal mode restored");
        Ok(())
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        read_byte_fd(self.stdin_fd)
    }

    fn write(&mut self, data: &str) -> io::Result<()> {
        write_fd(self.stdout_fd, data)?;
        self.append_write_log(data);
        Ok(())
    }

    fn columns(&self) -> u16 {
        read_winsize(self.stdout_fd)
            .map(|(cols, _)| cols)
            .unwrap_or(80)
    }
}

/// Signal handler guard for cleanup hooks.
pub struct SignalHookGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<JoinHandle<()>>,
}

impl Drop for SignalHookGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Install a SIGTERM/SIGHUP cleanup hook. The cleanup runs at most once and receives the signal.
///
/// SIGINT is not covered: raw mode turns Ctrl-C into an input byte.
pub fn install_signal_handlers<F>(cleanup: F) -> io::Result<SignalHookGuard>
where
    F: Fn(c_int) + Send + Sync + 'static,
{
    let ran = Arc::new(AtomicBool::new(false));
    let mut signals = Signals::new([libc::SIGTERM, libc::SIGHUP])?;
    let handle = signals.handle();

    let thread = thread::spawn(move || {
        for signal in signals.forever() {
            if !ran.swap(true, Ordering::SeqCst) {
                cleanup(signal);
            }
        }
    });

    Ok(SignalHookGuard {
        handle,
        thread: Some(thread),
    })
}
