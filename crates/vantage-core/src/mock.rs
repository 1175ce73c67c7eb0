//! Scripted stand-in for a serial port.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use crate::link::TimedPort;

/// What the next `read` call sees.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Bytes delivered, split across reads if the buffer is smaller.
    Bytes(Vec<u8>),
    /// Bytes that arrive only after a delay. A read whose timeout is shorter
    /// waits out its timeout and fails; the rest of the delay stays queued.
    After(Duration, Vec<u8>),
    /// Nothing arrives before the port timeout.
    Timeout,
    Fail(io::ErrorKind),
}

/// State shared between a [`ScriptedPort`] and the test that built it, so
/// it can still be inspected after the port has been moved into a link or
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct PortLog {
    writes: Rc<RefCell<Vec<Vec<u8>>>>,
    timeouts: Rc<RefCell<Vec<Duration>>>,
    closed: Rc<Cell<bool>>,
}

impl PortLog {
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes.borrow().clone()
    }

    /// Every read timeout the port was configured with, in order.
    pub fn timeouts(&self) -> Vec<Duration> {
        self.timeouts.borrow().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

/// Port that answers reads from a fixed script and records every write.
/// Once the script runs out every read times out.
#[derive(Debug, Default)]
pub struct ScriptedPort {
    replies: VecDeque<Reply>,
    timeout: Duration,
    log: PortLog,
}

impl ScriptedPort {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            timeout: Duration::ZERO,
            log: PortLog::default(),
        }
    }

    pub fn log(&self) -> PortLog {
        self.log.clone()
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.log.writes()
    }
}

fn timed_out() -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, "timed out")
}

impl Read for ScriptedPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.replies.pop_front() {
            Some(Reply::Bytes(mut data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    self.replies.push_front(Reply::Bytes(data.split_off(n)));
                }
                Ok(n)
            }
            Some(Reply::After(delay, data)) if delay <= self.timeout => {
                thread::sleep(delay);
                self.replies.push_front(Reply::Bytes(data));
                self.read(buf)
            }
            Some(Reply::After(delay, data)) => {
                thread::sleep(self.timeout);
                self.replies.push_front(Reply::After(delay - self.timeout, data));
                Err(timed_out())
            }
            Some(Reply::Fail(kind)) => Err(io::Error::new(kind, "scripted failure")),
            Some(Reply::Timeout) | None => Err(timed_out()),
        }
    }
}

impl Write for ScriptedPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.log.writes.borrow_mut().push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl TimedPort for ScriptedPort {
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.timeout = timeout;
        self.log.timeouts.borrow_mut().push(timeout);
        Ok(())
    }
}

impl Drop for ScriptedPort {
    fn drop(&mut self) {
        self.log.closed.set(true);
    }
}
