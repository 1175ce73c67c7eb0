//! Console command exchanges: wake-up and LOOP request.

use log::{debug, info, warn};
use vantage_decode::FRAME_LEN;

use crate::error::StationError;
use crate::link::{StationLink, TimedPort};

pub const WAKE: &[u8] = b"\n";
pub const WAKE_ACK: &[u8] = b"\n\r";
pub const WAKE_ATTEMPTS: usize = 3;
pub const LOOP_COMMAND: &[u8] = b"LOOP 1\n";

/// Wakes the console. Each attempt sends a newline and waits one link
/// timeout for `\n\r`; gives up after `attempts` tries.
pub fn wake<P: TimedPort>(link: &mut StationLink<P>, attempts: usize) -> Result<(), StationError> {
    for attempt in 1..=attempts {
        link.send(WAKE)?;
        let reply = link.read_up_to(WAKE_ACK.len())?;
        if reply == WAKE_ACK {
            info!("station awake after {attempt} attempt(s)");
            return Ok(());
        }
        warn!("wake attempt {attempt}/{attempts} failed, got {reply:02X?}");
    }

    Err(StationError::NotReady { attempts })
}

/// Requests a single LOOP packet and returns the full raw frame.
pub fn request_loop<P: TimedPort>(link: &mut StationLink<P>) -> Result<Vec<u8>, StationError> {
    link.send(LOOP_COMMAND)?;
    let frame = link.read_up_to(FRAME_LEN)?;
    if frame.len() < FRAME_LEN {
        return Err(StationError::IncompleteData {
            expected: FRAME_LEN,
            received: frame.len(),
        });
    }

    debug!("received {} byte LOOP frame", frame.len());
    Ok(frame)
}

/// Runs the whole exchange on `link` and closes it, whatever the outcome.
pub fn poll<P: TimedPort>(mut link: StationLink<P>) -> Result<Vec<u8>, StationError> {
    let result = wake(&mut link, WAKE_ATTEMPTS).and_then(|()| request_loop(&mut link));
    let transcript = link.close();
    debug!("serial exchange:\n{}", transcript.to_text(true));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Reply, ScriptedPort};
    use std::time::Duration;

    fn link(replies: Vec<Reply>) -> StationLink<ScriptedPort> {
        StationLink::new(ScriptedPort::new(replies), Duration::from_millis(1200))
    }

    fn frame() -> Vec<u8> {
        let mut frame = vec![0x06];
        frame.extend_from_slice(b"LOO");
        frame.resize(FRAME_LEN, 0);
        frame
    }

    #[test]
    fn wake_succeeds_on_nth_attempt() {
        for n in 1..=WAKE_ATTEMPTS {
            let mut replies = vec![Reply::Timeout; n - 1];
            replies.push(Reply::Bytes(WAKE_ACK.to_vec()));
            let mut link = link(replies);

            wake(&mut link, WAKE_ATTEMPTS).unwrap();
            assert_eq!(link.get_ref().writes().len(), n);
            assert!(link.get_ref().writes().iter().all(|w| w == WAKE));
        }
    }

    #[test]
    fn wake_gives_up_after_three_attempts() {
        let mut link = link(vec![
            Reply::Bytes(b"\x15\x15".to_vec()),
            Reply::Timeout,
            Reply::Bytes(b"\n".to_vec()),
            Reply::Bytes(WAKE_ACK.to_vec()),
        ]);

        let err = wake(&mut link, WAKE_ATTEMPTS).unwrap_err();
        assert!(matches!(err, StationError::NotReady { attempts: 3 }));
        assert_eq!(link.get_ref().writes().len(), 3);
    }

    #[test]
    fn request_loop_sends_command_and_reads_frame() {
        let mut link = link(vec![Reply::Bytes(frame()[..40].to_vec()), Reply::Bytes(frame()[40..].to_vec())]);
        let got = request_loop(&mut link).unwrap();
        assert_eq!(got, frame());
        assert_eq!(link.get_ref().writes(), [LOOP_COMMAND.to_vec()]);
    }

    #[test]
    fn short_frame_is_incomplete() {
        let mut link = link(vec![Reply::Bytes(frame()[..60].to_vec()), Reply::Timeout]);
        let err = request_loop(&mut link).unwrap_err();
        assert!(matches!(err, StationError::IncompleteData { expected: 100, received: 60 }));
    }

    #[test]
    fn poll_releases_port_when_station_sleeps() {
        let port = ScriptedPort::new(vec![]);
        let log = port.log();

        let err = poll(StationLink::new(port, Duration::from_millis(10))).unwrap_err();
        assert!(matches!(err, StationError::NotReady { attempts: 3 }));
        assert!(log.is_closed());
        assert_eq!(log.writes(), vec![WAKE.to_vec(); 3]);
    }

    #[test]
    fn poll_releases_port_on_incomplete_frame() {
        let port = ScriptedPort::new(vec![Reply::Bytes(WAKE_ACK.to_vec()), Reply::Bytes(frame()[..10].to_vec())]);
        let log = port.log();

        let err = poll(StationLink::new(port, Duration::from_millis(10))).unwrap_err();
        assert!(matches!(err, StationError::IncompleteData { received: 10, .. }));
        assert!(log.is_closed());
        assert_eq!(log.writes(), [WAKE.to_vec(), LOOP_COMMAND.to_vec()]);
    }

    #[test]
    fn poll_returns_frame_and_releases_port() {
        let frame = frame();
        let port = ScriptedPort::new(vec![Reply::Bytes(WAKE_ACK.to_vec()), Reply::Bytes(frame.clone())]);
        let log = port.log();

        assert_eq!(poll(StationLink::new(port, Duration::from_millis(1200))).unwrap(), frame);
        assert!(log.is_closed());
    }
}
