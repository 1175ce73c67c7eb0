use log::{debug, info};
use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

use crate::error::StationError;
use crate::transcript::{Direction, Transcript};

/// A serial device as shown by `--list-ports`.
#[derive(Debug, Clone)]
pub struct PortInfo {
    pub name: String,
    pub kind: &'static str,
    /// USB vendor and product id.
    pub usb_id: Option<(u16, u16)>,
    pub product: Option<String>,
}

impl From<SerialPortInfo> for PortInfo {
    fn from(info: SerialPortInfo) -> Self {
        let (kind, usb_id, product) = match info.port_type {
            SerialPortType::UsbPort(usb) => ("USB", Some((usb.vid, usb.pid)), usb.product),
            SerialPortType::PciPort => ("PCI", None, None),
            SerialPortType::BluetoothPort => ("Bluetooth", None, None),
            SerialPortType::Unknown => ("Unknown", None, None),
        };
        Self {
            name: info.port_name,
            kind,
            usb_id,
            product,
        }
    }
}

impl std::fmt::Display for PortInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.kind)?;
        if let Some((vid, pid)) = self.usb_id {
            write!(f, " ({vid:04X}:{pid:04X})")?;
        }
        if let Some(product) = &self.product {
            write!(f, " {product}")?;
        }
        Ok(())
    }
}

/// A port whose read timeout can be changed between reads, so a multi-read
/// reply can be held to one overall deadline.
pub trait TimedPort: Read + Write {
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()>;
}

impl TimedPort for Box<dyn SerialPort> {
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.set_timeout(timeout).map_err(io::Error::from)
    }
}

/// Serial settings for the station console. The defaults are what the
/// console ships with: 19200 baud, 8N1, no flow control.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub port_name: String,
    pub baud_rate: u32,
    pub data_bits: serialport::DataBits,
    pub parity: serialport::Parity,
    pub stop_bits: serialport::StopBits,
    pub flow_control: serialport::FlowControl,
    /// Upper bound for each reply read.
    pub timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port_name: "/dev/ttyUSB0".to_string(),
            baud_rate: 19_200,
            data_bits: serialport::DataBits::Eight,
            parity: serialport::Parity::None,
            stop_bits: serialport::StopBits::One,
            flow_control: serialport::FlowControl::None,
            timeout: Duration::from_millis(1200),
        }
    }
}

/// Exclusive handle on the station's serial line.
///
/// Generic over the port so the protocol can run against an in-memory
/// script; the real thing is a `Box<dyn SerialPort>`. The port is closed when
/// the link is dropped or [`StationLink::close`]d.
pub struct StationLink<P = Box<dyn SerialPort>> {
    port: P,
    timeout: Duration,
    transcript: Transcript,
}

impl StationLink {
    pub fn list_ports() -> Vec<PortInfo> {
        serialport::available_ports()
            .unwrap_or_default()
            .into_iter()
            .map(PortInfo::from)
            .collect()
    }

    pub fn open(cfg: &LinkConfig) -> Result<Self, StationError> {
        let port = serialport::new(&cfg.port_name, cfg.baud_rate)
            .data_bits(cfg.data_bits)
            .parity(cfg.parity)
            .stop_bits(cfg.stop_bits)
            .flow_control(cfg.flow_control)
            .timeout(cfg.timeout)
            .open()
            .map_err(|source| StationError::Open {
                port: cfg.port_name.clone(),
                source,
            })?;

        info!("opened {} at {} baud", cfg.port_name, cfg.baud_rate);
        Ok(Self::new(port, cfg.timeout))
    }
}

impl<P: TimedPort> StationLink<P> {
    pub fn new(port: P, timeout: Duration) -> Self {
        Self {
            port,
            timeout,
            transcript: Transcript::new(64),
        }
    }

    pub fn send(&mut self, data: &[u8]) -> Result<(), StationError> {
        self.port.write_all(data)?;
        self.port.flush()?;
        self.transcript.push(Direction::Tx, data.to_vec());
        Ok(())
    }

    /// Reads until `len` bytes have arrived or the link timeout has elapsed.
    ///
    /// The timeout bounds the whole call, not each read: every read is given
    /// only what is left of it. A timeout is not an error; the caller gets
    /// whatever arrived, possibly nothing, and decides what a short reply
    /// means.
    pub fn read_up_to(&mut self, len: usize) -> Result<Vec<u8>, StationError> {
        let deadline = Instant::now() + self.timeout;
        let mut buf = vec![0u8; len];
        let mut filled = 0;

        while filled < len {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            self.port.set_read_timeout(remaining)?;

            match self.port.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }

        buf.truncate(filled);
        self.transcript.push(Direction::Rx, buf.clone());
        Ok(buf)
    }

    pub fn get_ref(&self) -> &P {
        &self.port
    }

    /// Releases the port and hands back the record of the exchange.
    pub fn close(self) -> Transcript {
        let Self { port, transcript, .. } = self;
        drop(port);
        debug!("serial link closed after {} exchanges", transcript.entries().len());
        transcript
    }
}
