use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    /// Time since the transcript was started.
    pub elapsed: Duration,
    pub direction: Direction,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Rx,
    Tx,
}

/// Bounded record of what went over the serial line, oldest first.
#[derive(Debug, Clone)]
pub struct Transcript {
    started: Instant,
    entries: Vec<TranscriptEntry>,
    max_entries: usize,
}

impl Transcript {
    pub fn new(max_entries: usize) -> Self {
        Self {
            started: Instant::now(),
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn push(&mut self, direction: Direction, data: Vec<u8>) {
        self.entries.push(TranscriptEntry {
            elapsed: self.started.elapsed(),
            direction,
            data,
        });

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn to_text(&self, show_hex: bool) -> String {
        let mut result = String::new();
        for entry in &self.entries {
            let prefix = match entry.direction {
                Direction::Rx => "RX: ",
                Direction::Tx => "TX: ",
            };

            let millis = entry.elapsed.as_millis();
            result.push_str(&format!("[+{:>5}.{:03}s] ", millis / 1000, millis % 1000));
            result.push_str(prefix);

            if entry.data.is_empty() {
                result.push_str("(nothing)");
            } else if show_hex {
                let bytes: Vec<String> = entry.data.iter().map(|byte| format!("{byte:02X}")).collect();
                result.push_str(&bytes.join(" "));
            } else {
                result.push_str(&entry.data.escape_ascii().to_string());
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_entries() {
        let mut t = Transcript::new(2);
        t.push(Direction::Tx, b"\n".to_vec());
        t.push(Direction::Rx, b"\n\r".to_vec());
        t.push(Direction::Tx, b"LOOP 1\n".to_vec());

        let entries = t.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].direction, Direction::Rx);
        assert_eq!(entries[1].data, b"LOOP 1\n");
        assert!(entries[0].elapsed <= entries[1].elapsed);
    }

    #[test]
    fn renders_hex_and_text() {
        let mut t = Transcript::new(8);
        t.push(Direction::Tx, b"\n".to_vec());
        t.push(Direction::Rx, vec![0x0A, 0x0D]);
        t.push(Direction::Rx, Vec::new());

        let hex = t.to_text(true);
        let lines: Vec<&str> = hex.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("TX: 0A"));
        assert!(lines[1].ends_with("RX: 0A 0D"));
        assert!(lines[2].ends_with("RX: (nothing)"));

        let text = t.to_text(false);
        assert!(text.lines().nth(1).unwrap().ends_with(r"RX: \n\r"));
    }
}
