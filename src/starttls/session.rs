use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::{Duration, Instant};

use super::SmtpError;

/// RFC 5321 §4.5.3.1.5: une ligne de réponse tient en 512 octets, CRLF compris.
pub const MAX_REPLY_LINE: usize = 512;
pub const MAX_REPLY_LINES: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub lines: Vec<String>,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// EHLO keywords. The first line is the server's greeting, not an extension.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().skip(1).map(String::as_str)
    }

    pub fn has_capability(&self, cap: &str) -> bool {
        self.extensions().any(|line| {
            line.split_whitespace()
                .next()
                .map(|token| token.eq_ignore_ascii_case(cap))
                .unwrap_or(false)
        })
    }
}

/// Plain-text SMTP client session. The socket closes when the session drops.
#[derive(Debug)]
pub struct SmtpSession {
    host: String,
    stream: TcpStream,
    deadline: Instant,
    buffer: Vec<u8>,
    pub transcript: Vec<String>,
}

impl SmtpSession {
    /// Try each address in turn. `timeout` is a budget for the whole session:
    /// every connect attempt, read and write shares the same deadline.
    pub fn connect(
        host: &str,
        addresses: &[SocketAddr],
        timeout: Duration,
    ) -> Result<Self, SmtpError> {
        let deadline = Instant::now() + timeout;
        let mut last_err = None;
        for addr in addresses {
            let Some(remaining) = remaining_until(deadline) else {
                return Err(last_err.unwrap_or_else(deadline_exceeded));
            };
            match TcpStream::connect_timeout(addr, remaining) {
                Ok(stream) => {
                    return Ok(Self {
                        host: host.to_string(),
                        stream,
                        deadline,
                        buffer: Vec::new(),
                        transcript: Vec::new(),
                    });
                }
                Err(err) => {
                    last_err = Some(SmtpError::Connect {
                        addr: addr.to_string(),
                        source: err,
                    })
                }
            }
        }
        Err(last_err.unwrap_or_else(|| SmtpError::NoAddress {
            host: host.to_string(),
        }))
    }

    pub fn read_greeting(&mut self) -> Result<SmtpReply, SmtpError> {
        let reply = self.read_reply()?;
        self.record_reply(&reply);
        Ok(reply)
    }

    pub fn send_command(&mut self, command: &str) -> Result<SmtpReply, SmtpError> {
        self.record("C", command);
        self.write_line(command)?;
        let reply = self.read_reply()?;
        self.record_reply(&reply);
        Ok(reply)
    }

    /// `QUIT` en best-effort: la réponse est lue si elle arrive.
    pub fn quit(&mut self) -> Result<(), SmtpError> {
        self.record("C", "QUIT");
        self.write_line("QUIT")?;
        if let Ok(reply) = self.read_reply() {
            self.record_reply(&reply);
        }
        Ok(())
    }

    fn write_line(&mut self, command: &str) -> Result<(), SmtpError> {
        let remaining = remaining_until(self.deadline).ok_or_else(deadline_exceeded)?;
        self.stream
            .set_write_timeout(Some(remaining))
            .map_err(SmtpError::io)?;
        let mut data = command.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        self.stream.write_all(&data).map_err(SmtpError::io)?;
        self.stream.flush().map_err(SmtpError::io)
    }

    fn read_reply(&mut self) -> Result<SmtpReply, SmtpError> {
        let mut lines = Vec::new();
        let mut code: Option<u16> = None;
        loop {
            if lines.len() >= MAX_REPLY_LINES {
                return Err(SmtpError::protocol(format!(
                    "reply longer than {MAX_REPLY_LINES} lines"
                )));
            }
            let line = self.read_line()?;
            if line.len() < 3 || !line.is_char_boundary(3) {
                return Err(SmtpError::protocol(format!("invalid reply: {line}")));
            }
            let parsed_code = line[..3]
                .parse::<u16>()
                .map_err(|_| SmtpError::protocol(format!("invalid code in line: {line}")))?;
            if let Some(existing) = code {
                if existing != parsed_code {
                    return Err(SmtpError::protocol(format!(
                        "inconsistent reply codes: {existing} vs {parsed_code}"
                    )));
                }
            } else {
                code = Some(parsed_code);
            }
            let is_last = line.as_bytes().get(3) != Some(&b'-');
            let text = line.get(4..).unwrap_or_default().to_string();
            lines.push(text);
            if is_last {
                return Ok(SmtpReply {
                    code: parsed_code,
                    lines,
                });
            }
        }
    }

    fn read_line(&mut self) -> Result<String, SmtpError> {
        loop {
            let newline = self.buffer.iter().position(|byte| *byte == b'\n');
            if newline.unwrap_or(self.buffer.len()) > MAX_REPLY_LINE {
                return Err(SmtpError::protocol(format!(
                    "reply line longer than {MAX_REPLY_LINE} bytes"
                )));
            }
            if let Some(pos) = newline {
                let mut line = self.buffer.drain(..=pos).collect::<Vec<_>>();
                if line.ends_with(b"\r\n") {
                    line.truncate(line.len() - 2);
                } else {
                    line.truncate(line.len() - 1);
                }
                return Ok(String::from_utf8_lossy(&line).into_owned());
            }

            let remaining = remaining_until(self.deadline).ok_or_else(deadline_exceeded)?;
            self.stream
                .set_read_timeout(Some(remaining))
                .map_err(SmtpError::io)?;
            let mut buf = [0u8; 512];
            let read = self.stream.read(&mut buf).map_err(SmtpError::io)?;
            if read == 0 {
                return Err(SmtpError::io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed",
                )));
            }
            self.buffer.extend_from_slice(&buf[..read]);
        }
    }

    fn record(&mut self, direction: &str, message: &str) {
        self.transcript
            .push(format!("[{}] {direction}: {message}", self.host));
    }

    fn record_reply(&mut self, reply: &SmtpReply) {
        if reply.lines.is_empty() {
            self.record("S", &format!("{}", reply.code));
        } else {
            for line in &reply.lines {
                self.record("S", &format!("{} {}", reply.code, line));
            }
        }
    }
}

/// Temps restant avant `deadline`, `None` une fois dépassée.
fn remaining_until(deadline: Instant) -> Option<Duration> {
    deadline
        .checked_duration_since(Instant::now())
        .filter(|remaining| !remaining.is_zero())
}

fn deadline_exceeded() -> SmtpError {
    SmtpError::io(io::Error::new(
        io::ErrorKind::TimedOut,
        "SMTP session exceeded its timeout",
    ))
}
