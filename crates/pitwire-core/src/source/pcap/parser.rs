use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{Block, LegacyPcapReader, Linktype, PcapBlockOwned, PcapNGReader};

use crate::source::{Datagram, DatagramSource, SourceError};

use super::error::PcapSourceError;
use super::frame::telemetry_payload;
use super::layout;

/// Offline source replaying telemetry datagrams from a capture file.
///
/// Frames that are not UDP datagrams to the telemetry port are skipped
/// silently; a session capture is mostly telemetry but routinely contains
/// unrelated traffic.
pub struct PcapReplaySource {
    reader: CaptureReader,
    port: u16,
}

enum CaptureReader {
    Legacy {
        reader: LegacyPcapReader<File>,
        linktype: Option<Linktype>,
    },
    Ng {
        reader: PcapNGReader<File>,
        linktypes: Vec<Linktype>,
    },
}

/// One link-layer frame pulled out of the capture.
struct CapturedFrame {
    ts: f64,
    linktype: Linktype,
    data: Vec<u8>,
}

impl PcapReplaySource {
    /// Open a `.pcap`/`.pcapng` file, keeping datagrams addressed to `port`.
    pub fn open(path: &Path, port: u16) -> Result<Self, SourceError> {
        let mut file = File::open(path).map_err(SourceError::from)?;
        let magic = read_magic(&mut file).map_err(SourceError::from)?;
        let reader = if magic == layout::PCAPNG_MAGIC {
            let reader = PcapNGReader::new(layout::READER_BUFFER_SIZE, file).map_err(|e| {
                SourceError::from(PcapSourceError::Capture {
                    context: "pcapng reader init",
                    message: e.to_string(),
                })
            })?;
            CaptureReader::Ng {
                reader,
                linktypes: Vec::new(),
            }
        } else {
            let reader = LegacyPcapReader::new(layout::READER_BUFFER_SIZE, file).map_err(|e| {
                SourceError::from(PcapSourceError::Capture {
                    context: "pcap reader init",
                    message: e.to_string(),
                })
            })?;
            CaptureReader::Legacy {
                reader,
                linktype: None,
            }
        };
        Ok(Self { reader, port })
    }
}

impl DatagramSource for PcapReplaySource {
    fn next_datagram(&mut self) -> Result<Option<Datagram>, SourceError> {
        loop {
            let frame = match self.reader.next_frame().map_err(SourceError::from)? {
                Some(frame) => frame,
                None => return Ok(None),
            };
            let payload = telemetry_payload(frame.linktype, &frame.data, self.port)
                .map_err(SourceError::from)?;
            if let Some(data) = payload {
                return Ok(Some(Datagram {
                    ts: Some(frame.ts),
                    data,
                }));
            }
        }
    }
}

/// Read the format magic and rewind so the block reader starts at zero.
fn read_magic(file: &mut File) -> Result<[u8; 4], PcapSourceError> {
    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(magic)
}

impl CaptureReader {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>, PcapSourceError> {
        loop {
            match self {
                CaptureReader::Legacy { reader, linktype } => match reader.next() {
                    Ok((consumed, block)) => {
                        let frame = match block {
                            PcapBlockOwned::LegacyHeader(header) => {
                                *linktype = Some(header.network);
                                None
                            }
                            PcapBlockOwned::Legacy(packet) => Some(CapturedFrame {
                                ts: packet.ts_sec as f64 + packet.ts_usec as f64 * 1e-6,
                                linktype: linktype.unwrap_or(Linktype::ETHERNET),
                                data: packet.data.to_vec(),
                            }),
                            _ => None,
                        };
                        reader.consume(consumed);
                        if frame.is_some() {
                            return Ok(frame);
                        }
                    }
                    Err(pcap_parser::PcapError::Eof) => return Ok(None),
                    Err(pcap_parser::PcapError::Incomplete(_)) => {
                        reader.refill().map_err(|e| PcapSourceError::Capture {
                            context: "pcap reader refill",
                            message: e.to_string(),
                        })?;
                    }
                    Err(e) => {
                        return Err(PcapSourceError::Capture {
                            context: "pcap reader next",
                            message: e.to_string(),
                        });
                    }
                },
                CaptureReader::Ng { reader, linktypes } => match reader.next() {
                    Ok((consumed, block)) => {
                        let frame = match block {
                            PcapBlockOwned::NG(Block::InterfaceDescription(intf)) => {
                                linktypes.push(intf.linktype);
                                None
                            }
                            PcapBlockOwned::NG(Block::EnhancedPacket(packet)) => {
                                Some(CapturedFrame {
                                    ts: ng_ts_to_seconds(packet.ts_high, packet.ts_low),
                                    linktype: linktypes
                                        .get(packet.if_id as usize)
                                        .copied()
                                        .unwrap_or(Linktype::ETHERNET),
                                    data: packet.data.to_vec(),
                                })
                            }
                            _ => None,
                        };
                        reader.consume(consumed);
                        if frame.is_some() {
                            return Ok(frame);
                        }
                    }
                    Err(pcap_parser::PcapError::Eof) => return Ok(None),
                    Err(pcap_parser::PcapError::Incomplete(_)) => {
                        reader.refill().map_err(|e| PcapSourceError::Capture {
                            context: "pcapng reader refill",
                            message: e.to_string(),
                        })?;
                    }
                    Err(e) => {
                        return Err(PcapSourceError::Capture {
                            context: "pcapng reader next",
                            message: e.to_string(),
                        });
                    }
                },
            }
        }
    }
}

/// PCAPNG high/low timestamp to seconds, assuming microsecond resolution.
fn ng_ts_to_seconds(ts_high: u32, ts_low: u32) -> f64 {
    let ts = ((ts_high as u64) << 32) | (ts_low as u64);
    ts as f64 * 1e-6
}
