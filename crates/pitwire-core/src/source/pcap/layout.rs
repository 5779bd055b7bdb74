/// First four bytes of a PCAPNG section header block.
pub const PCAPNG_MAGIC: [u8; 4] = [0x0a, 0x0d, 0x0d, 0x0a];

/// Buffer size handed to the pcap block readers.
pub const READER_BUFFER_SIZE: usize = 65536;

/// Width of the UDP header preceding the datagram payload.
pub const UDP_HEADER_LEN: usize = 8;
