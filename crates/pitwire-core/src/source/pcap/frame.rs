use etherparse::{SlicedPacket, TransportSlice};
use pcap_parser::Linktype;

use super::error::PcapSourceError;
use super::layout;

/// Extract the UDP payload of one captured frame when it is addressed to
/// `port`.
///
/// Returns `Ok(None)` for non-UDP traffic, other destination ports, and
/// linktypes we do not decode.
pub(crate) fn telemetry_payload(
    linktype: Linktype,
    frame: &[u8],
    port: u16,
) -> Result<Option<Vec<u8>>, PcapSourceError> {
    let sliced = match linktype {
        Linktype::ETHERNET => {
            SlicedPacket::from_ethernet(frame).map_err(|e| PcapSourceError::Capture {
                context: "frame slice",
                message: e.to_string(),
            })?
        }
        Linktype::RAW => SlicedPacket::from_ip(frame).map_err(|e| PcapSourceError::Capture {
            context: "frame slice",
            message: e.to_string(),
        })?,
        _ => return Ok(None),
    };

    let udp = match sliced.transport {
        Some(TransportSlice::Udp(udp)) => udp,
        _ => return Ok(None),
    };
    if udp.destination_port() != port {
        return Ok(None);
    }

    let net = match sliced.net {
        Some(net) => net,
        None => return Ok(None),
    };
    let ip_payload = net.ip_payload_ref().ok_or(PcapSourceError::Capture {
        context: "frame slice",
        message: "missing IP payload".to_string(),
    })?;
    let datagram = ip_payload
        .payload
        .get(layout::UDP_HEADER_LEN..)
        .ok_or(PcapSourceError::Capture {
            context: "udp payload",
            message: "truncated UDP datagram".to_string(),
        })?;
    Ok(Some(datagram.to_vec()))
}
