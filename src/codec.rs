//! Binary agent (de)serialization.
//!
//! The wire format is a flat sequence of IEEE-754 64-bit floats, written
//! little-endian regardless of host byte order. The first float is the
//! agent type tag ([`crate::agents::AgentKind`]); the rest is the
//! variant-specific payload:
//!
//! - network-only agents: `[tag, input, hidden, output, parameters..]`
//! - composite agents: `[tag, len1, len2, payload1.., payload2..]` where
//!   each payload is a complete network encoding
//! - scalar variants carry their one parameter after the tag
//! - stateless variants are tag-only
//!
//! Round trips are bit-identical; a buffer with an unrecognized tag is a
//! fatal decode error.

use crate::agents::{
    Agent, AgentBox, AgentKind, ConstantAgent, FeedforwardNetwork, GatedRandomAgent, MirrorAgent,
    NeuralAgent, RandomAgent, SoloNeuralAgent, ThresholdAgent,
};
use crate::error::CodecError;

/// Serializes an agent to its wire format.
pub fn encode(agent: &dyn Agent) -> Vec<u8> {
    let floats = agent.encode_floats();
    let mut bytes = Vec::with_capacity(floats.len() * 8);
    for float in floats {
        bytes.extend_from_slice(&float.to_le_bytes());
    }
    bytes
}

/// Reconstructs an agent from its wire format.
pub fn decode(bytes: &[u8]) -> Result<AgentBox, CodecError> {
    if bytes.len() % 8 != 0 {
        return Err(CodecError::MisalignedBuffer(bytes.len()));
    }
    let floats: Vec<f64> = bytes
        .chunks_exact(8)
        .map(|chunk| f64::from_le_bytes(chunk.try_into().expect("chunk is 8 bytes")))
        .collect();
    decode_floats(&floats)
}

fn decode_floats(floats: &[f64]) -> Result<AgentBox, CodecError> {
    let tag = *floats.first().ok_or(CodecError::Truncated {
        needed: 1,
        found: 0,
    })?;
    let kind = AgentKind::from_tag(tag).ok_or(CodecError::UnknownTag(tag))?;

    match kind {
        AgentKind::Neural => decode_neural(floats),
        AgentKind::SoloNeural => {
            let network = FeedforwardNetwork::decode_floats(&floats[1..])?;
            Ok(Box::new(SoloNeuralAgent::from_network(network)))
        }
        AgentKind::Constant => Ok(Box::new(ConstantAgent::new(scalar_field(floats)?))),
        AgentKind::Mirror => Ok(Box::new(MirrorAgent::new())),
        AgentKind::Threshold => Ok(Box::new(ThresholdAgent::new())),
        AgentKind::Random => Ok(Box::new(RandomAgent::new())),
        AgentKind::GatedRandom => Ok(Box::new(GatedRandomAgent::new(scalar_field(floats)?))),
    }
}

/// Composite layout: `[tag, leader_len, follower_len, leader.., follower..]`.
fn decode_neural(floats: &[f64]) -> Result<AgentBox, CodecError> {
    if floats.len() < 3 {
        return Err(CodecError::Truncated {
            needed: 3,
            found: floats.len(),
        });
    }
    let leader_len = length_field(floats[1])?;
    let follower_len = length_field(floats[2])?;

    let needed = 3 + leader_len + follower_len;
    if floats.len() < needed {
        return Err(CodecError::Truncated {
            needed,
            found: floats.len(),
        });
    }

    let leader = FeedforwardNetwork::decode_floats(&floats[3..3 + leader_len])?;
    let follower = FeedforwardNetwork::decode_floats(&floats[3 + leader_len..needed])?;
    Ok(Box::new(NeuralAgent::from_networks(leader, follower)))
}

fn scalar_field(floats: &[f64]) -> Result<f64, CodecError> {
    floats.get(1).copied().ok_or(CodecError::Truncated {
        needed: 2,
        found: floats.len(),
    })
}

fn length_field(field: f64) -> Result<usize, CodecError> {
    if field.fract() != 0.0 || field < 0.0 || field > u32::MAX as f64 {
        return Err(CodecError::InvalidLengthField(field));
    }
    Ok(field as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentSpec;

    /// Bit-identity via the wire: if decode reproduced the agent exactly,
    /// re-encoding it yields the original bytes.
    fn assert_roundtrips(agent: &dyn Agent) {
        let bytes = encode(agent);
        let decoded = decode(&bytes).expect("decode fresh encoding");
        assert_eq!(decoded.kind(), agent.kind());
        assert_eq!(encode(decoded.as_ref()), bytes);
    }

    #[test]
    fn test_every_variant_roundtrips_bit_identically() {
        let specs = [
            AgentSpec::Neural { hidden_size: 5 },
            AgentSpec::SoloNeural { hidden_size: 7 },
            AgentSpec::Constant { bet: 0.375 },
            AgentSpec::Mirror,
            AgentSpec::Threshold,
            AgentSpec::Random,
            AgentSpec::GatedRandom { min_strength: 0.6 },
        ];
        for spec in specs {
            assert_roundtrips(spec.build().as_ref());
        }
    }

    #[test]
    fn test_decoded_network_agent_plays_like_the_original() {
        let mut original = NeuralAgent::new(4);
        let mut decoded = decode(&encode(&original)).unwrap();

        let a = original.lead(0.3, 0.7);
        let b = decoded.lead(0.3, 0.7);
        assert_eq!(a, b);
        assert_eq!(original.follow(0.2, 0.5, 0.9), decoded.follow(0.2, 0.5, 0.9));
    }

    #[test]
    fn test_unknown_tag_is_fatal() {
        let bytes = encode(&ConstantAgent::new(0.5));
        let mut corrupted = bytes;
        corrupted[..8].copy_from_slice(&99.0f64.to_le_bytes());
        assert!(matches!(
            decode(&corrupted),
            Err(CodecError::UnknownTag(tag)) if tag == 99.0
        ));
    }

    #[test]
    fn test_empty_buffer_is_truncated() {
        assert!(matches!(
            decode(&[]),
            Err(CodecError::Truncated { needed: 1, found: 0 })
        ));
    }

    #[test]
    fn test_misaligned_buffer_is_rejected() {
        let mut bytes = encode(&MirrorAgent::new());
        bytes.pop();
        assert!(matches!(decode(&bytes), Err(CodecError::MisalignedBuffer(_))));
    }

    #[test]
    fn test_non_integral_composite_length_field_is_rejected() {
        let mut bytes = encode(&NeuralAgent::new(3));
        // The leader payload length sits right after the tag.
        bytes[8..16].copy_from_slice(&2.5f64.to_le_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(CodecError::InvalidLengthField(field)) if field == 2.5
        ));
    }

    #[test]
    fn test_truncated_composite_payload_is_rejected() {
        let bytes = encode(&NeuralAgent::new(3));
        assert!(matches!(
            decode(&bytes[..bytes.len() - 8]),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn test_constant_payload_survives_exactly() {
        let bet = 0.123_456_789_012_345_67;
        let decoded = decode(&encode(&ConstantAgent::new(bet))).unwrap();
        assert_eq!(encode(decoded.as_ref()), encode(&ConstantAgent::new(bet)));
    }
}
