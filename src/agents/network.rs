use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::CodecError;

/// Fixed-topology feedforward network: one ReLU hidden layer feeding one
/// sigmoid output layer. Weight matrices are dense and row-major.
///
/// The activation vectors are scratch buffers reused across forward passes;
/// they are not part of the network's logical state and a single instance
/// must not be evaluated from two threads at once.
#[derive(Debug, Clone)]
pub struct FeedforwardNetwork {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,

    hidden_weights: Vec<f64>,
    hidden_biases: Vec<f64>,
    output_weights: Vec<f64>,
    output_biases: Vec<f64>,

    hidden_activations: Vec<f64>,
    output_activations: Vec<f64>,
}

impl FeedforwardNetwork {
    /// Builds a network with weights drawn from a zero-mean normal with
    /// standard deviation `1/sqrt(fan_in)` and zero biases.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        let mut network = Self::zeroed(input_size, hidden_size, output_size);
        let mut rng = rand::rng();
        init_layer(&mut network.hidden_weights, input_size, &mut rng);
        init_layer(&mut network.output_weights, hidden_size, &mut rng);
        network
    }

    fn zeroed(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        FeedforwardNetwork {
            input_size,
            hidden_size,
            output_size,
            hidden_weights: vec![0.0; hidden_size * input_size],
            hidden_biases: vec![0.0; hidden_size],
            output_weights: vec![0.0; output_size * hidden_size],
            output_biases: vec![0.0; output_size],
            hidden_activations: vec![0.0; hidden_size],
            output_activations: vec![0.0; output_size],
        }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Forward pass. The returned slice aliases the internal scratch buffer
    /// and is only valid until the next call.
    pub fn forward(&mut self, input: &[f64]) -> &[f64] {
        debug_assert_eq!(input.len(), self.input_size);

        for hidden_index in 0..self.hidden_size {
            let mut dot = 0.0;
            for (input_index, value) in input.iter().enumerate() {
                dot += self.hidden_weights[hidden_index * self.input_size + input_index] * value;
            }
            self.hidden_activations[hidden_index] = relu(dot + self.hidden_biases[hidden_index]);
        }

        for output_index in 0..self.output_size {
            let mut dot = 0.0;
            for hidden_index in 0..self.hidden_size {
                dot += self.output_weights[output_index * self.hidden_size + hidden_index]
                    * self.hidden_activations[hidden_index];
            }
            self.output_activations[output_index] =
                sigmoid(dot + self.output_biases[output_index]);
        }

        &self.output_activations
    }

    /// Number of trainable scalars.
    pub fn parameter_count(&self) -> usize {
        self.hidden_weights.len()
            + self.hidden_biases.len()
            + self.output_weights.len()
            + self.output_biases.len()
    }

    /// Reads one trainable scalar. The flat index runs over hidden weights,
    /// hidden biases, output weights, then output biases, which is also the
    /// probe order during finite-difference training.
    pub fn parameter(&self, index: usize) -> f64 {
        let hidden_weight_end = self.hidden_weights.len();
        let hidden_bias_end = hidden_weight_end + self.hidden_biases.len();
        let output_weight_end = hidden_bias_end + self.output_weights.len();

        if index < hidden_weight_end {
            self.hidden_weights[index]
        } else if index < hidden_bias_end {
            self.hidden_biases[index - hidden_weight_end]
        } else if index < output_weight_end {
            self.output_weights[index - hidden_bias_end]
        } else {
            self.output_biases[index - output_weight_end]
        }
    }

    /// Writes one trainable scalar; same index space as [`Self::parameter`].
    pub fn set_parameter(&mut self, index: usize, value: f64) {
        let hidden_weight_end = self.hidden_weights.len();
        let hidden_bias_end = hidden_weight_end + self.hidden_biases.len();
        let output_weight_end = hidden_bias_end + self.output_weights.len();

        if index < hidden_weight_end {
            self.hidden_weights[index] = value;
        } else if index < hidden_bias_end {
            self.hidden_biases[index - hidden_weight_end] = value;
        } else if index < output_weight_end {
            self.output_weights[index - hidden_bias_end] = value;
        } else {
            self.output_biases[index - output_weight_end] = value;
        }
    }

    /// Wire payload: `[input_size, hidden_size, output_size, hidden
    /// weights.., hidden biases.., output weights.., output biases..]`.
    /// No type tag; the containing agent supplies one.
    pub fn encode_floats(&self) -> Vec<f64> {
        let mut floats = Vec::with_capacity(3 + self.parameter_count());
        floats.push(self.input_size as f64);
        floats.push(self.hidden_size as f64);
        floats.push(self.output_size as f64);
        floats.extend_from_slice(&self.hidden_weights);
        floats.extend_from_slice(&self.hidden_biases);
        floats.extend_from_slice(&self.output_weights);
        floats.extend_from_slice(&self.output_biases);
        floats
    }

    /// Inverse of [`Self::encode_floats`].
    pub fn decode_floats(floats: &[f64]) -> Result<Self, CodecError> {
        if floats.len() < 3 {
            return Err(CodecError::Truncated {
                needed: 3,
                found: floats.len(),
            });
        }
        let input_size = layer_size(floats[0])?;
        let hidden_size = layer_size(floats[1])?;
        let output_size = layer_size(floats[2])?;

        let mut network = Self::zeroed(input_size, hidden_size, output_size);
        let needed = 3 + network.parameter_count();
        if floats.len() < needed {
            return Err(CodecError::Truncated {
                needed,
                found: floats.len(),
            });
        }

        let mut cursor = 3;
        for slice in [
            &mut network.hidden_weights,
            &mut network.hidden_biases,
            &mut network.output_weights,
            &mut network.output_biases,
        ] {
            let len = slice.len();
            slice.copy_from_slice(&floats[cursor..cursor + len]);
            cursor += len;
        }
        Ok(network)
    }
}

fn layer_size(field: f64) -> Result<usize, CodecError> {
    if field.fract() != 0.0 || field < 1.0 || field > u32::MAX as f64 {
        return Err(CodecError::InvalidLayerSize(field));
    }
    Ok(field as usize)
}

fn init_layer<R: Rng>(weights: &mut [f64], fan_in: usize, rng: &mut R) {
    let std_dev = 1.0 / (fan_in as f64).sqrt();
    let normal = Normal::new(0.0, std_dev).expect("std_dev is positive and finite");
    for weight in weights.iter_mut() {
        *weight = normal.sample(rng);
    }
}

fn relu(x: f64) -> f64 {
    x.max(0.0)
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeroed(input: usize, hidden: usize, output: usize) -> FeedforwardNetwork {
        let mut network = FeedforwardNetwork::new(input, hidden, output);
        for index in 0..network.parameter_count() {
            network.set_parameter(index, 0.0);
        }
        network
    }

    #[test]
    fn test_initialization_is_finite_with_zero_biases() {
        let network = FeedforwardNetwork::new(3, 16, 2);
        for index in 0..network.parameter_count() {
            assert!(network.parameter(index).is_finite());
        }
        assert!(network.hidden_biases.iter().all(|&b| b == 0.0));
        assert!(network.output_biases.iter().all(|&b| b == 0.0));
    }

    #[test]
    fn test_forward_known_values() {
        // 1 input, 1 hidden, 1 output; all weights 1, all biases 0:
        // hidden = relu(x), output = sigmoid(hidden).
        let mut network = zeroed(1, 1, 1);
        network.set_parameter(0, 1.0); // hidden weight
        network.set_parameter(2, 1.0); // output weight

        let out = network.forward(&[2.0])[0];
        assert!((out - sigmoid(2.0)).abs() < 1e-12);

        // Negative input is clipped by the ReLU, leaving sigmoid(0) = 0.5.
        let out = network.forward(&[-2.0])[0];
        assert!((out - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_forward_output_is_on_unit_interval() {
        let mut network = FeedforwardNetwork::new(2, 8, 2);
        let out = network.forward(&[0.3, 0.9]);
        assert_eq!(out.len(), 2);
        for &value in out {
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_parameter_index_order() {
        // 2x1 hidden weights, 2 hidden biases, 1x2 output weights, 1 bias.
        let mut network = zeroed(1, 2, 1);
        assert_eq!(network.parameter_count(), 7);
        for index in 0..7 {
            network.set_parameter(index, index as f64);
        }
        assert_eq!(network.hidden_weights, vec![0.0, 1.0]);
        assert_eq!(network.hidden_biases, vec![2.0, 3.0]);
        assert_eq!(network.output_weights, vec![4.0, 5.0]);
        assert_eq!(network.output_biases, vec![6.0]);
        for index in 0..7 {
            assert_eq!(network.parameter(index), index as f64);
        }
    }

    #[test]
    fn test_encode_decode_is_bit_identical() {
        let network = FeedforwardNetwork::new(3, 5, 2);
        let decoded = FeedforwardNetwork::decode_floats(&network.encode_floats()).unwrap();
        assert_eq!(decoded.input_size(), 3);
        assert_eq!(decoded.hidden_size(), 5);
        assert_eq!(decoded.output_size(), 2);
        for index in 0..network.parameter_count() {
            assert_eq!(
                network.parameter(index).to_bits(),
                decoded.parameter(index).to_bits()
            );
        }
    }

    #[test]
    fn test_decode_rejects_bad_sizes() {
        assert!(matches!(
            FeedforwardNetwork::decode_floats(&[2.5, 4.0, 1.0]),
            Err(CodecError::InvalidLayerSize(_))
        ));
        assert!(matches!(
            FeedforwardNetwork::decode_floats(&[2.0, 0.0, 1.0]),
            Err(CodecError::InvalidLayerSize(_))
        ));
    }

    #[test]
    fn test_decode_rejects_truncation() {
        let floats = FeedforwardNetwork::new(2, 3, 1).encode_floats();
        assert!(matches!(
            FeedforwardNetwork::decode_floats(&floats[..floats.len() - 1]),
            Err(CodecError::Truncated { .. })
        ));
        assert!(matches!(
            FeedforwardNetwork::decode_floats(&[]),
            Err(CodecError::Truncated { .. })
        ));
    }
}
