use burn::nn::{Linear, LinearConfig, Lstm, LstmConfig};
use burn::prelude::*;

/// Recurrent price-prediction network.
///
/// ```text
/// Input:  [batch, timesteps, data_dim]
/// LSTM:   data_dim -> hidden_size
/// Last timestep hidden state: [batch, hidden_size]
/// FC:     hidden_size -> 1  (predicted relative close change)
/// ```
#[derive(Module, Debug)]
pub struct PolicyNetwork<B: Backend> {
    lstm: Lstm<B>,
    output: Linear<B>,
}

#[derive(Config, Debug)]
pub struct PolicyNetworkConfig {
    pub data_dim: usize,
    #[config(default = 64)]
    pub hidden_size: usize,
}

impl PolicyNetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> PolicyNetwork<B> {
        PolicyNetwork {
            lstm: LstmConfig::new(self.data_dim, self.hidden_size, true).init(device),
            output: LinearConfig::new(self.hidden_size, 1).init(device),
        }
    }
}

impl<B: Backend> PolicyNetwork<B> {
    /// Forward pass: input [batch, timesteps, data_dim] -> output [batch, 1].
    pub fn forward(&self, input: Tensor<B, 3>) -> Tensor<B, 2> {
        let [batch, seq, _] = input.dims();
        let (hidden_seq, _state) = self.lstm.forward(input, None);
        let last = hidden_seq
            .slice([0..batch, seq - 1..seq])
            .reshape([batch as i32, -1]);
        self.output.forward(last)
    }
}
