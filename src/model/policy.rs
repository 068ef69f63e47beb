use std::fs;
use std::path::Path;

use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;
use burn::record::{BinBytesRecorder, FullPrecisionSettings, Recorder};
use burn::tensor::TensorData;

use crate::checkpoint::{EpochLogs, LOSS_KEY, VAL_LOSS_KEY};
use crate::data::{Batch, BatchGenerator};
use crate::error::CheckpointError;
use crate::model::network::{PolicyNetwork, PolicyNetworkConfig, PolicyNetworkRecord};
use crate::model::PricePredictor;

type InferBackend = NdArray<f32>;
type TrainBackend = Autodiff<InferBackend>;

/// LSTM model hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LstmPolicyConfig {
    pub data_dim: usize,
    pub timesteps: usize,
    pub hidden_size: usize,
    pub learning_rate: f64,
}

impl Default for LstmPolicyConfig {
    fn default() -> Self {
        LstmPolicyConfig {
            data_dim: crate::data::Bar::FEATURE_DIM,
            timesteps: 15,
            hidden_size: 64,
            learning_rate: 1e-3,
        }
    }
}

/// LSTM price predictor with an Adam optimizer.
pub struct LstmPolicy {
    network: PolicyNetwork<TrainBackend>,
    optimizer: burn::optim::adaptor::OptimizerAdaptor<
        burn::optim::Adam,
        PolicyNetwork<TrainBackend>,
        TrainBackend,
    >,
    config: LstmPolicyConfig,
    device: <TrainBackend as Backend>::Device,
}

impl LstmPolicy {
    pub fn new(config: LstmPolicyConfig) -> Self {
        let device = Default::default();
        let net_config =
            PolicyNetworkConfig::new(config.data_dim).with_hidden_size(config.hidden_size);
        let network: PolicyNetwork<TrainBackend> = net_config.init(&device);
        let optimizer = AdamConfig::new().init();

        LstmPolicy {
            network,
            optimizer,
            config,
            device,
        }
    }

    pub fn config(&self) -> &LstmPolicyConfig {
        &self.config
    }

    fn batch_tensors<B: Backend<Device = <TrainBackend as Backend>::Device>>(
        &self,
        batch: &Batch,
    ) -> (Tensor<B, 3>, Tensor<B, 2>) {
        let inputs = Tensor::<B, 1>::from_data(
            TensorData::from(batch.inputs.as_slice()),
            &self.device,
        )
        .reshape([
            batch.len as i32,
            self.config.timesteps as i32,
            self.config.data_dim as i32,
        ]);
        let targets = Tensor::<B, 1>::from_data(
            TensorData::from(batch.targets.as_slice()),
            &self.device,
        )
        .reshape([batch.len as i32, 1]);
        (inputs, targets)
    }

    /// One gradient step on a batch. Returns the batch MSE.
    fn train_batch(&mut self, batch: &Batch) -> f32 {
        let (inputs, targets) = self.batch_tensors::<TrainBackend>(batch);
        let predictions = self.network.forward(inputs);

        // MSE loss
        let diff = predictions - targets;
        let loss = (diff.clone() * diff).mean();

        let loss_val: f32 = loss
            .clone()
            .into_data()
            .to_vec::<f32>()
            .expect("f32 loss tensor extraction")[0];

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.network);

        // Optimizer step: consumes the network, returns the updated one
        self.network = self
            .optimizer
            .step(self.config.learning_rate, self.network.clone(), grads);

        loss_val
    }

    /// MSE over a full generator pass, no gradients.
    fn evaluate(&self, generator: &BatchGenerator) -> f64 {
        let network = self.network.clone().valid();
        let mut total_sq = 0.0f64;
        let mut n_samples = 0usize;
        for batch in generator.batches() {
            let (inputs, targets) = self.batch_tensors::<InferBackend>(&batch);
            let predictions = network.forward(inputs);
            let diff = predictions - targets;
            let sq: f32 = (diff.clone() * diff)
                .sum()
                .into_data()
                .to_vec::<f32>()
                .expect("f32 tensor data extraction")[0];
            total_sq += f64::from(sq);
            n_samples += batch.len;
        }
        if n_samples == 0 {
            0.0
        } else {
            total_sq / n_samples as f64
        }
    }
}

impl PricePredictor for LstmPolicy {
    fn fit_epoch(&mut self, train: &BatchGenerator, valid: Option<&BatchGenerator>) -> EpochLogs {
        let mut total = 0.0f64;
        let mut n_samples = 0usize;
        for batch in train.batches() {
            let len = batch.len;
            let loss = self.train_batch(&batch);
            total += f64::from(loss) * len as f64;
            n_samples += len;
        }

        let mut logs = EpochLogs::new();
        let mean = if n_samples == 0 {
            0.0
        } else {
            total / n_samples as f64
        };
        logs.insert(LOSS_KEY.to_string(), mean);
        if let Some(valid) = valid {
            logs.insert(VAL_LOSS_KEY.to_string(), self.evaluate(valid));
        }
        logs
    }

    fn save_weights(&self, path: &Path) -> Result<(), CheckpointError> {
        let recorder = BinBytesRecorder::<FullPrecisionSettings>::default();
        let record = self.network.clone().valid().into_record();
        let bytes = recorder
            .record(record, ())
            .map_err(|e| CheckpointError::WeightsSave(e.to_string()))?;
        fs::write(path, bytes)?;
        Ok(())
    }

    fn load_weights(&mut self, path: &Path) -> Result<(), CheckpointError> {
        let bytes = fs::read(path).map_err(|e| CheckpointError::WeightsLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let recorder = BinBytesRecorder::<FullPrecisionSettings>::default();
        let record: PolicyNetworkRecord<TrainBackend> = recorder
            .load(bytes, &self.device)
            .map_err(|e| CheckpointError::WeightsLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        self.network = self.network.clone().load_record(record);
        Ok(())
    }
}
