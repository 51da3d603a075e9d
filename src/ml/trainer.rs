// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Epoch loop with Adam, mirroring a Keras-style fit():
//   - every timestep is a sparse categorical classification
//   - per-epoch train loss/accuracy and validation loss/accuracy
//   - a checkpoint after every epoch
//
// Backend split:
//   - Training uses MyBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns the model on MyInnerBackend (Wgpu)
//   - so the validation batcher must also use MyInnerBackend
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::TransliterationBatcher, dataset::TransliterationDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger, TrainingHistory};
use crate::ml::model::{timestep_hits, TransliteratorConfig, TransliteratorModel};

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

pub fn run_training(
    cfg:           &TrainConfig,
    model_cfg:     &TransliteratorConfig,
    train_dataset: TransliterationDataset,
    val_dataset:   TransliterationDataset,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
) -> Result<TrainingHistory> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop(cfg, model_cfg, train_dataset, val_dataset, ckpt_manager, metrics, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    model_cfg:     &TransliteratorConfig,
    train_dataset: TransliterationDataset,
    val_dataset:   TransliterationDataset,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
    device:        burn::backend::wgpu::WgpuDevice,
) -> Result<TrainingHistory> {

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: TransliteratorModel<MyBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: embedding={} → {} x BiLSTM({}) → {} classes",
        model_cfg.embedding_dim,
        model_cfg.num_layers,
        model_cfg.hidden_size,
        model_cfg.target_vocab_size,
    );

    let mut optim = AdamConfig::new().init();

    let has_validation = val_dataset.sample_count() > 0;

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = TransliterationBatcher::<MyBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_batcher = TransliterationBatcher::<MyInnerBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let mut history = TrainingHistory::default();

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;
        let mut train_hits     = 0usize;
        let mut train_steps    = 0usize;

        for batch in train_loader.iter() {
            let (loss, logits) = model.forward_loss(batch.source_ids, batch.target_ids.clone());

            train_loss_sum += loss.clone().into_scalar().elem::<f64>();
            train_batches  += 1;

            let (hits, steps) = timestep_hits(logits.detach(), batch.target_ids);
            train_hits  += hits;
            train_steps += steps;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = mean(train_loss_sum, train_batches).unwrap_or(f64::NAN);
        let train_acc  = mean(train_hits as f64, train_steps).unwrap_or(0.0);

        // ── Validation phase ──────────────────────────────────────────────────
        let (val_loss, val_acc) = if has_validation {
            let model_valid = model.valid();

            let mut val_loss_sum = 0.0f64;
            let mut val_batches  = 0usize;
            let mut val_hits     = 0usize;
            let mut val_steps    = 0usize;

            for batch in val_loader.iter() {
                let (loss, logits) = model_valid.forward_loss(batch.source_ids, batch.target_ids.clone());
                val_loss_sum += loss.into_scalar().elem::<f64>();
                val_batches  += 1;

                let (hits, steps) = timestep_hits(logits, batch.target_ids);
                val_hits  += hits;
                val_steps += steps;
            }

            (mean(val_loss_sum, val_batches), mean(val_hits as f64, val_steps))
        } else {
            (None, None)
        };

        let m = EpochMetrics::new(epoch, train_loss, train_acc, val_loss, val_acc);
        println!("{}", m.summary(cfg.epochs));

        metrics.log(&m)?;
        history.push(&m);

        ckpt_manager.save_model(&model, epoch)?;
        tracing::debug!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete!");
    Ok(history)
}

fn mean(sum: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}
