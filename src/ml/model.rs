use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        BiLstm, BiLstmConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct TransliteratorConfig {
    pub source_vocab_size: usize,
    pub target_vocab_size: usize,
    /// Padded width the model was trained on; inference pads to at least this
    pub sequence_width:    usize,
    #[config(default = 64)]
    pub embedding_dim:     usize,
    #[config(default = 64)]
    pub hidden_size:       usize,
    #[config(default = 2)]
    pub num_layers:        usize,
}

impl TransliteratorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> TransliteratorModel<B> {
        let embedding = EmbeddingConfig::new(self.source_vocab_size, self.embedding_dim).init(device);

        // First layer reads embeddings; each later layer reads the
        // concatenated forward+backward output of the one below.
        let layers: Vec<BiLstm<B>> = (0..self.num_layers)
            .map(|i| {
                let d_input = if i == 0 { self.embedding_dim } else { 2 * self.hidden_size };
                BiLstmConfig::new(d_input, self.hidden_size, true).init(device)
            })
            .collect();

        let classifier = LinearConfig::new(2 * self.hidden_size, self.target_vocab_size).init(device);

        TransliteratorModel { embedding, layers, classifier }
    }
}

/// Embedding → stacked BiLSTM → per-timestep linear classifier.
#[derive(Module, Debug)]
pub struct TransliteratorModel<B: Backend> {
    pub embedding:  Embedding<B>,
    pub layers:     Vec<BiLstm<B>>,
    pub classifier: Linear<B>,
}

impl<B: Backend> TransliteratorModel<B> {
    /// source_ids: [batch, seq_len] → logits: [batch, seq_len, target_vocab_size]
    pub fn forward(&self, source_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let mut x = self.embedding.forward(source_ids);
        for layer in &self.layers {
            let (output, _state) = layer.forward(x, None);
            x = output; // [batch, seq_len, 2 * hidden]
        }
        self.classifier.forward(x)
    }

    /// Mean cross-entropy over every timestep, padding included,
    /// so the model learns to emit PAD past the end of a word.
    pub fn forward_loss(
        &self,
        source_ids: Tensor<B, 2, Int>,
        target_ids: Tensor<B, 2, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 3>) {
        let logits = self.forward(source_ids);
        let [batch_size, seq_len, n_classes] = logits.dims();

        let ce = CrossEntropyLossConfig::new().init(&logits.device());
        let loss = ce.forward(
            logits.clone().reshape([batch_size * seq_len, n_classes]),
            target_ids.reshape([batch_size * seq_len]),
        );
        (loss, logits)
    }
}

/// Number of timesteps whose argmax equals the target label,
/// and the total number of timesteps compared.
pub fn timestep_hits<B: Backend>(logits: Tensor<B, 3>, target_ids: Tensor<B, 2, Int>) -> (usize, usize) {
    let [batch_size, seq_len, _] = logits.dims();
    // argmax(2) keeps the reduced dim: [batch, seq_len, 1]
    let predicted = logits.argmax(2).reshape([batch_size * seq_len]);
    let hits: i64 = predicted
        .equal(target_ids.reshape([batch_size * seq_len]))
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    (hits as usize, batch_size * seq_len)
}
