// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `transliterate`,
// and all their configurable flags.
//
// clap's derive macros generate --help text, missing-argument
// errors, and string → number conversion.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the transliteration model on a JSON corpus
    Train(TrainArgs),

    /// Transliterate Urdu text with a trained model
    Transliterate(TransliterateArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// JSON file holding an array of {"urdu": ..., "latin": ...} objects
    #[arg(long, default_value = "your_data.json")]
    pub corpus: PathBuf,

    /// Directory for the vocabulary files and the model/ checkpoint dir
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// JSON field holding the source (Urdu) text
    #[arg(long, default_value = "urdu")]
    pub source_field: String,

    /// JSON field holding the target (Latin) text
    #[arg(long, default_value = "latin")]
    pub target_field: String,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// Number of records per optimiser step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Fraction of records held out for validation
    #[arg(long, default_value_t = 0.2)]
    pub validation_split: f64,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of each character embedding
    #[arg(long, default_value_t = 64)]
    pub embedding_dim: usize,

    /// Hidden units per LSTM direction
    #[arg(long, default_value_t = 64)]
    pub hidden_size: usize,

    /// Number of stacked bidirectional LSTM layers
    #[arg(long, default_value_t = 2)]
    pub num_layers: usize,

    /// Seed for shuffling training batches each epoch
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Encode against the vocabulary files already in --out-dir
    /// instead of rebuilding them; unseen characters are an error
    #[arg(long)]
    pub reuse_vocab: bool,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            corpus:           a.corpus,
            out_dir:          a.out_dir,
            source_field:     a.source_field,
            target_field:     a.target_field,
            epochs:           a.epochs,
            batch_size:       a.batch_size,
            validation_split: a.validation_split,
            lr:               a.lr,
            embedding_dim:    a.embedding_dim,
            hidden_size:      a.hidden_size,
            num_layers:       a.num_layers,
            seed:             a.seed,
            reuse_vocab:      a.reuse_vocab,
        }
    }
}

/// All arguments for the `transliterate` command
#[derive(Args, Debug)]
pub struct TransliterateArgs {
    /// The Urdu text to transliterate
    #[arg(long)]
    pub text: String,

    /// Directory a previous `train` run wrote to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}
