// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
//
//   1. `train`         — preprocess the corpus and train
//   2. `transliterate` — run a trained model on one string
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs, TransliterateArgs};

use crate::domain::traits::TextTransliterator;

#[derive(Parser, Debug)]
#[command(
    name = "urdu-translit",
    version,
    about = "Train a character-level BiLSTM to transliterate Urdu into Latin script."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)         => run_train(args),
            Commands::Transliterate(args) => run_transliterate(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on corpus: {}", args.corpus.display());

    let use_case = TrainUseCase::new(args.into());
    let history  = use_case.execute()?;

    println!("Training complete after {} epochs. Model and vocabularies saved.", history.epochs());
    Ok(())
}

fn run_transliterate(args: TransliterateArgs) -> Result<()> {
    use crate::application::transliterate_use_case::TransliterateUseCase;

    let use_case = TransliterateUseCase::new(&args.out_dir)?;
    let latin    = use_case.transliterate(&args.text)?;
    println!("{}", latin);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["urdu-translit", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: TrainConfig = args.into();

        assert_eq!(cfg.corpus.to_str(), Some("your_data.json"));
        assert_eq!(cfg.source_field, "urdu");
        assert_eq!(cfg.target_field, "latin");
        assert_eq!(cfg.epochs, 50);
        assert_eq!(cfg.batch_size, 32);
        assert_eq!(cfg.validation_split, 0.2);
        assert!(!cfg.reuse_vocab);
    }

    #[test]
    fn test_train_overrides() {
        let cli = Cli::try_parse_from([
            "urdu-translit", "train",
            "--corpus", "pairs.json",
            "--epochs", "3",
            "--num-layers", "1",
            "--reuse-vocab",
        ])
        .unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        assert_eq!(args.epochs, 3);
        assert_eq!(args.num_layers, 1);
        assert!(args.reuse_vocab);
    }

    #[test]
    fn test_transliterate_requires_text() {
        assert!(Cli::try_parse_from(["urdu-translit", "transliterate"]).is_err());
        let cli = Cli::try_parse_from(["urdu-translit", "transliterate", "--text", "سلام"]).unwrap();
        assert!(matches!(cli.command, Commands::Transliterate(ref a) if a.text == "سلام"));
    }
}
