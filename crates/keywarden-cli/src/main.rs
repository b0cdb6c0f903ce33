//! Keywarden CLI - dispatch layer for the custodial wallet
//!
//! Decodes arguments into typed inputs, runs exactly one service call, and
//! translates the outcome to the two boundary effects: emit (print the
//! result) or abort (print the error and exit nonzero).
//!
//! # Quick Start
//!
//! ```bash
//! keywarden create treasury
//! keywarden add-user root admin
//! keywarden add-key "master key" ed25519
//! keywarden list-keys root
//! keywarden sign <keyId> "hello"
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use keywarden_sdk::{
    AddKeyInput, AddUserInput, CreateWalletInput, DecryptInput, EncryptInput, KeyAlgorithm,
    KeyDescriptor, ListKeysInput, RemoveKeyInput, RemoveUserInput, RenameWalletInput, ResetInput,
    Role, SignInput, SledWalletStore, VerifyInput, WalletService,
};

/// Keywarden - custodial multi-user, multi-key wallet
#[derive(Parser)]
#[command(name = "keywarden")]
#[command(author = "Keywarden Contributors")]
#[command(version)]
#[command(about = "Hold keys for a set of users: sign, verify, encrypt, decrypt", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Wallet data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the wallet (one-time)
    Create {
        name: String,
        /// Reserved creation flag, stored verbatim
        #[arg(long)]
        hidden_on_ui: bool,
        /// Reserved external reference id, stored verbatim
        #[arg(long)]
        customer_ref_id: Option<String>,
        /// Reserved creation flag, stored verbatim
        #[arg(long)]
        auto_fuel: bool,
    },

    /// Rename the wallet
    Rename { new_name: String },

    /// Replace the entire key set (all-or-nothing)
    Reset {
        /// Replacement keys as <type>:<description>
        #[arg(value_parser = parse_descriptor)]
        keys: Vec<KeyDescriptor>,
    },

    /// Add a user (role: admin or member)
    AddUser {
        user_id: String,
        #[arg(value_parser = parse_role)]
        role: Role,
    },

    /// Remove a user
    RemoveUser { user_id: String },

    /// Add a key (type: ed25519, ecdsa-secp256k1, aes256-gcm, chacha20-poly1305)
    AddKey {
        description: String,
        #[arg(value_parser = parse_algorithm)]
        key_type: KeyAlgorithm,
    },

    /// Remove a key
    RemoveKey { key_id: String },

    /// List key metadata visible to the given user
    ListKeys { user: String },

    /// Sign a payload; emits the hex signature
    Sign { key_id: String, payload: String },

    /// Verify a signature over a payload
    Verify {
        key_id: String,
        payload: String,
        signature: String,
    },

    /// Encrypt a payload; emits hex ciphertext
    Encrypt { key_id: String, payload: String },

    /// Decrypt ciphertext; emits the plaintext
    Decrypt { key_id: String, ciphertext: String },
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse().map_err(|e: keywarden_sdk::WalletError| e.to_string())
}

fn parse_algorithm(s: &str) -> Result<KeyAlgorithm, String> {
    s.parse().map_err(|e: keywarden_sdk::WalletError| e.to_string())
}

fn parse_descriptor(s: &str) -> Result<KeyDescriptor, String> {
    let (key_type, description) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <type>:<description>, got '{s}'"))?;
    Ok(KeyDescriptor::new(description, parse_algorithm(key_type)?))
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{} {}", "✗".bright_red(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => dirs_next::data_dir()
            .context("no platform data directory; pass --data-dir")?
            .join("keywarden"),
    };
    let store = SledWalletStore::open(&data_dir)
        .with_context(|| format!("failed to open wallet store at {}", data_dir.display()))?;
    let service = WalletService::new(store);

    match cli.command {
        Commands::Create {
            name,
            hidden_on_ui,
            customer_ref_id,
            auto_fuel,
        } => {
            service.create_wallet(&CreateWalletInput {
                name: name.clone(),
                hidden_on_ui,
                customer_ref_id,
                auto_fuel,
            })?;
            println!("{} Wallet created: {}", "✓".bright_green(), name.bright_cyan());
        }

        Commands::Rename { new_name } => {
            service.rename_wallet(&RenameWalletInput {
                new_name: new_name.clone(),
            })?;
            println!("{} Wallet renamed: {}", "✓".bright_green(), new_name.bright_cyan());
        }

        Commands::Reset { keys } => {
            let key_ids = service.reset(&ResetInput { keys })?;
            println!(
                "{} Key set reset ({} keys)",
                "✓".bright_green(),
                key_ids.len()
            );
            for key_id in key_ids {
                println!("    {}", key_id.bright_yellow());
            }
        }

        Commands::AddUser { user_id, role } => {
            service.add_user(&AddUserInput {
                user_id: user_id.clone(),
                role,
            })?;
            println!(
                "{} User added: {} ({})",
                "✓".bright_green(),
                user_id.bright_cyan(),
                role
            );
        }

        Commands::RemoveUser { user_id } => {
            service.remove_user(&RemoveUserInput {
                user_id: user_id.clone(),
            })?;
            println!("{} User removed: {}", "✓".bright_green(), user_id.bright_cyan());
        }

        Commands::AddKey {
            description,
            key_type,
        } => {
            let key_id = service.add_key(&AddKeyInput {
                description,
                algorithm: key_type,
            })?;
            println!("{}", key_id);
        }

        Commands::RemoveKey { key_id } => {
            service.remove_key(&RemoveKeyInput {
                key_id: key_id.clone(),
            })?;
            println!("{} Key removed: {}", "✓".bright_green(), key_id.bright_yellow());
        }

        Commands::ListKeys { user } => {
            let keys = service.list_keys(&ListKeysInput { user })?;
            for key in keys {
                println!(
                    "{}  {}  {}",
                    key.key_id.bright_yellow(),
                    key.algorithm,
                    key.description
                );
            }
        }

        Commands::Sign { key_id, payload } => {
            let signature = service.sign(&SignInput { key_id, payload })?;
            println!("{signature}");
        }

        Commands::Verify {
            key_id,
            payload,
            signature,
        } => {
            let verified = service.verify(&VerifyInput {
                key_id,
                payload,
                signature,
            })?;
            if !verified {
                anyhow::bail!("Failed to verify");
            }
            println!("verified");
        }

        Commands::Encrypt { key_id, payload } => {
            let ciphertext = service.encrypt(&EncryptInput { key_id, payload })?;
            println!("{ciphertext}");
        }

        Commands::Decrypt { key_id, ciphertext } => {
            let plaintext = service.decrypt(&DecryptInput { key_id, ciphertext })?;
            println!("{plaintext}");
        }
    }

    Ok(())
}
