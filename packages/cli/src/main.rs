//! `sbolg`: command-line interface for sbol-graph documents.
//!
//! Provides four subcommands for working with N-Triples documents:
//!
//! - **`summary`**: print the grouped document summary, or its counts as JSON.
//! - **`validate`**: report cardinality, rule and URI-compliance issues.
//! - **`show`**: render one object and its owned subtree.
//! - **`create`**: add a new top-level object and rewrite the file.
//!
//! Every subcommand that reads accepts `-` for stdin. Identity settings come
//! from flags, falling back to `SBOL_NAMESPACE`, `SBOL_COMPLIANT_URIS`,
//! `SBOL_TYPED_URIS` and `SBOL_VERSION`. Logs go to stderr and are filtered by
//! `RUST_LOG` (default `sbol_graph=info`).

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use sbol_graph::{kinds, render, Config, Document};

/// sbolg: inspect and extend SBOL documents
#[derive(Parser)]
#[command(name = "sbolg", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    identity: IdentityArgs,

    #[command(subcommand)]
    command: Command,
}

/// Identity settings. Each flag overrides the matching `SBOL_*` variable read
/// by [`Config::from_env`].
#[derive(Args)]
struct IdentityArgs {
    /// Namespace prefixed to generated top-level identities [env: SBOL_NAMESPACE].
    #[arg(long, global = true, value_name = "URI")]
    namespace: Option<String>,

    /// Compose identities from namespace, type, display id and version
    /// [env: SBOL_COMPLIANT_URIS].
    #[arg(long, global = true, value_name = "BOOL", action = clap::ArgAction::Set)]
    compliant_uris: Option<bool>,

    /// Insert the type name after the namespace in generated identities
    /// [env: SBOL_TYPED_URIS].
    #[arg(long, global = true, value_name = "BOOL", action = clap::ArgAction::Set)]
    typed_uris: Option<bool>,

    /// Version given to newly created objects, empty for none [env: SBOL_VERSION].
    #[arg(long = "object-version", global = true, value_name = "VERSION")]
    object_version: Option<String>,
}

impl IdentityArgs {
    fn config(&self) -> Config {
        let mut config = Config::from_env().unwrap_or_else(|e| fatal(&e.to_string()));
        if let Some(ns) = &self.namespace {
            config = config.with_namespace(ns.as_str());
        }
        if let Some(on) = self.compliant_uris {
            config = config.with_compliant_uris(on);
        }
        if let Some(on) = self.typed_uris {
            config = config.with_typed_uris(on);
        }
        if let Some(v) = &self.object_version {
            config = config.with_default_version(v.as_str());
        }
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print a summary of a document grouped by category.
    ///
    /// Pass `-` as FILE to read from stdin.
    Summary {
        /// Path to an N-Triples file, or `-` for stdin.
        file: PathBuf,

        /// Print the counts as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Check a document's cardinality bounds, value rules and URI compliance.
    ///
    /// Exits 0 when there are no issues, 1 otherwise.
    Validate {
        /// Path to an N-Triples file, or `-` for stdin.
        file: PathBuf,

        /// Print the issues as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Render one object, found by identity or display id.
    Show {
        /// Path to an N-Triples file, or `-` for stdin.
        file: PathBuf,

        /// Identity or display id of the object.
        key: String,
    },

    /// Create a top-level object and write the document back.
    ///
    /// A missing FILE starts a new document. With `-` the document is read
    /// from stdin and written to stdout.
    ///
    /// Examples:
    ///   sbolg create design.nt --kind ModuleDefinition --id toggle
    ///   sbolg --namespace http://lab.example create - --kind Sequence --id s1 < in.nt
    Create {
        /// Path to an N-Triples file, or `-` for stdin/stdout.
        file: PathBuf,

        /// Record type name, e.g. ComponentDefinition.
        #[arg(short = 'k', long, value_name = "KIND")]
        kind: String,

        /// Display id (or a full URI when compliant URIs are off).
        #[arg(short = 'i', long, value_name = "ID")]
        id: String,

        /// Optional human-readable name.
        #[arg(short = 'n', long, value_name = "TEXT")]
        name: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sbol_graph=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.identity.config();
    tracing::debug!(?config, "identity settings");

    match cli.command {
        Command::Summary { file, json } => {
            let doc = load(&file, config);
            if json {
                let summary = render::summarize(&doc);
                println!("{}", to_json(&summary));
            } else {
                print!("{}", doc.summary());
            }
        }

        Command::Validate { file, json } => {
            let doc = load(&file, config);
            let issues = doc.validate();
            if json {
                println!("{}", to_json(&issues));
            } else if issues.is_empty() {
                println!("valid ({} objects)", doc.size());
            } else {
                for issue in &issues {
                    eprintln!("issue: {issue}");
                }
            }
            if !issues.is_empty() {
                process::exit(1);
            }
        }

        Command::Show { file, key } => {
            let doc = load(&file, config);
            match doc.find(&key) {
                Some(object) => print!("{}", render::render_object(object)),
                None => fatal(&format!("no object matches {key:?}")),
            }
        }

        Command::Create {
            file,
            kind,
            id,
            name,
        } => {
            let kind = kinds::by_name(&kind).unwrap_or_else(|| {
                let known: Vec<&str> = kinds::TOP_LEVEL.iter().map(|k| k.name).collect();
                fatal(&format!(
                    "unknown kind {kind:?}; expected one of: {}",
                    known.join(", ")
                ))
            });
            let mut doc = if is_stdio(&file) || file.exists() {
                load(&file, config)
            } else {
                Document::with_config(config)
            };
            let identity = doc
                .create(kind, &id)
                .unwrap_or_else(|e| fatal(&format!("cannot create {id:?}: {e}")));
            if let Some(name) = name {
                doc.modify(identity.as_str(), |object| object.set_name(&name))
                    .unwrap_or_else(|e| fatal(&format!("cannot name {identity}: {e}")));
            }
            if is_stdio(&file) {
                print!("{}", doc.write_string());
            } else {
                doc.write(&file)
                    .unwrap_or_else(|e| fatal(&e.to_string()));
                println!("{identity}");
            }
        }
    }
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

/// Read and parse a document from a file, or stdin when the path is `"-"`.
fn load(path: &Path, config: Config) -> Document {
    let text = if is_stdio(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {e}")));
        buf
    } else {
        fs::read_to_string(path)
            .unwrap_or_else(|e| fatal(&format!("failed to read {}: {e}", path.display())))
    };
    let mut doc = Document::with_config(config);
    doc.read_string(&text)
        .unwrap_or_else(|e| fatal(&format!("failed to parse {}: {e}", path.display())));
    doc
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| fatal(&format!("failed to encode JSON: {e}")))
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("sbolg: {msg}");
    process::exit(2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment_settings() {
        let cli = Cli::try_parse_from([
            "sbolg",
            "--typed-uris",
            "false",
            "--namespace",
            "http://lab.example",
            "summary",
            "-",
        ])
        .unwrap();
        let config = cli.identity.config();
        assert_eq!(config.namespace(), Some("http://lab.example"));
        assert!(!config.typed_uris);
        assert!(config.compliant_uris);
    }
}
