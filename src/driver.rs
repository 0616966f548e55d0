//! Compilation pipeline and toolchain handoff
//!
//! [`compile_source`] runs tokenize, parse and generate over an in-memory
//! buffer. [`compile_file`] wraps the same stages with the file system side:
//! reading the source, writing the `.s` file and any requested dumps, then
//! handing the assembly to the system C driver (`cc`, or `$CC`) to assemble
//! and link.

use crate::codegen::{self, GenerationFault, Target};
use crate::dump;
use crate::parser::lexer::{Lexer, LexerConfig, TokenizeError};
use crate::parser::parser::{ParseError, Parser};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::sync::Once;
use tracing::{debug, info};

static LOGGING_INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_logging() {
    LOGGING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub target: Target,
    /// Skip to the next line after a lexical error instead of stopping
    pub keep_going: bool,
    pub dump_tokens: bool,
    pub dump_tree: bool,
    pub dump_dot: bool,
    /// Stop after writing the `.s` file
    pub assemble_only: bool,
    /// Output file, or a directory to place outputs in
    pub output: Option<PathBuf>,
    /// C driver used to assemble and link
    pub cc: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            target: Target::default(),
            keep_going: false,
            dump_tokens: false,
            dump_tree: false,
            dump_dot: false,
            assemble_only: false,
            output: None,
            cc: std::env::var("CC").unwrap_or_else(|_| "cc".to_string()),
        }
    }
}

impl CompileOptions {
    fn lexer_config(&self) -> LexerConfig {
        LexerConfig {
            break_on_error: !self.keep_going,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DumpKind {
    Tokens,
    Tree,
    Dot,
}

impl DumpKind {
    /// Suffix appended to the source path.
    pub fn extension(self) -> &'static str {
        match self {
            DumpKind::Tokens => "lex",
            DumpKind::Tree => "ast",
            DumpKind::Dot => "dot",
        }
    }
}

/// Everything produced from one source buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub assembly: String,
    pub dumps: Vec<(DumpKind, String)>,
}

/// Paths written by [`compile_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub assembly: PathBuf,
    /// Linked program; `None` with `-S`
    pub executable: Option<PathBuf>,
}

#[derive(Debug)]
pub enum CompileError {
    Tokenize(TokenizeError),
    Parse(ParseError),
    Generation(GenerationFault),
    /// Generation produced no text
    EmptyAssembly { file: String },
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// The C driver ran and reported failure
    Toolchain { program: String, status: ExitStatus },
}

impl CompileError {
    fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        CompileError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Tokenize(err) => write!(f, "{}", err),
            CompileError::Parse(err) => write!(f, "{}", err),
            CompileError::Generation(err) => write!(f, "Code generation failed: {}", err),
            CompileError::EmptyAssembly { file } => {
                write!(f, "No assembly generated for {}", file)
            }
            CompileError::Io {
                action,
                path,
                source,
            } => write!(f, "Cannot {} '{}': {}", action, path.display(), source),
            CompileError::Toolchain { program, status } => {
                write!(f, "'{}' exited with {}", program, status)
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Tokenize(err) => Some(err),
            CompileError::Parse(err) => Some(err),
            CompileError::Generation(err) => Some(err),
            CompileError::Io { source, .. } => Some(source),
            CompileError::EmptyAssembly { .. } | CompileError::Toolchain { .. } => None,
        }
    }
}

impl From<TokenizeError> for CompileError {
    fn from(err: TokenizeError) -> Self {
        CompileError::Tokenize(err)
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

impl From<GenerationFault> for CompileError {
    fn from(err: GenerationFault) -> Self {
        CompileError::Generation(err)
    }
}

/// Tokenize, parse and generate `source` under the identity `file`.
pub fn compile_source(
    source: &str,
    file: &str,
    options: &CompileOptions,
) -> Result<Artifacts, CompileError> {
    let mut dumps = Vec::new();
    let assembly = compile_with_dumps(source, file, options, &mut dumps)?;
    Ok(Artifacts { assembly, dumps })
}

/// Like [`compile_source`], but dumps land in `dumps` as each stage finishes,
/// so they survive a failure in a later stage. A failed tokenize still dumps
/// the tokens it found.
pub fn compile_with_dumps(
    source: &str,
    file: &str,
    options: &CompileOptions,
    dumps: &mut Vec<(DumpKind, String)>,
) -> Result<String, CompileError> {
    let mut lexer = Lexer::new(options.lexer_config());
    let tokenized = lexer.tokenize(source, file);

    if options.dump_tokens {
        if let Some(entry) = lexer.source(file) {
            dumps.push((DumpKind::Tokens, dump::tokens(entry)));
        }
    }
    tokenized?;

    let parser = Parser::new(&mut lexer, file);
    if let Some(err) = parser.error() {
        return Err(err.clone().into());
    }
    let entry = parser.source().ok_or_else(|| ParseError::NotTokenized {
        file: file.to_string(),
    })?;

    if let Some(tree) = parser.tree() {
        if options.dump_tree {
            dumps.push((DumpKind::Tree, dump::tree(tree)));
        }
        if options.dump_dot {
            dumps.push((DumpKind::Dot, dump::dot(tree, entry)));
        }
    }

    let assembly = codegen::generate(parser.tree(), entry, options.target)?;
    if assembly.is_empty() {
        return Err(CompileError::EmptyAssembly {
            file: file.to_string(),
        });
    }

    Ok(assembly)
}

/// Compile the file at `path`, then assemble and link it unless `-S` was given.
///
/// The toolchain inherits stdout and stderr, so its diagnostics reach the user
/// unchanged.
pub fn compile_file(path: &Path, options: &CompileOptions) -> Result<Outcome, CompileError> {
    let source = fs::read_to_string(path).map_err(|e| CompileError::io("read", path, e))?;
    let file = path.display().to_string();
    let mut dumps = Vec::new();
    let compiled = compile_with_dumps(&source, &file, options, &mut dumps);

    // Dumps are written even when a stage failed
    for (kind, contents) in &dumps {
        let dump_path = PathBuf::from(format!("{}.{}", file, kind.extension()));
        fs::write(&dump_path, contents).map_err(|e| CompileError::io("write", &dump_path, e))?;
        debug!(path = %dump_path.display(), "wrote dump");
    }
    let text = compiled?;

    let (assembly, executable) = output_paths(path, options);
    fs::write(&assembly, &text)
        .map_err(|e| CompileError::io("write", &assembly, e))?;
    info!(path = %assembly.display(), "wrote assembly");

    if options.assemble_only {
        return Ok(Outcome {
            assembly,
            executable: None,
        });
    }

    let mut command = Command::new(&options.cc);
    command
        .args(options.target.assembler_flags())
        .arg(&assembly)
        .arg("-o")
        .arg(&executable);
    debug!(?command, "invoking toolchain");

    let status = command
        .status()
        .map_err(|e| CompileError::io("run", Path::new(&options.cc), e))?;
    if !status.success() {
        return Err(CompileError::Toolchain {
            program: options.cc.clone(),
            status,
        });
    }

    Ok(Outcome {
        assembly,
        executable: Some(executable),
    })
}

/// Assembly and executable paths for `input`.
///
/// Without `-o` both sit next to the source (`prog.c` gives `prog.s` and
/// `prog`). A directory `-o` holds both; any other `-o` names the executable,
/// or the assembly file under `-S`.
pub fn output_paths(input: &Path, options: &CompileOptions) -> (PathBuf, PathBuf) {
    let stem = input.file_stem().unwrap_or(input.as_os_str());

    match &options.output {
        Some(dir) if dir.is_dir() => {
            let executable = dir.join(stem);
            (executable.with_extension("s"), executable)
        }
        Some(file) if options.assemble_only => (file.clone(), file.with_extension("")),
        Some(file) => (file.with_extension("s"), file.clone()),
        None => {
            let executable = input.with_file_name(stem);
            (executable.with_extension("s"), executable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::TokenKind;
    use pretty_assertions::assert_eq;

    fn options() -> CompileOptions {
        CompileOptions {
            cc: "cc".to_string(),
            ..CompileOptions::default()
        }
    }

    #[test]
    fn test_compile_source() {
        let artifacts = compile_source("int main(){return 2;}", "ok.c", &options()).unwrap();
        assert!(artifacts.assembly.contains("main:\n"));
        assert!(artifacts.dumps.is_empty());
    }

    #[test]
    fn test_compile_source_dumps() {
        let options = CompileOptions {
            dump_tokens: true,
            dump_tree: true,
            dump_dot: true,
            ..options()
        };
        let artifacts = compile_source("int main(){return 2;}", "ok.c", &options).unwrap();
        let kinds: Vec<DumpKind> = artifacts.dumps.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, vec![DumpKind::Tokens, DumpKind::Tree, DumpKind::Dot]);
    }

    #[test]
    fn test_tokenize_failure() {
        let err = compile_source("int main(){return @;}", "bad.c", &options()).unwrap_err();
        match err {
            CompileError::Tokenize(err) => assert_eq!(err.errors.len(), 1),
            other => panic!("expected tokenize error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_failure() {
        let err = compile_source("int main(){return 2}", "bad.c", &options()).unwrap_err();
        match err {
            CompileError::Parse(err) => assert_eq!(err.found(), Some(TokenKind::CloseBrace)),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_generation_failure() {
        let err = compile_source("int main(){return 1.5;}", "bad.c", &options()).unwrap_err();
        assert!(matches!(err, CompileError::Generation(_)));
        assert!(err.to_string().starts_with("Code generation failed"));
    }

    #[test]
    fn test_output_paths() {
        let input = Path::new("src/prog.c");
        assert_eq!(
            output_paths(input, &options()),
            (PathBuf::from("src/prog.s"), PathBuf::from("src/prog"))
        );

        let named = CompileOptions {
            output: Some(PathBuf::from("out/bin")),
            ..options()
        };
        assert_eq!(
            output_paths(input, &named),
            (PathBuf::from("out/bin.s"), PathBuf::from("out/bin"))
        );

        let assembly_only = CompileOptions {
            output: Some(PathBuf::from("out/listing.s")),
            assemble_only: true,
            ..options()
        };
        assert_eq!(output_paths(input, &assembly_only).0, PathBuf::from("out/listing.s"));
    }

    #[test]
    fn test_compile_file_assemble_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("two.c");
        fs::write(&input, "int main()\n{\n    return 2;\n}\n").unwrap();

        let options = CompileOptions {
            assemble_only: true,
            dump_tokens: true,
            ..options()
        };
        let outcome = compile_file(&input, &options).unwrap();

        assert_eq!(outcome.assembly, dir.path().join("two.s"));
        assert_eq!(outcome.executable, None);
        let asm = fs::read_to_string(&outcome.assembly).unwrap();
        assert!(asm.contains("    push $2\n"));
        let listing = fs::read_to_string(dir.path().join("two.c.lex")).unwrap();
        assert!(listing.starts_with("1: KwInt[int]"));
    }

    #[test]
    fn test_token_dump_survives_tokenize_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.c");
        fs::write(&input, "int main(){return @;}").unwrap();

        let options = CompileOptions {
            keep_going: true,
            dump_tokens: true,
            ..options()
        };
        let err = compile_file(&input, &options).unwrap_err();

        assert!(matches!(err, CompileError::Tokenize(_)));
        let listing = fs::read_to_string(dir.path().join("bad.c.lex")).unwrap();
        assert!(listing.starts_with("1: KwInt[int] Identifier[main]"));
        assert!(listing.contains("KwReturn[return]"));
        assert!(!dir.path().join("bad.s").exists());
    }

    #[test]
    fn test_tree_dump_survives_generation_failure() {
        let mut dumps = Vec::new();
        let options = CompileOptions {
            dump_tree: true,
            ..options()
        };
        let result = compile_with_dumps("int main(){return 1.5;}", "f.c", &options, &mut dumps);

        assert!(matches!(result, Err(CompileError::Generation(_))));
        assert_eq!(dumps.len(), 1);
        assert_eq!(dumps[0].0, DumpKind::Tree);
    }

    #[test]
    fn test_compile_file_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = compile_file(&dir.path().join("absent.c"), &options()).unwrap_err();
        assert!(matches!(err, CompileError::Io { action: "read", .. }));
    }

    #[test]
    fn test_missing_toolchain() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("two.c");
        fs::write(&input, "int main(){return 2;}").unwrap();

        let options = CompileOptions {
            cc: dir.path().join("no-such-cc").display().to_string(),
            ..options()
        };
        let err = compile_file(&input, &options).unwrap_err();
        assert!(matches!(err, CompileError::Io { action: "run", .. }));
        // The assembly is still left behind for inspection
        assert!(dir.path().join("two.s").exists());
    }
}
