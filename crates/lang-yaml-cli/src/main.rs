use anyhow::{Context, Result, bail};
use lang_yaml_config::Config;
use lang_yaml_engine::{
    Document, FoldRange, Language, MixedTree, PlainText, YamlLanguage, yaml_frontmatter,
};
use lang_yaml_syntax::SyntaxNode;
use std::{env, path::PathBuf, process};

const USAGE: &str =
    "Usage: lang-yaml <regions|folds|indent> <file> [--frontmatter] [--config <path>]
       lang-yaml config [--config <path>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Regions,
    Folds,
    Indent,
    Config,
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    command: Command,
    file: Option<PathBuf>,
    frontmatter: bool,
    config_path: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut args = args.iter();
    let command = match args.next().map(String::as_str) {
        Some("regions") => Command::Regions,
        Some("folds") => Command::Folds,
        Some("indent") => Command::Indent,
        Some("config") => Command::Config,
        Some(other) => bail!("Unknown command '{other}'"),
        None => bail!("No command given"),
    };

    let mut file = None;
    let mut frontmatter = false;
    let mut config_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frontmatter" => frontmatter = true,
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("Unknown option '{flag}'"),
            path if file.is_none() => file = Some(PathBuf::from(path)),
            extra => bail!("Unexpected argument '{extra}'"),
        }
    }

    if command != Command::Config && file.is_none() {
        bail!("No file given");
    }

    Ok(Options {
        command,
        file,
        frontmatter,
        config_path,
    })
}

fn load_config(config_path: Option<&PathBuf>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Config::expand_path(path).unwrap_or_else(|| path.clone()),
        None => Config::config_path(),
    };
    log::debug!("Config path: {}", path.display());
    Ok(Config::load_or_default(&path)?)
}

/// A parsed file: either plain YAML or a frontmatter document.
enum Parsed {
    Yaml(SyntaxNode),
    Mixed(MixedTree),
}

impl Parsed {
    fn new(text: &str, frontmatter: bool) -> Self {
        if frontmatter {
            Parsed::Mixed(yaml_frontmatter(PlainText).language.parse(text))
        } else {
            Parsed::Yaml(SyntaxNode::new_root(YamlLanguage.parse(text)))
        }
    }

    fn indent(&self, doc: &Document, pos: usize, unit: u32) -> Option<u32> {
        match self {
            Parsed::Yaml(tree) => YamlLanguage.indent(tree, doc, pos, unit),
            Parsed::Mixed(tree) => tree.indent_for(doc, pos, unit),
        }
    }

    fn fold_ranges(&self, doc: &Document) -> Vec<FoldRange> {
        match self {
            Parsed::Yaml(tree) => YamlLanguage.fold_ranges(tree, doc),
            Parsed::Mixed(tree) => tree.fold_ranges(doc),
        }
    }
}

fn render_regions(doc: &Document) -> String {
    let tree = yaml_frontmatter(PlainText).language.parse(&doc.text());
    tree.regions()
        .iter()
        .map(|region| {
            format!(
                "{:?} {}..{}\n",
                region.kind, region.range.start, region.range.end
            )
        })
        .collect()
}

fn render_folds(doc: &Document, parsed: &Parsed) -> String {
    parsed
        .fold_ranges(doc)
        .iter()
        .map(|fold| {
            let first = doc.line_at(fold.from).number;
            let last = doc.line_at(fold.to).number;
            format!("{}..{} lines {first}-{last}\n", fold.from, fold.to)
        })
        .collect()
}

/// The indentation suggested for a new line typed at the end of each line.
fn render_indents(doc: &Document, parsed: &Parsed, unit: u32) -> String {
    (1..=doc.line_count())
        .filter_map(|number| doc.line(number))
        .map(|line| match parsed.indent(doc, line.to, unit) {
            Some(indent) => format!("{}: {indent}\n", line.number),
            None => format!("{}: -\n", line.number),
        })
        .collect()
}

fn run(options: &Options, config: &Config) -> Result<String> {
    let Some(file) = &options.file else {
        return Ok(config.to_toml());
    };

    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read '{}'", file.display()))?;
    let doc = Document::from_bytes(&bytes)
        .with_context(|| format!("Failed to load '{}'", file.display()))?
        .with_tab_size(config.tab_size);

    let output = match options.command {
        Command::Regions => render_regions(&doc),
        Command::Folds => render_folds(&doc, &Parsed::new(&doc.text(), options.frontmatter)),
        Command::Indent => render_indents(
            &doc,
            &Parsed::new(&doc.text(), options.frontmatter),
            config.indent_unit,
        ),
        Command::Config => config.to_toml(),
    };
    Ok(output)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args[1..]) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    let config = load_config(options.config_path.as_ref())?;
    log::debug!("Using {config:?}");

    print!("{}", run(&options, &config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn options(command: Command, file: PathBuf, frontmatter: bool) -> Options {
        Options {
            command,
            file: Some(file),
            frontmatter,
            config_path: None,
        }
    }

    #[test]
    fn parses_command_file_and_flags() {
        let parsed = parse_args(&args(&[
            "folds",
            "notes.md",
            "--frontmatter",
            "--config",
            "/tmp/c.toml",
        ]))
        .unwrap();
        assert_eq!(
            parsed,
            Options {
                command: Command::Folds,
                file: Some(PathBuf::from("notes.md")),
                frontmatter: true,
                config_path: Some(PathBuf::from("/tmp/c.toml")),
            }
        );
    }

    #[test]
    fn config_command_needs_no_file() {
        let parsed = parse_args(&args(&["config"])).unwrap();
        assert_eq!(parsed.command, Command::Config);
        assert_eq!(parsed.file, None);
    }

    #[test]
    fn rejects_bad_arguments() {
        for bad in [
            vec![],
            vec!["explode", "a.yaml"],
            vec!["indent"],
            vec!["indent", "a.yaml", "b.yaml"],
            vec!["indent", "a.yaml", "--verbose"],
            vec!["indent", "a.yaml", "--config"],
        ] {
            assert!(parse_args(&args(&bad)).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn prints_regions() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "note.md", b"---\ntitle: x\n---\nBody text");

        let output = run(&options(Command::Regions, file, false), &Config::default()).unwrap();

        assert_eq!(
            output,
            "Metadata 0..4\nFrontmatter 4..13\nMetadata 13..17\nBody 17..26\n"
        );
    }

    #[test]
    fn prints_indents_per_line() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "c.yaml", b"a:\n  b: |\n    x\n");
        let config = Config {
            indent_unit: 4,
            tab_size: 4,
        };

        let output = run(&options(Command::Indent, file, false), &config).unwrap();

        assert_eq!(output, "1: 0\n2: 6\n3: 4\n4: -\n");
    }

    #[test]
    fn prints_folds_of_frontmatter_documents() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "n.md", b"---\nmeta:\n  a: 1\n---\nBody\n");

        let output = run(&options(Command::Folds, file, true), &Config::default()).unwrap();

        assert_eq!(output, "9..16 lines 2-3\n");
    }

    #[test]
    fn config_command_prints_toml() {
        let parsed = parse_args(&args(&["config"])).unwrap();
        let output = run(&parsed, &Config::default()).unwrap();
        assert_eq!(output, "indent_unit = 2\ntab_size = 4\n");
    }

    #[test]
    fn missing_and_invalid_files_are_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.yaml");
        let err = run(&options(Command::Folds, missing, false), &Config::default()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));

        let binary = write_file(&dir, "bin.yaml", &[0xff, 0xfe]);
        let err = run(&options(Command::Folds, binary, false), &Config::default()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load"));
    }

    #[test]
    fn explicit_config_file_is_used() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "config.toml", b"indent_unit = 8\n");

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.indent_unit, 8);
        assert_eq!(config.tab_size, 4);
    }
}
