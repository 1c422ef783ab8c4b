//! Deck text to [`Model`].

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use dyna_card::{is_comment_line, is_keyword_line, keyword_name};
use dyna_model::keywords::{Include, RawKeyword};
use dyna_model::{Keyword, KeywordRegistry, Model};
use log::{debug, warn};

use crate::error::{DeckError, Result};
use crate::options::{ParseFailurePolicy, ReadOptions, UnknownKeywordPolicy};

const KEYWORD_HEADER: &str = "*KEYWORD";
const END_MARKER: &str = "*END";

/// One `*NAME` line and the lines that follow it up to the next keyword line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    /// 1-based line number of the `*NAME` line.
    pub line: usize,
    pub lines: Vec<String>,
}

/// Splits deck text into keyword blocks.
///
/// `*KEYWORD` is dropped and `*END` stops the scan. Lines ahead of the first
/// keyword are ignored.
pub fn split_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (index, line) in text.lines().enumerate() {
        if !is_keyword_line(line) {
            match current.as_mut() {
                Some(block) => block.lines.push(line.to_string()),
                None if !line.trim().is_empty() && !is_comment_line(line) => {
                    warn!("line {}: ignoring data before the first keyword", index + 1);
                }
                None => {}
            }
            continue;
        }

        blocks.extend(current.take());
        let Some(name) = keyword_name(line) else {
            // A bare `*` separator line.
            continue;
        };
        if name == END_MARKER {
            break;
        }
        if name == KEYWORD_HEADER {
            continue;
        }
        current = Some(Block {
            name,
            line: index + 1,
            lines: Vec::new(),
        });
    }
    blocks.extend(current);
    blocks
}

/// Reads decks into models using the keywords of a registry.
#[derive(Debug, Clone)]
pub struct DeckReader<'r> {
    registry: &'r KeywordRegistry,
    options: ReadOptions,
}

/// Files currently being read, outermost first.
#[derive(Debug, Default)]
struct IncludeStack {
    files: Vec<PathBuf>,
    active: HashSet<PathBuf>,
}

impl IncludeStack {
    fn push(&mut self, path: PathBuf) -> Result<()> {
        if self.active.contains(&path) {
            let mut files = self.files.clone();
            files.push(path);
            return Err(DeckError::IncludeCycle { files });
        }
        self.active.insert(path.clone());
        self.files.push(path);
        Ok(())
    }

    fn pop(&mut self) {
        if let Some(path) = self.files.pop() {
            self.active.remove(&path);
        }
    }
}

impl<'r> DeckReader<'r> {
    pub fn new(registry: &'r KeywordRegistry) -> Self {
        Self {
            registry,
            options: ReadOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Reads deck text. Relative `*INCLUDE` paths resolve against the
    /// working directory.
    pub fn read_str(&self, text: &str) -> Result<Model> {
        let mut model = Model::new();
        let mut stack = IncludeStack::default();
        self.read_text(text, None, &mut model, &mut stack)?;
        Ok(model)
    }

    /// Reads a deck file. Relative `*INCLUDE` paths resolve against the
    /// directory of the file that names them.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Model> {
        let mut model = Model::new();
        let mut stack = IncludeStack::default();
        self.read_path(path.as_ref(), &mut model, &mut stack)?;
        Ok(model)
    }

    fn read_path(&self, path: &Path, model: &mut Model, stack: &mut IncludeStack) -> Result<()> {
        stack.push(normalize_path(path))?;
        let result = fs::read_to_string(path)
            .map_err(|err| DeckError::read(path, err))
            .and_then(|text| self.read_text(&text, Some(path), model, stack));
        stack.pop();
        result
    }

    fn read_text(
        &self,
        text: &str,
        file: Option<&Path>,
        model: &mut Model,
        stack: &mut IncludeStack,
    ) -> Result<()> {
        for block in split_blocks(text) {
            let Some(keyword) = self.parse_block(&block, file)? else {
                continue;
            };
            if self.options.expand_includes
                && let Some(include) = keyword.as_any().downcast_ref::<Include>()
            {
                self.expand(include, &block, file, model, stack)?;
                continue;
            }
            model.add_keyword(keyword);
        }
        Ok(())
    }

    fn parse_block(&self, block: &Block, file: Option<&Path>) -> Result<Option<Box<dyn Keyword>>> {
        let Some(mut keyword) = self.registry.create(&block.name) else {
            return Ok(match self.options.unknown_keywords {
                UnknownKeywordPolicy::Preserve => {
                    debug!("line {}: keeping unknown keyword {}", block.line, block.name);
                    Some(raw(block))
                }
                UnknownKeywordPolicy::Skip => {
                    debug!("line {}: skipping unknown keyword {}", block.line, block.name);
                    None
                }
            });
        };

        match keyword.parse(&block.lines, self.options.format) {
            Ok(()) => Ok(Some(keyword)),
            Err(source) => match self.options.parse_failures {
                ParseFailurePolicy::Abort => Err(DeckError::Keyword {
                    file: file.map(Path::to_path_buf),
                    line: block.line,
                    name: block.name.clone(),
                    source,
                }),
                ParseFailurePolicy::PreserveRaw => {
                    warn!("line {}: {source}; keeping the block verbatim", block.line);
                    Ok(Some(raw(block)))
                }
            },
        }
    }

    fn expand(
        &self,
        include: &Include,
        block: &Block,
        file: Option<&Path>,
        model: &mut Model,
        stack: &mut IncludeStack,
    ) -> Result<()> {
        let base_dir = file
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."));
        for name in &include.files {
            let path = resolve_include_path(base_dir, name);
            if !path.is_file() {
                return Err(DeckError::MissingInclude {
                    file: file.map(Path::to_path_buf),
                    line: block.line,
                    path,
                });
            }
            debug!("expanding include {}", path.display());
            self.read_path(&path, model, stack)?;
        }
        Ok(())
    }
}

fn raw(block: &Block) -> Box<dyn Keyword> {
    Box::new(RawKeyword::new(&block.name, block.lines.clone()))
}

fn resolve_include_path(base_dir: &Path, include: &str) -> PathBuf {
    let cleaned = include.trim().trim_matches('"').trim_matches('\'');
    let raw_path = Path::new(cleaned);
    let joined = if raw_path.is_absolute() {
        raw_path.to_path_buf()
    } else {
        base_dir.join(raw_path)
    };
    normalize_path(&joined)
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyna_card::Format;
    use dyna_model::keywords::{ControlTermination, Node, Part};

    const DECK: &str = "\
$ generated
*KEYWORD
*CONTROL_TERMINATION
$#  endtim
      10.0
*NODE
       1             0.0             0.0             0.0
       2             1.0             0.0             0.0
*BOUNDARY_SPC_NODE
$ kept verbatim
         1         0         1
*END
*NODE
       3             0.0             0.0             0.0
";

    #[test]
    fn splits_blocks_and_stops_at_end() {
        let blocks = split_blocks(DECK);
        let names: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["*CONTROL_TERMINATION", "*NODE", "*BOUNDARY_SPC_NODE"]);
        assert_eq!(blocks[1].line, 6);
        assert_eq!(blocks[2].lines.len(), 2);
    }

    #[test]
    fn reads_typed_and_unknown_keywords() {
        let registry = KeywordRegistry::with_defaults();
        let model = DeckReader::new(&registry).read_str(DECK).unwrap();
        assert_eq!(model.len(), 3);
        assert_eq!(
            model.first_of_type::<ControlTermination>().unwrap().endtim,
            10.0
        );
        assert_eq!(model.first_of_type::<Node>().unwrap().nodes.len(), 2);
        let raw = model.first_of_type::<RawKeyword>().unwrap();
        assert_eq!(raw.name(), "*BOUNDARY_SPC_NODE");
        assert_eq!(raw.lines[0], "$ kept verbatim");
    }

    #[test]
    fn skip_policy_drops_unknown_blocks() {
        let registry = KeywordRegistry::with_defaults();
        let model = DeckReader::new(&registry)
            .with_options(ReadOptions {
                unknown_keywords: UnknownKeywordPolicy::Skip,
                ..ReadOptions::default()
            })
            .read_str(DECK)
            .unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(model.count_of_type::<RawKeyword>(), 0);
    }

    #[test]
    fn parse_failure_policies() {
        let text = "*PART\nLonely heading\n*NODE\n       1\n";
        let registry = KeywordRegistry::with_defaults();

        let err = DeckReader::new(&registry).read_str(text).unwrap_err();
        match err {
            DeckError::Keyword { line, name, .. } => {
                assert_eq!(line, 1);
                assert_eq!(name, "*PART");
            }
            other => panic!("unexpected error: {other}"),
        }

        let model = DeckReader::new(&registry)
            .with_options(ReadOptions {
                parse_failures: ParseFailurePolicy::PreserveRaw,
                ..ReadOptions::default()
            })
            .read_str(text)
            .unwrap();
        assert_eq!(model.count_of_type::<Part>(), 0);
        assert_eq!(model.first_of_type::<RawKeyword>().unwrap().name(), "*PART");
        assert_eq!(model.count_of_type::<Node>(), 1);
    }

    #[test]
    fn include_kept_when_expansion_is_off() {
        let registry = KeywordRegistry::with_defaults();
        let model = DeckReader::new(&registry)
            .with_options(ReadOptions {
                expand_includes: false,
                format: Format::Standard,
                ..ReadOptions::default()
            })
            .read_str("*INCLUDE\nmissing.k\n")
            .unwrap();
        assert_eq!(
            model.first_of_type::<Include>().unwrap().files,
            vec!["missing.k".to_string()]
        );
    }

    #[test]
    fn ignores_text_before_first_keyword() {
        let blocks = split_blocks("title line\n\n*NODE\n");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].lines.is_empty());
    }
}
