use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use gumdrop::Options;
use serde::Serialize;

use fulaspell::alphabet::Alphabet;
use fulaspell::distance::{min_edit_distance, EditCosts, EditDistance, EditOp};
use fulaspell::speller::suggestion::Suggestion;
use fulaspell::speller::{Fallback, ProbabilitySpeller, Speller, SpellerConfig, Tier};
use fulaspell::tokenizer::Tokenize;
use fulaspell::vocabulary::VocabularyModel;

trait OutputWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool);
    fn write_suggestions(&mut self, word: &str, tier: Tier, suggestions: &[Suggestion]);
    fn finish(&mut self) -> anyhow::Result<()>;
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        println!(
            "Input: {}\t\t[{}]",
            &word,
            if is_correct { "CORRECT" } else { "INCORRECT" }
        );
    }

    fn write_suggestions(&mut self, _word: &str, tier: Tier, suggestions: &[Suggestion]) {
        if tier == Tier::Unknown {
            println!("(no known word within two edits)");
        }
        for sugg in suggestions {
            println!("{}\t\t{:.6}", sugg.value, sugg.probability);
        }
        println!();
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
struct SuggestionRequest {
    word: String,
    is_correct: bool,
    tier: Option<Tier>,
    suggestions: Vec<Suggestion>,
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<SuggestionRequest>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        self.results.push(SuggestionRequest {
            word: word.to_owned(),
            is_correct,
            tier: None,
            suggestions: vec![],
        });
    }

    fn write_suggestions(&mut self, _word: &str, tier: Tier, suggestions: &[Suggestion]) {
        if let Some(last) = self.results.last_mut() {
            last.tier = Some(tier);
            last.suggestions = suggestions.to_vec();
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

fn run(
    speller: Arc<ProbabilitySpeller>,
    words: Vec<String>,
    writer: &mut dyn OutputWriter,
    is_always_suggesting: bool,
    suggest_cfg: &SpellerConfig,
) -> anyhow::Result<()> {
    for word in words {
        let is_correct = speller.clone().is_correct(&word);
        writer.write_correction(&word, is_correct);

        if is_always_suggesting || !is_correct {
            let corrections = speller.corrections_with_config(&word, suggest_cfg)?;
            writer.write_suggestions(&word, corrections.tier, &corrections.suggestions);
        }
    }

    writer.finish()
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "get suggestions for provided input")]
    Suggest(SuggestArgs),

    #[options(help = "weighted minimum edit distance between two words")]
    Distance(DistanceArgs),

    #[options(help = "print input in word-separated tokenized form")]
    Tokenize(TokenizeArgs),

    #[options(help = "print the most frequent words of a corpus")]
    Vocab(VocabArgs),
}

#[derive(Debug, Options)]
struct SuggestArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "UTF-8 text corpus to build the vocabulary from", required)]
    corpus: PathBuf,

    #[options(help = "letters used for substitution and insertion (default: Fula)")]
    alphabet: Option<String>,

    #[options(no_short, help = "JSON speller config overriding the defaults")]
    config: Option<PathBuf>,

    #[options(short = "S", help = "always show suggestions even if word is correct")]
    always_suggest: bool,

    #[options(help = "maximum number of results")]
    nbest: Option<usize>,

    #[options(no_short, long = "no-transpose", help = "disables adjacent transpositions")]
    disable_transpose: bool,

    #[options(
        no_short,
        long = "no-fallback",
        help = "return nothing instead of the input when no known word is found"
    )]
    disable_fallback: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct DistanceArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "cost of one insertion (default: 1)")]
    insert: Option<i64>,

    #[options(help = "cost of one deletion (default: 1)")]
    delete: Option<i64>,

    #[options(help = "cost of one replacement (default: 2)")]
    replace: Option<i64>,

    #[options(short = "m", long = "matrix", help = "print the full cost matrix")]
    show_matrix: bool,

    #[options(short = "p", long = "path", help = "print the cheapest edit path")]
    show_path: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "source and target words")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "w", long = "words", help = "show words only")]
    is_words_only: bool,

    #[options(free, help = "text to be tokenized")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct VocabArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "UTF-8 text corpus to build the vocabulary from", required)]
    corpus: PathBuf,

    #[options(help = "number of words to show (default: 20)")]
    top: Option<usize>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,
}

fn read_stdin() -> anyhow::Result<String> {
    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let inputs: String = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.into_iter().collect::<Vec<_>>().join(" ")
    };

    if args.is_words_only {
        for (index, token) in inputs
            .word_bound_indices()
            .filter(|(_, t)| t.chars().any(|ch| ch.is_alphanumeric()))
        {
            println!("{:>4}: \"{}\"", index, token);
        }
    } else {
        for (index, token) in inputs.word_bound_indices() {
            println!("{:>4}: \"{}\"", index, token);
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SpellerConfig> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening config {}", path.display()))?;
            Ok(serde_json::from_reader(file)?)
        }
        None => Ok(SpellerConfig::default()),
    }
}

fn suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let mut suggest_cfg = load_config(args.config.as_ref())?;

    if let Some(v) = args.nbest {
        suggest_cfg.n_best = v;
    }

    if args.disable_transpose {
        suggest_cfg.include_transpose = false;
    }

    if args.disable_fallback {
        suggest_cfg.fallback = Fallback::Nothing;
    }

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let words = if args.inputs.is_empty() {
        read_stdin()?
            .trim()
            .split('\n')
            .map(|x| x.trim().to_string())
            .filter(|x| !x.is_empty())
            .collect()
    } else {
        args.inputs
    };

    let alphabet = args
        .alphabet
        .as_deref()
        .map(Alphabet::from)
        .unwrap_or_default();
    let vocabulary = VocabularyModel::from_path(&args.corpus)?;
    let speller = ProbabilitySpeller::new(vocabulary, alphabet);

    run(speller, words, &mut *writer, args.always_suggest, &suggest_cfg)
}

#[derive(Serialize)]
struct DistanceReport<'a> {
    source: &'a str,
    target: &'a str,
    distance: u64,
    #[serde(flatten)]
    result: &'a EditDistance,
    path: Vec<EditOp>,
}

fn distance(args: DistanceArgs) -> anyhow::Result<()> {
    let (source, target) = match args.inputs.as_slice() {
        [source, target] => (source.as_str(), target.as_str()),
        _ => anyhow::bail!("expected exactly two words, got {}", args.inputs.len()),
    };

    let defaults = EditCosts::default();
    let costs = EditCosts::new(
        args.insert.unwrap_or(defaults.insert as i64),
        args.delete.unwrap_or(defaults.delete as i64),
        args.replace.unwrap_or(defaults.replace as i64),
    )?;

    let result = min_edit_distance(source, target, &costs)?;

    if args.use_json {
        let report = DistanceReport {
            source,
            target,
            distance: result.distance(),
            result: &result,
            path: result.alignment(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} -> {}\t\t{}", source, target, result.distance());

    if args.show_matrix {
        println!();
        print!("{}", result.matrix());
    }

    if args.show_path {
        println!();
        for op in result.alignment() {
            println!("{}\t{}", op, op.cost(result.costs()));
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct VocabEntry<'a> {
    word: &'a str,
    count: u64,
    probability: f64,
}

fn vocab(args: VocabArgs) -> anyhow::Result<()> {
    let vocabulary = VocabularyModel::from_path(&args.corpus)?;
    let entries = vocabulary
        .most_common(args.top.unwrap_or(20))
        .into_iter()
        .map(|(word, count)| VocabEntry {
            word,
            count,
            probability: vocabulary.probability(word),
        })
        .collect::<Vec<_>>();

    if args.use_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!(
            "{} words, {} tokens",
            vocabulary.len(),
            vocabulary.total_count()
        );
        for entry in entries {
            println!("{}\t\t{}\t{:.6}", entry.word, entry.count, entry.probability);
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Suggest(args)) => suggest(args),
        Some(Command::Distance(args)) => distance(args),
        Some(Command::Tokenize(args)) => tokenize(args),
        Some(Command::Vocab(args)) => vocab(args),
    }
}
