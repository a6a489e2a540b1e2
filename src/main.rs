//! Lyrics Vocab - vocabulary analysis of an artist's song lyrics
//!
//! Main entry point for the command-line application.

use anyhow::Context;
use clap::Parser;
use colored::*;
use std::io::{self, BufRead, Write};
use std::process;
use std::time::Instant;

use lyrics_vocab::cli::Args;
use lyrics_vocab::output::{write_json, AnalysisExport};
use lyrics_vocab::processor::{Analysis, AnalysisRequest, Processor, ProcessorConfig};
use lyrics_vocab::progress::{
    print_banner, print_bullet, print_error, print_header, print_info, print_success,
    print_warning, AnalysisStats,
};
use lyrics_vocab::provider::{DirectoryProvider, GeniusConfig, GeniusProvider, LyricsProvider};
use lyrics_vocab::stopwords::Language;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        if let Some(hint) = e
            .downcast_ref::<lyrics_vocab::Error>()
            .and_then(|err| err.hint())
        {
            print_info(hint);
        }

        eprintln!("\n{}", "Troubleshooting:".yellow().bold());
        eprintln!("  {} Check your internet connection", "•".yellow());
        eprintln!("  {} Check the spelling of the artist name", "•".yellow());
        eprintln!("  {} Wait a few minutes and try again", "•".yellow());

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let start_time = Instant::now();

    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    // Validate arguments
    args.validate()?;

    let language = resolve_language(&args)?;
    let artist = resolve_artist(&args)?;

    let provider = build_provider(&args)?;
    let request = AnalysisRequest::from_args(&args, artist, language);

    // Show configuration
    if !args.quiet && args.verbose {
        print_config(&args, &request, provider.name());
    }

    // Create and run processor
    let processor = Processor::new(ProcessorConfig::from_args(&args));
    let analysis = processor.analyze(&request, provider.as_ref())?;

    let reports = vec![
        analysis.top_words(args.top),
        analysis.top_long_words(args.min_length, args.top),
    ];
    if analysis.words.is_empty() {
        print_warning(&format!(
            "No word appears in {} or more songs; try a lower --min-songs",
            request.min_song_count
        ));
    }
    for report in &reports {
        println!("\n{}", report.render());
    }

    for word in &args.search {
        print_search_result(&analysis, word);
    }

    if let Some(ref path) = args.json {
        write_json(path, &AnalysisExport::new(&analysis, &reports))
            .with_context(|| format!("Failed to write JSON export to {:?}", path))?;
        if !args.quiet {
            print_success(&format!("Analysis written to {:?}", path));
        }
    }

    if !args.quiet {
        AnalysisStats {
            start_time,
            ..analysis.stats()
        }
        .print_summary();
    }

    if args.is_interactive() {
        search_loop(&analysis)?;
    }

    Ok(())
}

/// Language from the command line, or asked for when interactive
fn resolve_language(args: &Args) -> anyhow::Result<Language> {
    if let Some(language) = args.language {
        return Ok(language);
    }
    if !args.is_interactive() {
        anyhow::bail!("No language given: use --language english|turkish");
    }

    loop {
        let answer = prompt("Select lyrics language, [T]urkish or [E]nglish: ")?
            .context("No language given")?;
        match answer.parse::<Language>() {
            Ok(language) => return Ok(language),
            Err(_) => print_error("Please answer T or E"),
        }
    }
}

/// Artist from the command line, or asked for when interactive
fn resolve_artist(args: &Args) -> anyhow::Result<String> {
    if let Some(ref artist) = args.artist {
        if !artist.trim().is_empty() {
            return Ok(artist.trim().to_string());
        }
    }
    if !args.is_interactive() {
        anyhow::bail!("No artist given");
    }

    loop {
        let answer = prompt("Artist name: ")?.context("No artist given")?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

fn build_provider(args: &Args) -> anyhow::Result<Box<dyn LyricsProvider>> {
    if let Some(ref input) = args.input {
        let provider = DirectoryProvider::new(input.clone())
            .recursive(args.recursive)
            .extensions(args.get_extensions());
        return Ok(Box::new(provider));
    }

    let token = args
        .get_token()
        .context("Genius access token missing: pass --token or set GENIUS_ACCESS_TOKEN")?;

    let config = GeniusConfig {
        timeout: args.get_timeout(),
        max_songs: args.max_songs,
        retry: args.retry_policy()?,
        show_progress: !args.quiet,
        ..GeniusConfig::new(token)
    };
    Ok(Box::new(GeniusProvider::new(config)?))
}

/// Read one trimmed line from stdin; `None` at end of input
fn prompt(message: &str) -> anyhow::Result<Option<String>> {
    print!("{} {}", "?".magenta().bold(), message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn search_loop(analysis: &Analysis) -> anyhow::Result<()> {
    print_header("Word search (q to quit)");

    while let Some(word) = prompt("Word: ")? {
        if word.eq_ignore_ascii_case("q") {
            break;
        }
        if !word.is_empty() {
            print_search_result(analysis, &word);
        }
    }

    Ok(())
}

fn print_search_result(analysis: &Analysis, word: &str) {
    let count = analysis.search(word);
    if count == 0 {
        print_info(&format!(
            "'{}' does not appear in the filtered lyrics of {}",
            word, analysis.artist
        ));
        return;
    }

    let songs = analysis.song_counts.get(&word.trim().to_lowercase());
    print_bullet(&format!(
        "'{}' appears {} times in {} of {}'s songs",
        word.trim(),
        count.to_string().magenta().bold(),
        songs,
        analysis.artist
    ));
}

/// Print configuration summary
fn print_config(args: &Args, request: &AnalysisRequest, provider: &str) {
    print_header("Configuration");

    print_info(&format!("Artist:       {}", request.artist));
    print_info(&format!("Language:     {}", request.language));
    print_info(&format!("Provider:     {}", provider));
    print_info(&format!("Threshold:    {}", request.threshold));
    print_info(&format!("Autojunk:     {}", request.autojunk));
    print_info(&format!("Min songs:    {}", request.min_song_count));
    print_info(&format!("Chart size:   {}", args.top));
    print_info(&format!("Min length:   {}", args.min_length));

    if !request.extra_stopwords.is_empty() {
        print_info(&format!("Stopwords+:   {:?}", request.extra_stopwords));
    }
    if let Some(max_songs) = args.max_songs {
        print_info(&format!("Max songs:    {}", max_songs));
    }
}
