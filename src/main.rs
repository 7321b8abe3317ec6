//! mprettier - Auto-formatter for brace-structured macro scripts

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use mprettier::alias::{builtin, AliasSet};
use mprettier::process::format_source;
use mprettier::{find_directive, parse_args, CliArgs, Config, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

/// Macro script file extensions to process
const SCRIPT_EXTENSIONS: &[&str] = &["ms", "mcr", "mac", "MS", "MCR", "MAC"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    // Alias tables are loaded once and shared read-only by every worker
    let aliases = load_aliases(&args)?;

    if use_stdin {
        // Process stdin - use current directory for config discovery
        let config = build_config(&args, None)?;
        return process_stdin(&config, &aliases, &args);
    }

    // Build base configuration for parallel processing
    // For explicit config files, we use one config for all files
    // For auto-discovery, each file may have its own config
    let use_per_file_config = args.config.is_none();
    let base_config = if use_per_file_config {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    // Collect all files to process
    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No macro script files found to format.");
        }
        return Ok(());
    }

    // Process files
    let changed = AtomicUsize::new(0);
    let errors = AtomicUsize::new(0);
    let use_sequential = args.stdout || args.diff || args.jobs == Some(1);
    if use_sequential {
        // Sequential processing keeps stdout output in file order
        for path in &files {
            process_one(path, base_config.as_ref(), &aliases, &args, &changed, &errors);
        }
    } else {
        files.par_iter().for_each(|path| {
            process_one(path, base_config.as_ref(), &aliases, &args, &changed, &errors);
        });
    }

    let changed = changed.load(Ordering::Relaxed);
    let errors = errors.load(Ordering::Relaxed);

    if !args.silent {
        if args.check {
            eprintln!("{changed} of {} files would be reformatted.", files.len());
        } else if errors == 0 {
            eprintln!("Formatted {} files successfully.", files.len());
        } else {
            eprintln!("Formatted {} files, {errors} errors.", files.len() - errors);
        }
    }

    if errors > 0 || (args.check && changed > 0) {
        std::process::exit(1);
    }

    Ok(())
}

/// Format a single path, folding the outcome into the run counters
fn process_one(
    path: &PathBuf,
    base_config: Option<&Config>,
    aliases: &AliasSet,
    args: &CliArgs,
    changed: &AtomicUsize,
    errors: &AtomicUsize,
) {
    // Use base config if provided, otherwise discover per-file config
    let file_result = if let Some(config) = base_config {
        process_single_file(path, config, aliases, args)
    } else {
        match build_config(args, Some(path)) {
            Ok(config) => process_single_file(path, &config, aliases, args),
            Err(e) => Err(e),
        }
    };

    match file_result {
        Ok(true) => {
            changed.fetch_add(1, Ordering::Relaxed);
        }
        Ok(false) => {}
        Err(e) => {
            errors.fetch_add(1, Ordering::Relaxed);
            eprintln!("Error formatting {}: {}", path.display(), e);
        }
    }
}

/// Load alias tables from the `--tables` directory or fall back to the
/// embedded vocabularies. Table errors abort the run before any file is
/// touched.
fn load_aliases(args: &CliArgs) -> Result<AliasSet> {
    let aliases = if let Some(dir) = &args.tables {
        AliasSet::load_dir(dir)?
    } else {
        builtin().clone()
    };
    if args.debug {
        eprintln!(
            "[DEBUG] Alias tables: {} commands, {} functions, {} variables",
            aliases.commands.len(),
            aliases.functions.len(),
            aliases.variables.len()
        );
    }
    Ok(aliases)
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else if let Some(path) = for_path {
        // Auto-discover config files from parent directories
        if args.debug {
            let discovered = Config::discover_config_files(path);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", path.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", path.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(path)
    } else {
        Config::from_discovered_files(&std::env::current_dir().unwrap_or_default())
    };

    // Override with CLI arguments
    if let Some(tab_size) = args.tab_size {
        config.tab_size = tab_size;
    }
    if args.use_tabs {
        config.insert_spaces = false;
    }
    if let Some(tables) = &args.tables {
        config.tables = Some(tables.clone());
    }

    if args.debug {
        eprintln!("[DEBUG] Configuration:");
        eprintln!("[DEBUG]   tab_size: {}", config.tab_size);
        eprintln!("[DEBUG]   insert_spaces: {}", config.insert_spaces);
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let custom_extensions = &args.extensions;

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // Recursive directory traversal
                // Note: WalkDir detects symlink loops when follow_links(true) and
                // returns errors for them. We skip errors via filter_map(ok).
                // max_depth prevents runaway traversal in pathological directory structures.
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_script_file(path, custom_extensions)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_script_file(&path, custom_extensions)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Count the number of lines in a text buffer
fn count_lines(contents: &str) -> usize {
    // Count newlines; add 1 if file doesn't end with newline and has content
    let newlines = contents.bytes().filter(|&b| b == b'\n').count();
    if contents.is_empty() {
        0
    } else if contents.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Check if a file has a macro script extension
/// Checks against both default extensions and any custom extensions provided
fn is_script_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            // Check default extensions
            if SCRIPT_EXTENSIONS.contains(&ext) {
                return true;
            }
            // Check custom extensions (with or without leading dot)
            for custom in custom_extensions {
                let custom_ext = custom.strip_prefix('.').unwrap_or(custom);
                if ext == custom_ext {
                    return true;
                }
            }
            false
        })
}

/// Apply directive overrides from file contents to a configuration
fn apply_directive_overrides(config: &mut Config, contents: &str, debug: bool, source_name: &str) {
    let cursor = Cursor::new(contents);
    if let Some(overrides) = find_directive(&mut BufReader::new(cursor)) {
        if debug {
            eprintln!("[DEBUG] Found file directive in {source_name}");
        }
        if let Some(tab_size) = overrides.tab_size {
            if debug {
                eprintln!("[DEBUG]   Directive override: tab_size = {tab_size}");
            }
            config.tab_size = tab_size;
        }
        if let Some(insert_spaces) = overrides.insert_spaces {
            if debug {
                eprintln!("[DEBUG]   Directive override: insert_spaces = {insert_spaces}");
            }
            config.insert_spaces = insert_spaces;
        }
    }
}

/// Process a single file. Returns whether formatting would change it.
fn process_single_file(
    path: &PathBuf,
    config: &Config,
    aliases: &AliasSet,
    args: &CliArgs,
) -> Result<bool> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                size_mb,
                limit_mb
            );
        }
        return Ok(false);
    }

    let contents = std::fs::read_to_string(path)?;

    // Check line count limit if specified
    if let Some(max_lines) = args.exclude_max_lines {
        let line_count = count_lines(&contents);
        if line_count > max_lines {
            if !args.silent {
                eprintln!(
                    "Skipping {} ({} lines exceeds limit of {})",
                    path.display(),
                    line_count,
                    max_lines
                );
            }
            return Ok(false);
        }
    }

    if !args.silent && !args.stdout && !args.check && !args.diff {
        eprintln!("Formatting: {}", path.display());
    }

    // Make a per-file copy of config that can be overridden by directives
    let mut file_config = config.clone();
    apply_directive_overrides(
        &mut file_config,
        &contents,
        args.debug,
        path.to_str().unwrap_or("unknown"),
    );
    if let Some(error) = file_config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    let outcome = format_source(&contents, &file_config.format_options(), aliases);

    // Output results
    if args.stdout {
        io::stdout().write_all(outcome.formatted.as_bytes())?;
    } else if args.check {
        if outcome.changed() && !args.silent {
            println!("Would reformat: {}", path.display());
        }
    } else if args.diff {
        if outcome.changed() {
            if !args.silent {
                println!("=== {} ===", path.display());
            }
            io::stdout().write_all(outcome.formatted.as_bytes())?;
        }
    } else if outcome.changed() {
        // Write back to file (in-place)
        std::fs::write(path, &outcome.formatted)?;
    }

    Ok(outcome.changed())
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, aliases: &AliasSet, args: &CliArgs) -> Result<()> {
    // Read all input from stdin
    let mut stdin_contents = String::new();
    io::stdin().read_to_string(&mut stdin_contents)?;

    // Check size after reading to prevent processing extremely large input
    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    // Make a copy of config that can be overridden by directives
    let mut file_config = config.clone();
    apply_directive_overrides(&mut file_config, &stdin_contents, args.debug, "stdin");
    if let Some(error) = file_config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    let outcome = format_source(&stdin_contents, &file_config.format_options(), aliases);

    if args.check {
        if outcome.changed() {
            if !args.silent {
                eprintln!("stdin would be reformatted.");
            }
            std::process::exit(1);
        }
        return Ok(());
    }

    // Always output to stdout when reading from stdin
    io::stdout().write_all(outcome.formatted.as_bytes())?;

    if !args.silent {
        eprintln!("Formatted stdin successfully.");
    }

    Ok(())
}

fn print_usage() {
    println!(
        "mprettier v{} - macro script formatter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("A fast formatter for brace-structured macro scripts, written in Rust.");
    println!();
    println!("Usage:");
    println!("  mprettier [OPTIONS] <FILE>...");
    println!("  mprettier [OPTIONS] -r <DIRECTORY>");
    println!("  mprettier [OPTIONS] -              # Read from stdin");
    println!("  cat script.ms | mprettier          # Pipe input");
    println!();
    println!("Examples:");
    println!("  mprettier script.ms             # Format single file in-place");
    println!("  mprettier *.ms                  # Format multiple files");
    println!("  mprettier -r src/               # Recursively format directory");
    println!("  mprettier --stdout script.ms    # Output to stdout");
    println!("  mprettier -t 2 script.ms        # Use 2-space indent");
    println!("  mprettier --check -r src/       # Fail if anything would change");
    println!();
    println!("Options:");
    println!("  -t, --tab-size <NUM>            Spaces per indent level [default: 4]");
    println!("  --use-tabs                      Tab-indented input: casing edits only");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("  -x, --extension <EXT>           Additional script extension (repeatable)");
    println!("  -m, --exclude-max-lines <NUM>   Skip files with more than NUM lines");
    println!("  -j, --jobs <NUM>                Parallel jobs (0=auto, 1=sequential)");
    println!("  --tables <DIR>                  Custom alias tables directory");
    println!("  -s, --stdout                    Output to stdout");
    println!("  --check                         Exit 1 if any file would change");
    println!("  -d, --diff                      Show formatted output of changed files");
    println!("  -c, --config <FILE>             Config file path (overrides auto-discovery)");
    println!("  -S, --silent                    Silent mode");
    println!("  -D, --debug                     Enable debug output");
    println!("  -h, --help                      Print help");
    println!();
    println!("Supported extensions: .ms, .mcr, .mac (case-insensitive)");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for mprettier.toml in parent directories");
    println!("  starting from the file being formatted up to the root directory.");
    println!("  Also checks mprettier.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
}
