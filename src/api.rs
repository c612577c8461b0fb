//! Public API.
//!
//! The core exposes a pure surface: text plus options in, a fully owned
//! [`ParseResult`] out. [`parse`] never panics and never returns an error —
//! failures are encoded as `success = false` with messages in
//! `metadata.errors`. A [`Parser`] instance additionally owns the result
//! cache and any registered recognizers; the free functions build a
//! throwaway instance per call.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::cache::ParseCache;
use crate::config::ParserConfig;
use crate::engine::calc;
use crate::engine::dispatch::{BlockContext, CustomRecognizer, Dispatcher};
use crate::engine::metrics::{BlockTrace, ParseDetails};
use crate::engine::recognize::parse_amount;
use crate::engine::segment::{self, RawBlock, UNKNOWN_PLAYER};
use crate::error::ListeroError;
use crate::patterns;
use crate::preprocess::preprocess;
use crate::ticket::{BlockInfo, Jugada, ParseResult, ValidationResult};
use crate::validate as validate_mod;

/// Result of [`parse_verbose_with`]: the ordinary result plus stage timing
/// and per-block traces.
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    pub result: ParseResult,
    pub details: ParseDetails,
}

/// A configured parser instance.
///
/// Owns the recognizer chain and the result cache. Reusing one instance
/// across calls is what makes caching effective; the free functions create
/// a fresh instance (and thus a cold cache) per call.
#[derive(Debug)]
pub struct Parser {
    config: ParserConfig,
    dispatcher: Dispatcher,
    cache: Mutex<ParseCache>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(ParserConfig::default())
    }
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        let cache = Mutex::new(ParseCache::new(config.cache.max_size));
        Parser { config, dispatcher: Dispatcher::with_defaults(), cache }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Plug an external recognizer into the priority chain.
    pub fn register_recognizer(&mut self, recognizer: CustomRecognizer) {
        self.dispatcher.register(recognizer);
    }

    /// Parse `text` into a bet ledger. Never panics; failures are encoded
    /// in the returned result.
    ///
    /// # Example
    /// ```
    /// use listero::Parser;
    ///
    /// let parser = Parser::default();
    /// let out = parser.parse("Juan\n05 10 con 20\nTotal: 40");
    /// assert!(out.success);
    /// assert_eq!(out.jugadas[0].player_name, "Juan");
    /// assert!(out.jugadas[0].is_valid);
    /// ```
    pub fn parse(&self, text: &str) -> ParseResult {
        self.parse_with_details(text).0
    }

    /// Parse and also return stage metrics and per-block traces.
    pub fn parse_with_details(&self, text: &str) -> (ParseResult, ParseDetails) {
        let started = Instant::now();
        let mut details = ParseDetails { recognizers: self.dispatcher.recognizer_names(), ..Default::default() };

        let mut result = self.parse_inner(text, started, &mut details);

        result.metadata.parse_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        if self.config.cache.enabled {
            result.metadata.cache_stats = Some(self.lock_cache().stats());
        }
        details.stages.total = started.elapsed();
        (result, details)
    }

    /// Syntactic validation of `text` without building jugadas.
    pub fn validate(&self, text: &str) -> ValidationResult {
        match preprocess(text, &self.config) {
            Ok(canonical) => validate_mod::validate_syntax(&canonical, &self.config),
            Err(err) => {
                let mut result = ValidationResult::ok();
                result.error(err.to_string());
                result
            }
        }
    }

    /// Segmentation only: the per-player block structure, no bet recognition.
    pub fn extract_structure(&self, text: &str) -> Vec<BlockInfo> {
        match preprocess(text, &self.config) {
            Ok(canonical) => segment::block_infos(&canonical),
            Err(_) => Vec::new(),
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, ParseCache> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn parse_inner(&self, text: &str, started: Instant, details: &mut ParseDetails) -> ParseResult {
        if text.trim().is_empty() {
            return ParseResult::failure(vec!["Empty text".to_string()]);
        }

        let cache_key = ParseCache::key(text, &self.config.fingerprint());
        if self.config.cache.enabled {
            if let Some(hit) = self.lock_cache().get(cache_key) {
                return hit;
            }
        }

        let stage = Instant::now();
        let canonical = match preprocess(text, &self.config) {
            Ok(canonical) => canonical,
            Err(err) => return ParseResult::failure(vec![err.to_string()]),
        };
        details.stages.preprocess = stage.elapsed();

        let stage = Instant::now();
        let blocks = segment::segment(&canonical);
        details.stages.segment = stage.elapsed();

        if blocks.is_empty() {
            return ParseResult::failure(vec!["Empty text".to_string()]);
        }
        if blocks.len() > self.config.max_jugadores {
            return ParseResult::failure(vec![format!(
                "{} player blocks exceed the limit of {}",
                blocks.len(),
                self.config.max_jugadores
            )]);
        }

        let budget = Duration::from_millis(self.config.timeout_ms);
        let block_count = blocks.len();
        let mut jugadas: Vec<Jugada> = Vec::with_capacity(block_count);
        let mut block_errors: Vec<String> = Vec::new();

        let stage = Instant::now();
        for (index, block) in blocks.into_iter().enumerate() {
            if started.elapsed() > budget {
                let timeout = ListeroError::Timeout { budget_ms: self.config.timeout_ms };
                return ParseResult::failure(vec![
                    timeout.to_string(),
                    format!("aborted at block {} of {block_count}", index + 1),
                ]);
            }
            let jugada = self.process_block(block);
            details.blocks.push(BlockTrace {
                player: jugada.player_name.clone(),
                lines: jugada.original_lines.len(),
                details_produced: jugada.details.len(),
            });
            for err in &jugada.errors {
                block_errors.push(format!("block {}: {err}", index + 1));
            }
            jugadas.push(jugada);
        }
        details.stages.recognize = stage.elapsed();

        let stage = Instant::now();
        let syntax = validate_mod::validate_syntax(&canonical, &self.config);
        for jugada in &mut jugadas {
            let semantic = validate_mod::validate_jugada(jugada, &self.config);
            jugada.warnings.extend(semantic.warnings);
            jugada.errors.extend(semantic.errors);
        }
        details.stages.validate = stage.elapsed();

        if self.config.strict_mode {
            let mut fatal: Vec<String> = syntax.errors.clone();
            fatal.extend(block_errors.iter().cloned());
            for jugada in &jugadas {
                fatal.extend(jugada.errors.iter().cloned());
            }
            if !fatal.is_empty() {
                fatal.dedup();
                return ParseResult::failure(fatal);
            }
        }

        let summary = calc::build_summary(&jugadas, syntax.errors.len(), syntax.warnings.len());
        let stats = calc::build_stats(&jugadas);
        let result = ParseResult {
            success: true,
            jugadas,
            summary,
            metadata: crate::ticket::ParseMetadata {
                parse_time_ms: 0.0,
                original_length: text.len(),
                processed_length: canonical.len(),
                warnings: syntax.warnings,
                errors: syntax.errors.into_iter().chain(block_errors).collect(),
                cache_stats: None,
            },
            stats,
        };

        if self.config.cache.enabled {
            self.lock_cache().set(cache_key, result.clone(), Duration::from_millis(self.config.cache.ttl_ms));
        }
        result
    }

    fn process_block(&self, block: RawBlock) -> Jugada {
        let block_started = Instant::now();
        let player = block.player_name.unwrap_or_else(|| UNKNOWN_PLAYER.to_string());
        let lines: Vec<String> = block.lines.iter().map(|(_, line)| line.clone()).collect();
        let mut jugada = calc::new_jugada(player, lines);
        let mut ctx = BlockContext::new(&self.config);

        for (line_no, line) in &block.lines {
            if segment::is_total_line(line) {
                let declared = patterns::total_line()
                    .captures(line)
                    .and_then(|caps| parse_amount(&caps[1]));
                match (jugada.total_declared, declared) {
                    (None, Some(amount)) => jugada.total_declared = Some(amount),
                    (Some(_), Some(_)) => ctx.warn(format!("line {line_no}: duplicate total line ignored")),
                    (_, None) => ctx.warn(format!("line {line_no}: unreadable total amount")),
                }
                continue;
            }
            let details = self.dispatcher.dispatch_line(line, *line_no, &mut ctx);
            jugada.details.extend(details);
        }

        jugada.warnings = ctx.warnings;
        jugada.errors = ctx.errors;
        calc::finalize_jugada(&mut jugada);
        jugada.metadata.processing_time_ms = block_started.elapsed().as_secs_f64() * 1000.0;
        jugada
    }
}

/// Parse with default options.
///
/// # Example
/// ```
/// use listero::parse;
///
/// let out = parse("05 10 con 20");
/// assert!(out.success);
/// assert_eq!(out.jugadas.len(), 1);
/// assert_eq!(out.jugadas[0].player_name, "Desconocido");
/// ```
pub fn parse(text: &str) -> ParseResult {
    Parser::default().parse(text)
}

/// Parse with explicit options. Builds a throwaway [`Parser`]; hold a
/// `Parser` instance instead when cache reuse matters.
pub fn parse_with(text: &str, config: &ParserConfig) -> ParseResult {
    Parser::new(config.clone()).parse(text)
}

/// Parse and return compact stage metrics alongside the result.
pub fn parse_verbose_with(text: &str, config: &ParserConfig) -> ParseResultVerbose {
    let (result, details) = Parser::new(config.clone()).parse_with_details(text);
    ParseResultVerbose { result, details }
}

/// Syntactic validation with default options.
pub fn validate(text: &str) -> ValidationResult {
    Parser::default().validate(text)
}

/// Syntactic validation with explicit options.
pub fn validate_with(text: &str, config: &ParserConfig) -> ValidationResult {
    Parser::new(config.clone()).validate(text)
}

/// Segmentation-only view of `text` with default options.
pub fn extract_structure(text: &str) -> Vec<BlockInfo> {
    Parser::default().extract_structure(text)
}
