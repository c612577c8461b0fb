//! Recognizer dispatch.
//!
//! The dispatcher holds a priority-ordered chain of recognizers. For each
//! non-name, non-total line it queries them in descending priority and the
//! first claimant produces the line's details:
//!
//! ```text
//! 100  AutoCorrect      rewrites only, never claims
//!  90  SpecialPatterns  volteo / rango / decena / terminal / pr / centenas
//!  80  Candado          "... candado con M"
//!  70  Centena          3-digit lines, simple and composite
//!  60  Parle            explicit pairs, inline "p M", keyword form
//!  50  BasicBet         "N N ... con A [y B]" and bare-number fallback
//! ```
//!
//! The built-ins are a closed enum; externally registered recognizers plug
//! in as a (probe, producer, validator) trio and compete on the same
//! priority scale.

use rust_decimal::Decimal;

use crate::config::ParserConfig;
use crate::engine::recognize;
use crate::ticket::DetalleApuesta;

/// Per-block recognition state, constructed and dropped around each block.
///
/// Carries the stake-carryover rule: a bare-number line inherits the unit
/// of the block's most recent explicit Fijo/Corrido stake before falling
/// back to the configured defaults.
#[derive(Debug, Clone)]
pub struct BlockContext {
    pub last_fijo_monto: Option<Decimal>,
    pub last_corrido_monto: Option<Decimal>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub(crate) auto_expand: bool,
    pub(crate) max_expansion: usize,
    default_fijo: Decimal,
    default_corrido: Decimal,
}

impl BlockContext {
    pub(crate) fn new(config: &ParserConfig) -> Self {
        BlockContext {
            last_fijo_monto: None,
            last_corrido_monto: None,
            warnings: Vec::new(),
            errors: Vec::new(),
            auto_expand: config.auto_expand,
            max_expansion: config.max_expansion,
            default_fijo: config.default_monto_fijo,
            default_corrido: config.default_monto_corrido,
        }
    }

    /// Current fijo unit for lines without an explicit stake.
    pub fn fijo_unit(&self) -> Decimal {
        self.last_fijo_monto.unwrap_or(self.default_fijo)
    }

    /// Corrido unit for lines without an explicit stake, if any applies.
    pub fn corrido_unit(&self) -> Option<Decimal> {
        self.last_corrido_monto
            .or_else(|| (self.default_corrido > Decimal::ZERO).then_some(self.default_corrido))
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }
}

/// An externally registered recognizer: capability probe, producer, and a
/// per-row validator. Rows failing the validator are dropped with an error.
#[derive(Debug, Clone)]
pub struct CustomRecognizer {
    pub name: &'static str,
    pub priority: i32,
    pub probe: fn(&str) -> bool,
    pub produce: fn(&str, usize, &mut BlockContext) -> Vec<DetalleApuesta>,
    pub validate: fn(&DetalleApuesta) -> bool,
}

/// One link in the chain: a built-in kind or a registered trio.
#[derive(Debug, Clone)]
pub(crate) enum Recognizer {
    AutoCorrect,
    SpecialPatterns,
    Candado,
    Centena,
    Parle,
    BasicBet,
    Custom(CustomRecognizer),
}

impl Recognizer {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Recognizer::AutoCorrect => "autocorrect",
            Recognizer::SpecialPatterns => "special-patterns",
            Recognizer::Candado => "candado",
            Recognizer::Centena => "centena",
            Recognizer::Parle => "parle",
            Recognizer::BasicBet => "basic-bet",
            Recognizer::Custom(custom) => custom.name,
        }
    }

    pub(crate) fn priority(&self) -> i32 {
        match self {
            Recognizer::AutoCorrect => 100,
            Recognizer::SpecialPatterns => 90,
            Recognizer::Candado => 80,
            Recognizer::Centena => 70,
            Recognizer::Parle => 60,
            Recognizer::BasicBet => 50,
            Recognizer::Custom(custom) => custom.priority,
        }
    }

    fn can_process(&self, line: &str, ctx: &BlockContext) -> bool {
        match self {
            Recognizer::AutoCorrect => true,
            Recognizer::SpecialPatterns => recognize::claims_special(line, ctx),
            Recognizer::Candado => recognize::claims_candado(line),
            Recognizer::Centena => recognize::claims_centena(line),
            Recognizer::Parle => recognize::claims_parle(line),
            Recognizer::BasicBet => recognize::claims_basic(line),
            Recognizer::Custom(custom) => (custom.probe)(line),
        }
    }

    fn process(&self, line: &str, line_number: usize, ctx: &mut BlockContext) -> Vec<DetalleApuesta> {
        match self {
            // Handled by the dispatcher as a rewrite, not a claim.
            Recognizer::AutoCorrect => Vec::new(),
            Recognizer::SpecialPatterns => recognize::process_special(line, line_number, ctx),
            Recognizer::Candado => recognize::process_candado(line, line_number, ctx),
            Recognizer::Centena => recognize::process_centena(line, line_number, ctx),
            Recognizer::Parle => recognize::process_parle(line, line_number, ctx),
            Recognizer::BasicBet => recognize::process_basic(line, line_number, ctx),
            Recognizer::Custom(custom) => {
                let mut details = (custom.produce)(line, line_number, ctx);
                details.retain(|detail| {
                    let keep = (custom.validate)(detail);
                    if !keep {
                        ctx.error(format!(
                            "line {line_number}: recognizer '{}' produced an invalid detail",
                            custom.name
                        ));
                    }
                    keep
                });
                details
            }
        }
    }
}

fn debug_rules() -> bool {
    std::env::var_os("LISTERO_DEBUG_RULES").is_some()
}

/// The priority-ordered recognizer chain.
#[derive(Debug, Clone)]
pub(crate) struct Dispatcher {
    recognizers: Vec<Recognizer>,
}

impl Dispatcher {
    pub(crate) fn with_defaults() -> Self {
        let mut dispatcher = Dispatcher {
            recognizers: vec![
                Recognizer::AutoCorrect,
                Recognizer::SpecialPatterns,
                Recognizer::Candado,
                Recognizer::Centena,
                Recognizer::Parle,
                Recognizer::BasicBet,
            ],
        };
        dispatcher.sort();
        dispatcher
    }

    /// Insert a registered recognizer, keeping the chain priority-sorted.
    /// Ties go to the earlier registration.
    pub(crate) fn register(&mut self, custom: CustomRecognizer) {
        self.recognizers.push(Recognizer::Custom(custom));
        self.sort();
    }

    fn sort(&mut self) {
        self.recognizers.sort_by_key(|r| std::cmp::Reverse(r.priority()));
    }

    pub(crate) fn recognizer_names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    /// Route one bet line through the chain. AutoCorrect rewrites the line
    /// and passes through; the first claimant after it produces the details.
    pub(crate) fn dispatch_line(
        &self,
        line: &str,
        line_number: usize,
        ctx: &mut BlockContext,
    ) -> Vec<DetalleApuesta> {
        let mut current = line.to_string();
        for recognizer in &self.recognizers {
            if matches!(recognizer, Recognizer::AutoCorrect) {
                let corrected = recognize::autocorrect(&current);
                if debug_rules() && corrected != current {
                    eprintln!("[autocorrect] line {line_number}: {current:?} -> {corrected:?}");
                }
                current = corrected;
                continue;
            }
            if recognizer.can_process(&current, ctx) {
                if debug_rules() {
                    eprintln!("[claim] line {line_number}: {} claims {current:?}", recognizer.name());
                }
                return recognizer.process(&current, line_number, ctx);
            }
        }
        ctx.warn(format!("line {line_number}: unrecognized: '{current}'"));
        Vec::new()
    }
}
