use nom::{
    IResult, Parser,
    character::complete::{digit0, one_of},
    combinator::{all_consuming, map_res},
};

/// Invariant-culture currency sign, used by the `C` pattern.
const CURRENCY_SIGN: char = '\u{a4}';

/// Number of decimals for `F`, `N`, `P` and `C` when the pattern gives none.
const DEFAULT_DECIMALS: usize = 2;

/// Number of mantissa decimals for `E` when the pattern gives none.
const DEFAULT_EXPONENT_DECIMALS: usize = 6;

/// Upper bound on a precision specifier, guarding against `F999999999`.
const MAX_PRECISION: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn is_negative(self) -> bool {
        match self {
            Self::Int(n) => n < 0,
            Self::Float(n) => n.is_sign_negative(),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(n) => n as f64,
            Self::Float(n) => n,
        }
    }

    /// Scale by 100 for percentages, staying integral when possible.
    fn percent(self) -> Self {
        match self {
            Self::Int(n) => n.checked_mul(100).map_or(Self::Float(self.as_f64() * 100.0), Self::Int),
            Self::Float(n) => Self::Float(n * 100.0),
        }
    }

    /// Absolute value rounded to `decimals`, split into integer and fraction digits.
    fn fixed_digits(self, decimals: usize) -> (String, String) {
        match self {
            Self::Int(n) => (n.unsigned_abs().to_string(), "0".repeat(decimals)),
            Self::Float(n) => {
                let text = format!("{:.decimals$}", n.abs());
                match text.split_once('.') {
                    Some((int, frac)) => (int.to_owned(), frac.to_owned()),
                    None => (text, String::new()),
                }
            }
        }
    }
}

/// A standard numeric pattern: one letter plus an optional precision, e.g. `N2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardPattern {
    pub letter: char,
    pub precision: Option<usize>,
}

pub(super) fn parse_standard(input: &str) -> IResult<&str, StandardPattern> {
    let (remaining, (letter, precision)) =
        all_consuming((one_of("CcDdEeFfGgNnPpRrXx"), precision)).parse(input)?;
    Ok((remaining, StandardPattern { letter, precision }))
}

fn precision(input: &str) -> IResult<&str, Option<usize>> {
    map_res(digit0, |digits: &str| {
        if digits.is_empty() {
            Ok(None)
        } else {
            digits.parse::<usize>().map(|n| Some(n.min(MAX_PRECISION)))
        }
    })
    .parse(input)
}

/// Render `n` with `pattern`, or `None` when the pattern does not apply to
/// this kind of number (the caller then falls back to the natural form).
pub(super) fn render(n: Number, pattern: &str) -> Option<String> {
    if let Ok((_, standard)) = parse_standard(pattern) {
        return render_standard(n, standard);
    }
    if pattern.contains(['0', '#']) {
        return Some(render_custom(n, pattern));
    }
    None
}

fn render_standard(n: Number, pattern: StandardPattern) -> Option<String> {
    let StandardPattern { letter, precision } = pattern;
    let decimals = precision.unwrap_or(DEFAULT_DECIMALS);

    let rendered = match letter.to_ascii_uppercase() {
        'D' => {
            let Number::Int(value) = n else {
                return None;
            };
            let digits = value.unsigned_abs().to_string();
            let width = precision.unwrap_or(0);
            format!("{}{digits:0>width$}", sign(n))
        }
        'F' => fixed(n, decimals, false),
        'N' => fixed(n, decimals, true),
        'P' => format!("{} %", fixed(n.percent(), decimals, true)),
        'C' => {
            let body = fixed(Number::Float(n.as_f64().abs()), decimals, true);
            format!("{}{CURRENCY_SIGN}{body}", sign(n))
        }
        'E' => exponential(n, precision.unwrap_or(DEFAULT_EXPONENT_DECIMALS), letter == 'E'),
        'X' => {
            let Number::Int(value) = n else {
                return None;
            };
            let width = precision.unwrap_or(0);
            if letter == 'X' {
                format!("{value:0width$X}")
            } else {
                format!("{value:0width$x}")
            }
        }
        // G and R: shortest round-trip form.
        _ => return None,
    };
    Some(rendered)
}

fn sign(n: Number) -> &'static str {
    if n.is_negative() { "-" } else { "" }
}

fn fixed(n: Number, decimals: usize, grouped: bool) -> String {
    let (int, frac) = n.fixed_digits(decimals);
    let int = if grouped { group_thousands(&int) } else { int };
    let negative = n.is_negative() && !is_all_zero(&int, &frac);

    let mut out = String::with_capacity(int.len() + frac.len() + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&int);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// Scientific notation with at least three exponent digits: `1.234560E+003`.
fn exponential(n: Number, decimals: usize, upper: bool) -> String {
    let text = format!("{:.decimals$e}", n.as_f64());
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let (exp_sign, exp_digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{exp_sign}{exp_digits:0>3}")
}

/// Custom patterns built from `0` (required digit), `#` (optional digit),
/// `,` (grouping), `.` (decimal point) and `%` (percentage). Text before the
/// first and after the last digit placeholder is copied verbatim.
fn render_custom(n: Number, pattern: &str) -> String {
    let is_placeholder = |c: char| c == '0' || c == '#';
    let (Some(first), Some(last)) = (pattern.find(is_placeholder), pattern.rfind(is_placeholder))
    else {
        return pattern.to_owned();
    };

    let prefix = &pattern[..first];
    let suffix = &pattern[last + 1..];
    let core = &pattern[first..=last];

    let n = if prefix.contains('%') || suffix.contains('%') {
        n.percent()
    } else {
        n
    };

    let (int_spec, frac_spec) = core.split_once('.').unwrap_or((core, ""));
    let min_int = int_spec.matches('0').count();
    let grouped = int_spec.contains(',');
    let min_frac = frac_spec.matches('0').count();
    let max_frac = min_frac + frac_spec.matches('#').count();

    let (int, mut frac) = n.fixed_digits(max_frac);
    while frac.len() > min_frac && frac.ends_with('0') {
        frac.pop();
    }

    let int = int.trim_start_matches('0');
    let mut int = format!("{int:0>min_int$}");
    if grouped {
        int = group_thousands(&int);
    }

    let mut out = String::with_capacity(pattern.len() + int.len() + frac.len());
    if n.is_negative() && !is_all_zero(&int, &frac) {
        out.push('-');
    }
    out.push_str(prefix);
    out.push_str(&int);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out.push_str(suffix);
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn is_all_zero(int: &str, frac: &str) -> bool {
    int.chars().chain(frac.chars()).all(|c| c == '0' || c == ',')
}
