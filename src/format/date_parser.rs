use chrono::{Datelike, NaiveDateTime, Timelike};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{anychar, char, one_of},
    combinator::{map, opt, peek, value},
    multi::many0,
    sequence::{delimited, preceded},
};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Letters that start a date/time specifier run, e.g. `yyyy` or `HH`.
const SPECIFIER_LETTERS: &str = "yMdhHmsfFt";

/// Most fractional-second digits a naive timestamp can hold.
const MAX_FRACTION_DIGITS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateToken<'a> {
    /// A run of one specifier letter; the count selects the variant (`d` vs `dddd`).
    Specifier { letter: char, count: usize },
    Text(&'a str),
    Char(char),
}

/// Expand a one-letter standard pattern (`d`, `T`, `s`, ...) to its custom
/// equivalent, using invariant-culture layouts.
pub(super) fn expand_standard(pattern: &str) -> &str {
    match pattern {
        "d" => "MM/dd/yyyy",
        "D" => "dddd, dd MMMM yyyy",
        "t" => "HH:mm",
        "T" => "HH:mm:ss",
        "f" => "dddd, dd MMMM yyyy HH:mm",
        "F" => "dddd, dd MMMM yyyy HH:mm:ss",
        "g" => "MM/dd/yyyy HH:mm",
        "G" => "MM/dd/yyyy HH:mm:ss",
        "s" => "yyyy'-'MM'-'dd'T'HH':'mm':'ss",
        "u" => "yyyy'-'MM'-'dd HH':'mm':'ss'Z'",
        "o" | "O" => "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffff",
        "m" | "M" => "MMMM dd",
        "y" | "Y" => "yyyy MMMM",
        other => other,
    }
}

pub(super) fn tokenize(input: &str) -> IResult<&str, Vec<DateToken<'_>>> {
    let (remaining, mut tokens) = many0(date_token).parse(input)?;
    if !remaining.is_empty() {
        tokens.push(DateToken::Text(remaining));
    }
    Ok(("", tokens))
}

fn date_token(input: &str) -> IResult<&str, DateToken<'_>> {
    alt((
        quoted_text('\''),
        quoted_text('"'),
        escaped_char,
        single_specifier_marker,
        specifier_run,
        literal_char,
    ))
    .parse(input)
}

/// `'text'` or `"text"`; an unterminated quote runs to the end of the pattern.
fn quoted_text<'a>(quote: char) -> impl Parser<&'a str, Output = DateToken<'a>, Error = nom::error::Error<&'a str>> {
    map(
        delimited(char(quote), take_till(move |c: char| c == quote), opt(char(quote))),
        DateToken::Text,
    )
}

fn escaped_char(input: &str) -> IResult<&str, DateToken<'_>> {
    map(preceded(char('\\'), anychar), DateToken::Char).parse(input)
}

fn literal_char(input: &str) -> IResult<&str, DateToken<'_>> {
    map(anychar, DateToken::Char).parse(input)
}

/// `%` marks a lone specifier (`%d`) as custom rather than standard; it renders as nothing.
fn single_specifier_marker(input: &str) -> IResult<&str, DateToken<'_>> {
    value(DateToken::Text(""), char('%')).parse(input)
}

fn specifier_run(input: &str) -> IResult<&str, DateToken<'_>> {
    let (_, letter) = peek(one_of(SPECIFIER_LETTERS)).parse(input)?;
    let (remaining, run) = take_while1(move |c: char| c == letter).parse(input)?;
    Ok((
        remaining,
        DateToken::Specifier {
            letter,
            count: run.len(),
        },
    ))
}

/// Render `tokens` for `dt` into `out`.
pub(super) fn render(tokens: &[DateToken<'_>], dt: &NaiveDateTime, out: &mut String) {
    for token in tokens {
        match *token {
            DateToken::Text(text) => out.push_str(text),
            DateToken::Char(c) => out.push(c),
            DateToken::Specifier { letter, count } => render_specifier(letter, count, dt, out),
        }
    }
}

fn render_specifier(letter: char, count: usize, dt: &NaiveDateTime, out: &mut String) {
    match letter {
        'y' => {
            let year = dt.year();
            if count <= 2 {
                push_padded(out, i64::from(year.rem_euclid(100)), count);
            } else {
                push_padded(out, i64::from(year), count);
            }
        }
        'M' => match count {
            1 | 2 => push_padded(out, i64::from(dt.month()), count),
            3 => out.push_str(&MONTH_NAMES[dt.month0() as usize][..3]),
            _ => out.push_str(MONTH_NAMES[dt.month0() as usize]),
        },
        'd' => match count {
            1 | 2 => push_padded(out, i64::from(dt.day()), count),
            3 => out.push_str(&DAY_NAMES[dt.weekday().num_days_from_monday() as usize][..3]),
            _ => out.push_str(DAY_NAMES[dt.weekday().num_days_from_monday() as usize]),
        },
        'h' => {
            let (_, hour12) = dt.hour12();
            push_padded(out, i64::from(hour12), count.min(2));
        }
        'H' => push_padded(out, i64::from(dt.hour()), count.min(2)),
        'm' => push_padded(out, i64::from(dt.minute()), count.min(2)),
        's' => push_padded(out, i64::from(dt.second()), count.min(2)),
        'f' | 'F' => {
            let digits = count.min(MAX_FRACTION_DIGITS);
            let nanos = format!("{:09}", dt.nanosecond() % 1_000_000_000);
            let fraction = &nanos[..digits];
            if letter == 'f' {
                out.push_str(fraction);
            } else {
                let trimmed = fraction.trim_end_matches('0');
                if trimmed.is_empty() && out.ends_with('.') {
                    out.pop();
                }
                out.push_str(trimmed);
            }
        }
        't' => {
            let designator = if dt.hour() < 12 { "AM" } else { "PM" };
            out.push_str(if count == 1 { &designator[..1] } else { designator });
        }
        other => out.extend(std::iter::repeat_n(other, count)),
    }
}

fn push_padded(out: &mut String, n: i64, width: usize) {
    out.push_str(&format!("{n:0width$}"));
}
