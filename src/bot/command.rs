//! Parses message text into typed bot commands.

use rust_decimal::Decimal;

use crate::transaction::TransactionKind;

/// A recognized bot command with its parsed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `/start`: greet the sender.
    Start,
    /// `/help`: send the usage guide.
    Help,
    /// `/masuk` or `/keluar`: record a transaction.
    Record {
        /// Whether money came in or went out.
        kind: TransactionKind,
        /// The amount of money.
        amount: Decimal,
        /// What the transaction was for.
        note: String,
    },
    /// `/laporan`: report on the current month.
    Report,
    /// `/bulan`: report on a named month.
    MonthReport {
        /// The calendar year.
        year: i32,
        /// The month number, 1 through 12.
        month: u8,
    },
    /// `/riwayat`: list the last 10 transactions.
    History,
    /// `/hapus`: delete the latest transaction.
    DeleteLast,
    /// `/edit`: replace the latest transaction's amount and note.
    EditLast {
        /// The replacement amount.
        amount: Decimal,
        /// The replacement note.
        note: String,
    },
    /// `/grafik`: send the income-vs-expense chart.
    Chart,
    /// `/reset`: ask for confirmation before wiping all data.
    Reset,
    /// `/reset KONFIRMASI`: wipe all data.
    ResetConfirm,
    /// `/migrasi`: migrate the legacy flat sheet into monthly sheets.
    Migrate,
}

/// A recognized command whose arguments did not parse.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// `/masuk` or `/keluar` with fewer than two arguments.
    RecordUsage(TransactionKind),
    /// `/masuk` or `/keluar` with a non-numeric or non-positive amount.
    RecordAmount(TransactionKind),
    /// `/edit` with fewer than two arguments.
    EditUsage,
    /// `/edit` with a non-numeric or non-positive amount.
    EditAmount,
    /// `/bulan` with fewer than two arguments.
    MonthUsage,
    /// `/bulan` with a month outside 1-12 or a non-numeric year.
    MonthRange,
}

/// Parse `text` as a single bot command.
///
/// Returns `None` for plain text and for unrecognized command names; the
/// caller decides whether those deserve a reply. The command name is matched
/// case-insensitively and a `@botname` suffix is ignored.
pub fn parse_command(text: &str) -> Option<Result<Command, CommandError>> {
    let mut tokens = text.trim().split_whitespace();
    let first = tokens.next()?;
    let name = first.strip_prefix('/')?.split('@').next()?.to_lowercase();
    let args: Vec<&str> = tokens.collect();

    let command = match name.as_str() {
        "start" => Ok(Command::Start),
        "help" => Ok(Command::Help),
        "masuk" => parse_record(TransactionKind::In, &args),
        "keluar" => parse_record(TransactionKind::Out, &args),
        "laporan" => Ok(Command::Report),
        "bulan" => parse_month(&args),
        "riwayat" => Ok(Command::History),
        "hapus" => Ok(Command::DeleteLast),
        "edit" => parse_edit(&args),
        "grafik" => Ok(Command::Chart),
        "reset" => Ok(if args.first() == Some(&"KONFIRMASI") {
            Command::ResetConfirm
        } else {
            Command::Reset
        }),
        "migrasi" => Ok(Command::Migrate),
        _ => return None,
    };

    Some(command)
}

fn parse_record(kind: TransactionKind, args: &[&str]) -> Result<Command, CommandError> {
    if args.len() < 2 {
        return Err(CommandError::RecordUsage(kind));
    }

    let amount = parse_amount_arg(args[0]).ok_or(CommandError::RecordAmount(kind))?;

    Ok(Command::Record {
        kind,
        amount,
        note: args[1..].join(" "),
    })
}

fn parse_edit(args: &[&str]) -> Result<Command, CommandError> {
    if args.len() < 2 {
        return Err(CommandError::EditUsage);
    }

    let amount = parse_amount_arg(args[0]).ok_or(CommandError::EditAmount)?;

    Ok(Command::EditLast {
        amount,
        note: args[1..].join(" "),
    })
}

fn parse_month(args: &[&str]) -> Result<Command, CommandError> {
    let (Some(month_arg), Some(year_arg)) = (args.first(), args.get(1)) else {
        return Err(CommandError::MonthUsage);
    };

    let month: u8 = month_arg.parse().map_err(|_| CommandError::MonthRange)?;
    let year: i32 = year_arg.parse().map_err(|_| CommandError::MonthRange)?;

    if !(1..=12).contains(&month) {
        return Err(CommandError::MonthRange);
    }

    Ok(Command::MonthReport { year, month })
}

/// Parse an amount argument, accepting `50.000` and `50000` alike.
///
/// Dots are thousands separators in user input, so they are stripped before
/// parsing. Zero and negative amounts are rejected.
fn parse_amount_arg(raw: &str) -> Option<Decimal> {
    let amount = raw.replace('.', "").parse::<Decimal>().ok()?;

    (amount > Decimal::ZERO).then_some(amount)
}

/// One line of a multi-line batch entry message.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchLine {
    /// A well-formed `/masuk` or `/keluar` line.
    Entry {
        /// Whether money came in or went out.
        kind: TransactionKind,
        /// The amount of money.
        amount: Decimal,
        /// What the transaction was for.
        note: String,
    },
    /// A line with fewer than two arguments, kept for the warning reply.
    Malformed(String),
    /// A line whose amount did not parse, kept for the warning reply.
    BadAmount(String),
}

/// Detect and parse a batch entry message.
///
/// A message is a batch when two or more of its non-empty lines start with
/// `/masuk ` or `/keluar ` (case-insensitive). Other lines are ignored.
/// Returns `None` when at most one line matches, so a lone command goes
/// through the normal path.
pub fn parse_batch(text: &str) -> Option<Vec<BatchLine>> {
    let matched: Vec<(&str, TransactionKind)> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| batch_line_kind(line).map(|kind| (line, kind)))
        .collect();

    if matched.len() <= 1 {
        return None;
    }

    Some(
        matched
            .into_iter()
            .map(|(line, kind)| parse_batch_line(line, kind))
            .collect(),
    )
}

/// The record kind of a batch line, or `None` if the line is not one.
fn batch_line_kind(line: &str) -> Option<TransactionKind> {
    let rest = line.strip_prefix('/')?;

    for (word, kind) in [
        ("masuk", TransactionKind::In),
        ("keluar", TransactionKind::Out),
    ] {
        let Some(head) = rest.get(..word.len()) else {
            continue;
        };

        if head.eq_ignore_ascii_case(word) && rest[word.len()..].starts_with(char::is_whitespace) {
            return Some(kind);
        }
    }

    None
}

fn parse_batch_line(line: &str, kind: TransactionKind) -> BatchLine {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.len() < 3 {
        return BatchLine::Malformed(line.to_owned());
    }

    match parse_amount_arg(parts[1]) {
        Some(amount) => BatchLine::Entry {
            kind,
            amount,
            note: parts[2..].join(" "),
        },
        None => BatchLine::BadAmount(line.to_owned()),
    }
}
