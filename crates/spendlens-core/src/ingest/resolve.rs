use crate::{CoreError, CoreResult};
use crate::contracts::types::ResolvedColumns;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Date,
    Amount,
    Description,
}

impl Role {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Description => "description",
        }
    }

    /// Lower-cased substrings that mark a column as serving this role,
    /// matching the header vocabulary of Korean bank/card exports.
    pub(crate) const fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Date => &["date", "날짜", "일자"],
            Self::Amount => &["amount", "금액", "지출", "expense"],
            Self::Description => &["desc", "내용", "메모", "상세", "내역"],
        }
    }
}

/// First column (in file order) whose lower-cased name contains any
/// candidate substring for the role. Candidate order never re-ranks columns
/// that were already scanned.
pub(crate) fn resolve(columns: &[String], role: Role) -> Option<&String> {
    columns.iter().find(|column| {
        let lowered = column.to_lowercase();
        role.candidates()
            .iter()
            .any(|candidate| lowered.contains(candidate))
    })
}

/// Resolution that always yields a column: no match falls back to the first
/// column, which callers may override before running downstream stages.
pub(crate) fn resolve_or_first<'a>(columns: &'a [String], role: Role) -> Option<&'a String> {
    resolve(columns, role).or_else(|| columns.first())
}

/// Applies explicit overrides where given, automatic resolution otherwise.
/// An override naming an absent column is a user-actionable error; automatic
/// resolution never fails on a non-empty ledger.
pub(crate) fn resolve_columns(
    columns: &[String],
    date_override: Option<&str>,
    amount_override: Option<&str>,
    desc_override: Option<&str>,
) -> CoreResult<ResolvedColumns> {
    let date = pick(columns, Role::Date, date_override)?;
    let amount = pick(columns, Role::Amount, amount_override)?;
    let description = pick(columns, Role::Description, desc_override)?;
    Ok(ResolvedColumns {
        date,
        amount,
        description,
    })
}

fn pick(columns: &[String], role: Role, requested: Option<&str>) -> CoreResult<String> {
    if let Some(name) = requested {
        if columns.iter().any(|column| column == name) {
            return Ok(name.to_string());
        }
        return Err(CoreError::missing_column(
            role.as_str(),
            name,
            columns,
            role.candidates(),
        ));
    }

    resolve_or_first(columns, role)
        .cloned()
        .ok_or_else(|| CoreError::missing_column(role.as_str(), "", columns, role.candidates()))
}
