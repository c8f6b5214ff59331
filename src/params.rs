//! Query parameter resolution.
//!
//! Turns the caller's `option`, `year` and `sub_option` into the positional
//! codes the portal understands (`opcao=opt_NN`, `ano=YYYY`,
//! `subopcao=subopt_NN`). Resolution is a fixed pipeline:
//!
//! ```text
//! QueryParameters ─resolve_option→ OptionStage ─resolve_year→ YearStage
//!                 ─resolve_sub_option→ ResolvedParameters
//! ```
//!
//! Each stage reads the category found by the first one. The first failing
//! stage aborts the whole resolution.

use std::num::IntErrorKind;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{self, Category, DEFAULT_YEAR, SubOption};

/// Why a set of query parameters was rejected.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValidationError {
    #[error("option must be one of ({})", catalog::option_keys().join(", "))]
    UnknownOption,

    #[error("year `{0}` is not valid, only whole numbers are accepted")]
    YearNotInteger(String),

    #[error("year must be between {first} and {last}")]
    YearOutOfRange { first: i64, last: i64 },

    #[error("invalid sub_option for option '{option}', allowed: [{}]", .allowed.join(", "))]
    UnknownSubOption {
        option: &'static str,
        allowed: Vec<&'static str>,
    },

    #[error("sub_option is not accepted when option is '{option}'")]
    SubOptionNotAllowed { option: &'static str },

    #[error("unexpected query parameter `{0}`")]
    UnexpectedParameter(String),
}

/// Raw parameters as received from the caller.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryParameters {
    pub option: Option<String>,
    pub year: Option<String>,
    pub sub_option: Option<String>,
}

impl QueryParameters {
    /// Decodes a URL query string (without the leading `?`).
    ///
    /// When a key repeats, the first value wins. Keys other than `option`,
    /// `year` and `sub_option` are rejected.
    pub fn from_query(query: &str) -> Result<Self, ValidationError> {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "option" => &mut params.option,
                "year" => &mut params.year,
                "sub_option" => &mut params.sub_option,
                other => return Err(ValidationError::UnexpectedParameter(other.to_owned())),
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        Ok(params)
    }

    /// Runs the full resolution pipeline.
    pub fn resolve(self) -> Result<ResolvedParameters, ValidationError> {
        resolve_option(self)
            .and_then(resolve_year)
            .and_then(resolve_sub_option)
    }
}

/// Parameters whose option has been matched to a category.
#[derive(Debug)]
struct OptionStage {
    category: &'static Category,
    year: Option<String>,
    sub_option: Option<String>,
}

/// Parameters whose year has been settled as well.
#[derive(Debug)]
struct YearStage {
    category: &'static Category,
    year: String,
    sub_option: Option<String>,
}

fn resolve_option(params: QueryParameters) -> Result<OptionStage, ValidationError> {
    let category = params
        .option
        .as_deref()
        .and_then(Category::lookup)
        .ok_or(ValidationError::UnknownOption)?;

    Ok(OptionStage {
        category,
        year: params.year,
        sub_option: params.sub_option,
    })
}

/// A missing year becomes [`DEFAULT_YEAR`] as-is; it is not range-checked.
fn resolve_year(stage: OptionStage) -> Result<YearStage, ValidationError> {
    let OptionStage { category, year, sub_option } = stage;

    let Some(year) = year else {
        return Ok(YearStage {
            category,
            year: DEFAULT_YEAR.to_owned(),
            sub_option,
        });
    };

    let range = category.years;
    let out_of_range = ValidationError::YearOutOfRange {
        first: range.first,
        last: range.last,
    };

    let parsed = match parse_integer(&year) {
        Ok(value) => value,
        Err(IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => return Err(out_of_range),
        Err(_) => return Err(ValidationError::YearNotInteger(year)),
    };

    if !range.contains(parsed) {
        return Err(out_of_range);
    }

    Ok(YearStage { category, year, sub_option })
}

/// Parses a whole number the way the portal's callers have always written
/// them: surrounding whitespace is ignored, a sign is optional and single
/// underscores may separate digits (`" 2_000\n"` is 2000).
fn parse_integer(raw: &str) -> Result<i64, IntErrorKind> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);

    let well_formed = !digits.is_empty()
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__")
        && digits.chars().all(|c| c.is_ascii_digit() || c == '_');
    if !well_formed {
        return Err(IntErrorKind::InvalidDigit);
    }

    let compact: String = trimmed.chars().filter(|&c| c != '_').collect();
    compact.parse::<i64>().map_err(|e| e.kind().clone())
}

fn resolve_sub_option(stage: YearStage) -> Result<ResolvedParameters, ValidationError> {
    let YearStage { category, year, sub_option } = stage;

    let chosen: Option<&'static SubOption> = match (category.default_sub_option(), sub_option) {
        (None, None) => None,
        (None, Some(_)) => {
            return Err(ValidationError::SubOptionNotAllowed { option: category.key });
        }
        (Some(default), None) => Some(default),
        (Some(_), Some(key)) => Some(category.sub_option(&key).ok_or_else(|| {
            ValidationError::UnknownSubOption {
                option: category.key,
                allowed: category.sub_option_keys(),
            }
        })?),
    };

    Ok(ResolvedParameters {
        category,
        option: format!("opcao={}", category.code),
        original_option: category.key,
        year: format!("ano={year}"),
        original_year: year,
        sub_option: chosen.map(|s| format!("subopcao={}", s.code)),
        original_sub_option: chosen.map(|s| s.key),
    })
}

/// Validated parameters, encoded for the portal.
///
/// Serializes to the six public fields; the category is kept for callers
/// that need its table layout.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResolvedParameters {
    #[serde(skip)]
    category: &'static Category,
    option: String,
    original_option: &'static str,
    year: String,
    original_year: String,
    sub_option: Option<String>,
    original_sub_option: Option<&'static str>,
}

impl ResolvedParameters {
    pub fn category(&self) -> &'static Category { self.category }

    /// `opcao=opt_NN`
    pub fn option(&self) -> &str { &self.option }
    pub fn original_option(&self) -> &'static str { self.original_option }

    /// `ano=YYYY`
    pub fn year(&self) -> &str { &self.year }
    pub fn original_year(&self) -> &str { &self.original_year }

    /// `subopcao=subopt_NN`, when the category has sub-options.
    pub fn sub_option(&self) -> Option<&str> { self.sub_option.as_deref() }
    pub fn original_sub_option(&self) -> Option<&'static str> { self.original_sub_option }

    /// The portal query string: `opcao=..&ano=..[&subopcao=..]`.
    pub fn to_query(&self) -> String {
        let mut query = format!("{}&{}", self.option, self.year);
        if let Some(sub) = &self.sub_option {
            query.push('&');
            query.push_str(sub);
        }
        query
    }
}
