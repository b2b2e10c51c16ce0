use std::fs;
use std::io::{IsTerminal, Read};

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

/// A ledger source resolved to raw bytes. Bytes, not text: the encoding is
/// unknown until the decoder has tried its candidates.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub source_kind: SourceKind,
    pub source_ref: Option<String>,
    pub content: Vec<u8>,
}

pub(crate) fn resolve_source(
    path: Option<String>,
    stdin_override: Option<Vec<u8>>,
) -> CoreResult<ResolvedSource> {
    let stdin_body = read_stdin(stdin_override)?;
    let has_stdin = stdin_body
        .as_ref()
        .map(|value| !value.is_empty())
        .unwrap_or(false);

    if let Some(path_value) = path {
        if path_value == "-" {
            if let Some(stdin_value) = stdin_body
                && !stdin_value.is_empty()
            {
                return Ok(ResolvedSource {
                    source_kind: SourceKind::Stdin,
                    source_ref: None,
                    content: stdin_value,
                });
            }

            return Err(CoreError::invalid_argument_with_recovery(
                "Path `-` means stdin input, but stdin was empty.",
                vec!["Pipe CSV bytes in, or pass a file path instead.".to_string()],
            ));
        }

        let file_body = fs::read(&path_value).map_err(|error| {
            CoreError::invalid_argument_with_recovery(
                &format!("Could not read ledger file `{path_value}`: {error}"),
                vec![
                    "Verify the path exists and is readable.".to_string(),
                    "Rerun `spendlens report <path>`.".to_string(),
                ],
            )
        })?;

        if has_stdin {
            return Err(CoreError::invalid_argument_with_recovery(
                "Both stdin and file input were provided.",
                vec!["Pass exactly one source: either a file path or piped stdin.".to_string()],
            ));
        }

        return Ok(ResolvedSource {
            source_kind: SourceKind::File,
            source_ref: Some(path_value),
            content: file_body,
        });
    }

    if let Some(stdin_value) = stdin_body
        && !stdin_value.is_empty()
    {
        return Ok(ResolvedSource {
            source_kind: SourceKind::Stdin,
            source_ref: None,
            content: stdin_value,
        });
    }

    Err(CoreError::invalid_argument_with_recovery(
        "No ledger source provided.",
        vec!["Pass a CSV file path or pipe input via stdin.".to_string()],
    ))
}

fn read_stdin(stdin_override: Option<Vec<u8>>) -> CoreResult<Option<Vec<u8>>> {
    if let Some(value) = stdin_override {
        return Ok(Some(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .map_err(|error| {
            CoreError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec!["Retry with an explicit file path argument.".to_string()],
            )
        })?;

    if buffer.is_empty() {
        return Ok(None);
    }

    Ok(Some(buffer))
}
